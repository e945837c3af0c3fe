//! Indexes for the hot query paths: owner listings, per-message event
//! scans, and the click → link join.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tracked_messages_owner_created")
                    .table(TrackedMessages::Table)
                    .col(TrackedMessages::OwnerId)
                    .col(TrackedMessages::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tracked_links_message_id")
                    .table(TrackedLinks::Table)
                    .col(TrackedLinks::MessageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_open_events_message_occurred")
                    .table(OpenEvents::Table)
                    .col(OpenEvents::MessageId)
                    .col(OpenEvents::OccurredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_events_link_occurred")
                    .table(ClickEvents::Table)
                    .col(ClickEvents::LinkId)
                    .col(ClickEvents::OccurredAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_click_events_link_occurred")
                    .table(ClickEvents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_open_events_message_occurred")
                    .table(OpenEvents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tracked_links_message_id")
                    .table(TrackedLinks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tracked_messages_owner_created")
                    .table(TrackedMessages::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TrackedMessages {
    Table,
    OwnerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TrackedLinks {
    Table,
    MessageId,
}

#[derive(DeriveIden)]
enum OpenEvents {
    Table,
    MessageId,
    OccurredAt,
}

#[derive(DeriveIden)]
enum ClickEvents {
    Table,
    LinkId,
    OccurredAt,
}
