use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackedMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackedMessages::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrackedMessages::OwnerId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TrackedMessages::Subject).text().not_null())
                    .col(
                        ColumnDef::new(TrackedMessages::Recipient)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackedMessages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // No foreign key on message_id: link creation does not verify the
        // parent message and events tolerate dangling references.
        manager
            .create_table(
                Table::create()
                    .table(TrackedLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackedLinks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrackedLinks::MessageId).string().not_null())
                    .col(ColumnDef::new(TrackedLinks::OriginalUrl).text().not_null())
                    .col(
                        ColumnDef::new(TrackedLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OpenEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OpenEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OpenEvents::MessageId).string().not_null())
                    .col(
                        ColumnDef::new(OpenEvents::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OpenEvents::SourceIp).string().null())
                    .col(ColumnDef::new(OpenEvents::UserAgent).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClickEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClickEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClickEvents::LinkId).string().not_null())
                    .col(
                        ColumnDef::new(ClickEvents::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClickEvents::SourceIp).string().null())
                    .col(ColumnDef::new(ClickEvents::UserAgent).text().null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClickEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OpenEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrackedLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrackedMessages::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TrackedMessages {
    Table,
    Id,
    OwnerId,
    Subject,
    Recipient,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TrackedLinks {
    Table,
    Id,
    MessageId,
    OriginalUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OpenEvents {
    Table,
    Id,
    MessageId,
    OccurredAt,
    SourceIp,
    UserAgent,
}

#[derive(DeriveIden)]
enum ClickEvents {
    Table,
    Id,
    LinkId,
    OccurredAt,
    SourceIp,
    UserAgent,
}
