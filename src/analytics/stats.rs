//! Query-time aggregation over raw event rows.
//!
//! Counts are always derived by counting matching rows at read time.
//! Ordering for display is occurred_at descending with the auto id as a
//! stable secondary key.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::Serialize;

use crate::errors::{MailtraceError, Result};
use crate::storage::{ClickRecord, MessageSummary, OpenRecord, TrackingStore};

use migration::entities::{click_event, open_event, tracked_link};

/// Everything the dashboard shows for one message.
#[derive(Serialize, Clone, Debug)]
pub struct MessageStats {
    pub opens: Vec<OpenRecord>,
    pub clicks: Vec<ClickRecord>,
    pub open_count: u64,
    pub click_count: u64,
    pub last_opened_at: Option<DateTime<Utc>>,
}

/// Full open/click timelines plus counts for a single message.
///
/// Opens are matched on message_id; clicks are matched through the
/// link → message join and carry the originating link's original_url.
pub async fn message_stats(store: &TrackingStore, message_id: &str) -> Result<MessageStats> {
    let db = store.get_db();

    let opens: Vec<OpenRecord> = open_event::Entity::find()
        .filter(open_event::Column::MessageId.eq(message_id))
        .order_by_desc(open_event::Column::OccurredAt)
        .order_by_desc(open_event::Column::Id)
        .all(db)
        .await
        .map_err(|e| MailtraceError::database_operation(format!("open query failed: {}", e)))?
        .into_iter()
        .map(Into::into)
        .collect();

    let clicks: Vec<ClickRecord> = click_event::Entity::find()
        .find_also_related(tracked_link::Entity)
        .filter(tracked_link::Column::MessageId.eq(message_id))
        .order_by_desc(click_event::Column::OccurredAt)
        .order_by_desc(click_event::Column::Id)
        .all(db)
        .await
        .map_err(|e| MailtraceError::database_operation(format!("click query failed: {}", e)))?
        .into_iter()
        .map(|(event, link)| ClickRecord::from_parts(event, link.map(|l| l.original_url)))
        .collect();

    let last_opened_at = opens.first().map(|o| o.occurred_at);

    Ok(MessageStats {
        open_count: opens.len() as u64,
        click_count: clicks.len() as u64,
        last_opened_at,
        opens,
        clicks,
    })
}

#[derive(Debug, FromQueryResult)]
struct OpenAggRow {
    message_id: String,
    hits: i64,
    last_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromQueryResult)]
struct ClickAggRow {
    message_id: String,
    hits: i64,
}

/// Owner listing with per-message aggregates, newest message first.
///
/// Runs a constant number of grouped queries regardless of how many
/// messages the owner has: one for the messages, one grouped count over
/// opens, one grouped count over clicks joined through their links.
/// Counting opens and clicks separately avoids the row multiplication a
/// single multi-join would produce.
pub async fn owner_summaries(store: &TrackingStore, owner_id: &str) -> Result<Vec<MessageSummary>> {
    let db = store.get_db();
    let messages = store.list_messages_for_owner(owner_id).await?;

    if messages.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = messages.iter().map(|m| m.id.clone()).collect();

    let open_rows: Vec<OpenAggRow> = open_event::Entity::find()
        .select_only()
        .column_as(open_event::Column::MessageId, "message_id")
        .column_as(open_event::Column::Id.count(), "hits")
        .column_as(open_event::Column::OccurredAt.max(), "last_at")
        .filter(open_event::Column::MessageId.is_in(ids.clone()))
        .group_by(open_event::Column::MessageId)
        .into_model()
        .all(db)
        .await
        .map_err(|e| MailtraceError::database_operation(format!("open rollup failed: {}", e)))?;

    let click_rows: Vec<ClickAggRow> = click_event::Entity::find()
        .select_only()
        .column_as(tracked_link::Column::MessageId, "message_id")
        .column_as(click_event::Column::Id.count(), "hits")
        .join(JoinType::InnerJoin, click_event::Relation::Link.def())
        .filter(tracked_link::Column::MessageId.is_in(ids))
        .group_by(tracked_link::Column::MessageId)
        .into_model()
        .all(db)
        .await
        .map_err(|e| MailtraceError::database_operation(format!("click rollup failed: {}", e)))?;

    let opens: std::collections::HashMap<String, (u64, Option<DateTime<Utc>>)> = open_rows
        .into_iter()
        .map(|r| (r.message_id, (r.hits.max(0) as u64, r.last_at)))
        .collect();
    let clicks: std::collections::HashMap<String, u64> = click_rows
        .into_iter()
        .map(|r| (r.message_id, r.hits.max(0) as u64))
        .collect();

    Ok(messages
        .into_iter()
        .map(|message| {
            let (open_count, last_opened_at) =
                opens.get(&message.id).cloned().unwrap_or((0, None));
            let click_count = clicks.get(&message.id).copied().unwrap_or(0);
            MessageSummary {
                message,
                open_count,
                click_count,
                last_opened_at,
            }
        })
        .collect())
}
