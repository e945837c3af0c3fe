use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use migration::entities::{click_event, open_event, tracked_link, tracked_message};

/// A logical outgoing email the system issued a tracking identifier for.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TrackedMessage {
    pub id: String,
    pub owner_id: String,
    pub subject: String,
    pub recipient: String,
    pub created_at: DateTime<Utc>,
}

/// A wrapped URL substituted for an original link inside a tracked message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TrackedLink {
    pub id: String,
    pub message_id: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

/// One pixel fetch, as stored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OpenRecord {
    pub id: i64,
    pub message_id: String,
    pub occurred_at: DateTime<Utc>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// One wrapped-link traversal, joined with the originating link's
/// destination for display. `original_url` is `None` when the link row
/// is gone; the event row is still reported.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClickRecord {
    pub id: i64,
    pub link_id: String,
    pub occurred_at: DateTime<Utc>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
    pub original_url: Option<String>,
}

/// A tracked message with its query-time aggregates, as shown on the
/// owner's dashboard listing.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageSummary {
    #[serde(flatten)]
    pub message: TrackedMessage,
    pub open_count: u64,
    pub click_count: u64,
    pub last_opened_at: Option<DateTime<Utc>>,
}

impl From<tracked_message::Model> for TrackedMessage {
    fn from(model: tracked_message::Model) -> Self {
        TrackedMessage {
            id: model.id,
            owner_id: model.owner_id,
            subject: model.subject,
            recipient: model.recipient,
            created_at: model.created_at,
        }
    }
}

impl From<tracked_link::Model> for TrackedLink {
    fn from(model: tracked_link::Model) -> Self {
        TrackedLink {
            id: model.id,
            message_id: model.message_id,
            original_url: model.original_url,
            created_at: model.created_at,
        }
    }
}

impl From<open_event::Model> for OpenRecord {
    fn from(model: open_event::Model) -> Self {
        OpenRecord {
            id: model.id,
            message_id: model.message_id,
            occurred_at: model.occurred_at,
            source_ip: model.source_ip,
            user_agent: model.user_agent,
        }
    }
}

impl ClickRecord {
    pub fn from_parts(model: click_event::Model, original_url: Option<String>) -> Self {
        ClickRecord {
            id: model.id,
            link_id: model.link_id,
            occurred_at: model.occurred_at,
            source_ip: model.source_ip,
            user_agent: model.user_agent,
            original_url,
        }
    }
}
