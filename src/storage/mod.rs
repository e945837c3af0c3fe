//! Tracking record store: sea-orm backed persistence for tracked
//! messages, tracked links, and their raw event rows.

pub mod backend;
mod models;

pub use backend::TrackingStore;
pub use models::{ClickRecord, MessageSummary, OpenRecord, TrackedLink, TrackedMessage};

use crate::errors::{MailtraceError, Result};

/// Mint an opaque tracking identifier.
///
/// Random UUID v4 (122 bits of entropy), so repeated calls practically
/// never collide. Persistence is the caller's job.
pub fn mint_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Infer the database flavor from a connection URL.
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(MailtraceError::database_config(format!(
            "cannot infer database backend from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}
