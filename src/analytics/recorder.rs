//! Fire-and-forget event recording.
//!
//! The pixel and redirect responses must go out regardless of whether
//! the write lands; a broken image or failed redirect is worse than a
//! lost analytics row. Writes therefore run in detached tasks that are
//! not tied to the request's lifetime, and storage failures are logged
//! and swallowed.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::storage::TrackingStore;

use super::HitContext;

pub struct EventRecorder {
    store: Arc<TrackingStore>,
}

impl EventRecorder {
    pub fn new(store: Arc<TrackingStore>) -> Self {
        EventRecorder { store }
    }

    /// Append an open event for `message_id`. Returns immediately; the
    /// insert completes in the background even if the client has already
    /// disconnected. The id is not validated — a dangling reference is
    /// recorded as-is.
    pub fn record_open(&self, message_id: &str, ctx: HitContext) {
        let store = Arc::clone(&self.store);
        let message_id = message_id.to_string();

        tokio::spawn(async move {
            match store
                .insert_open(&message_id, ctx.source_ip, ctx.user_agent)
                .await
            {
                Ok(()) => trace!("Open recorded for message {}", message_id),
                Err(e) => warn!("Failed to record open for message {}: {}", message_id, e),
            }
        });
    }

    /// Append a click event for `link_id`, same contract as
    /// [`record_open`](Self::record_open).
    pub fn record_click(&self, link_id: &str, ctx: HitContext) {
        let store = Arc::clone(&self.store);
        let link_id = link_id.to_string();

        tokio::spawn(async move {
            match store
                .insert_click(&link_id, ctx.source_ip, ctx.user_agent)
                .await
            {
                Ok(()) => trace!("Click recorded for link {}", link_id),
                Err(e) => warn!("Failed to record click for link {}: {}", link_id, e),
            }
        });
    }
}
