//! Creation and lookup of tracked messages and tracked links.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, info};

use crate::errors::{MailtraceError, Result};
use crate::storage::models::{TrackedLink, TrackedMessage};
use crate::storage::mint_id;
use crate::utils::url_validator::validate_original_url;

use migration::entities::{tracked_link, tracked_message};

use super::TrackingStore;

const DEFAULT_SUBJECT: &str = "Untitled";
const DEFAULT_RECIPIENT: &str = "Unknown";

impl TrackingStore {
    /// Persist a new tracked message.
    ///
    /// Subject and recipient fall back to placeholders rather than
    /// failing; message creation must never block the sender's workflow.
    /// `id` is honored when supplied by a trusted caller (the extension
    /// pre-mints ids so the pixel can be embedded before the network
    /// round-trip completes), otherwise one is minted here.
    pub async fn create_message(
        &self,
        owner_id: &str,
        subject: Option<&str>,
        recipient: Option<&str>,
        id: Option<&str>,
    ) -> Result<TrackedMessage> {
        if owner_id.trim().is_empty() {
            return Err(MailtraceError::validation("owner_id is required"));
        }

        let id = match id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(supplied) => supplied.to_string(),
            None => mint_id(),
        };

        let subject = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT);
        let recipient = recipient
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_RECIPIENT);

        let model = tracked_message::ActiveModel {
            id: Set(id),
            owner_id: Set(owner_id.to_string()),
            subject: Set(subject.to_string()),
            recipient: Set(recipient.to_string()),
            created_at: Set(Utc::now()),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            MailtraceError::database_operation(format!("failed to create tracked message: {}", e))
        })?;

        info!("Tracked message created: {}", inserted.id);
        Ok(inserted.into())
    }

    /// Persist a new tracked link under `message_id`.
    ///
    /// The URL must be an absolute http/https URL. Whether the parent
    /// message exists is deliberately not checked; events and links
    /// tolerate dangling references.
    pub async fn create_link(&self, message_id: &str, original_url: &str) -> Result<TrackedLink> {
        if message_id.trim().is_empty() {
            return Err(MailtraceError::validation("message_id is required"));
        }
        validate_original_url(original_url)
            .map_err(|e| MailtraceError::validation(e.to_string()))?;

        let model = tracked_link::ActiveModel {
            id: Set(mint_id()),
            message_id: Set(message_id.to_string()),
            original_url: Set(original_url.trim().to_string()),
            created_at: Set(Utc::now()),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            MailtraceError::database_operation(format!("failed to create tracked link: {}", e))
        })?;

        debug!(
            "Tracked link created: {} -> {}",
            inserted.id, inserted.original_url
        );
        Ok(inserted.into())
    }

    pub async fn get_message(&self, id: &str) -> Result<Option<TrackedMessage>> {
        let found = tracked_message::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                MailtraceError::database_operation(format!("message lookup failed: {}", e))
            })?;

        Ok(found.map(Into::into))
    }

    pub async fn get_link(&self, id: &str) -> Result<Option<TrackedLink>> {
        let found = tracked_link::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| MailtraceError::database_operation(format!("link lookup failed: {}", e)))?;

        Ok(found.map(Into::into))
    }

    /// All messages for an owner, newest first. Aggregates are attached
    /// by the stats engine at query time.
    pub async fn list_messages_for_owner(&self, owner_id: &str) -> Result<Vec<TrackedMessage>> {
        let models = tracked_message::Entity::find()
            .filter(tracked_message::Column::OwnerId.eq(owner_id))
            .order_by_desc(tracked_message::Column::CreatedAt)
            .order_by_desc(tracked_message::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                MailtraceError::database_operation(format!("owner listing failed: {}", e))
            })?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Links belonging to a message, in creation order.
    pub async fn list_links_for_message(&self, message_id: &str) -> Result<Vec<TrackedLink>> {
        let models = tracked_link::Entity::find()
            .filter(tracked_link::Column::MessageId.eq(message_id))
            .order_by_asc(tracked_link::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                MailtraceError::database_operation(format!("link listing failed: {}", e))
            })?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
