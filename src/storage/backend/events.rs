//! Raw event inserts. Append-only, best-effort: neither insert checks
//! that the referenced message or link exists.

use chrono::Utc;
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::errors::{MailtraceError, Result};

use migration::entities::{click_event, open_event};

use super::TrackingStore;

impl TrackingStore {
    pub async fn insert_open(
        &self,
        message_id: &str,
        source_ip: Option<String>,
        user_agent: Option<String>,
    ) -> Result<()> {
        let model = open_event::ActiveModel {
            id: NotSet,
            message_id: Set(message_id.to_string()),
            occurred_at: Set(Utc::now()),
            source_ip: Set(source_ip),
            user_agent: Set(user_agent),
        };

        model.insert(&self.db).await.map_err(|e| {
            MailtraceError::database_operation(format!("open event insert failed: {}", e))
        })?;

        Ok(())
    }

    pub async fn insert_click(
        &self,
        link_id: &str,
        source_ip: Option<String>,
        user_agent: Option<String>,
    ) -> Result<()> {
        let model = click_event::ActiveModel {
            id: NotSet,
            link_id: Set(link_id.to_string()),
            occurred_at: Set(Utc::now()),
            source_ip: Set(source_ip),
            user_agent: Set(user_agent),
        };

        model.insert(&self.db).await.map_err(|e| {
            MailtraceError::database_operation(format!("click event insert failed: {}", e))
        })?;

        Ok(())
    }
}
