//! SeaORM storage backend.
//!
//! Supports SQLite, MySQL/MariaDB, and PostgreSQL. All mutations are
//! single-row inserts; no cross-table transactions are needed because
//! child rows are created after the parent id is already known.

mod connection;
mod events;
mod records;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::Result;

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Explicitly constructed storage client, opened once at startup and
/// handed to every component. There is no module-level database handle.
#[derive(Clone)]
pub struct TrackingStore {
    db: DatabaseConnection,
    backend_name: String,
}

impl TrackingStore {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        run_migrations(&db).await?;

        info!("{} tracking store initialized", backend_name.to_uppercase());
        Ok(TrackingStore {
            db,
            backend_name: backend_name.to_string(),
        })
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
