use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::analytics::EventRecorder;
use crate::config::get_config;
use crate::storage::{TrackingStore, infer_backend_from_url};

/// Everything the HTTP server needs, constructed once at startup. The
/// store is the only shared state; it is opened here and dropped on
/// shutdown when the context goes out of scope.
pub struct StartupContext {
    pub store: Arc<TrackingStore>,
    pub recorder: Arc<EventRecorder>,
}

pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let backend = if config.database.backend.is_empty() {
        infer_backend_from_url(&config.database.url).context("Cannot determine database backend")?
    } else {
        config.database.backend.clone()
    };

    let store = Arc::new(
        TrackingStore::new(&config.database.url, &backend)
            .await
            .context("Failed to initialize tracking store")?,
    );

    let recorder = Arc::new(EventRecorder::new(Arc::clone(&store)));

    info!(
        "Startup context ready in {:?} (backend: {})",
        start_time.elapsed(),
        store.backend_name()
    );

    Ok(StartupContext { store, recorder })
}
