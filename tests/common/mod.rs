//! Shared test setup: a fresh SQLite-backed store per test.

use std::sync::Arc;

use tempfile::TempDir;

use mailtrace::analytics::EventRecorder;
use mailtrace::storage::TrackingStore;

/// A throwaway store on its own SQLite file. The `TempDir` must be kept
/// alive for the duration of the test.
pub struct TestEnv {
    _dir: TempDir,
    pub store: Arc<TrackingStore>,
    pub recorder: Arc<EventRecorder>,
}

pub async fn setup() -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("mailtrace_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = Arc::new(
        TrackingStore::new(&db_url, "sqlite")
            .await
            .expect("Failed to create tracking store"),
    );
    let recorder = Arc::new(EventRecorder::new(Arc::clone(&store)));

    TestEnv {
        _dir: dir,
        store,
        recorder,
    }
}

/// Poll until `check` returns true or the budget runs out. Used to wait
/// out the fire-and-forget write window.
#[allow(dead_code)]
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    false
}
