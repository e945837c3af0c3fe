//! Event ingestion and query-time aggregation.
//!
//! [`EventRecorder`] appends open/click rows without ever failing the
//! HTTP path; [`stats`] derives counts and timelines from the raw rows
//! on demand. No maintained counters are authoritative.

pub mod recorder;
pub mod stats;

pub use recorder::EventRecorder;
pub use stats::MessageStats;

/// Request metadata captured for an event before the response is sent.
#[derive(Debug, Clone, Default)]
pub struct HitContext {
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}
