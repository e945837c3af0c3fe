//! Application lifecycle: startup context assembly and the HTTP server.

mod server;
mod startup;

pub use server::run_server;
pub use startup::{StartupContext, prepare_server_startup};
