//! Application configuration, loaded once from the environment.
//!
//! All knobs come from environment variables (with `.env` support via
//! dotenvy) and are frozen into a process-wide [`AppConfig`] at startup.

use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub tracking: TrackingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    /// One of "sqlite", "postgres", "mysql". Controls connection tuning only.
    pub backend: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub enable_rotation: bool,
    pub max_backups: u32,
}

#[derive(Clone, Debug)]
pub struct TrackingConfig {
    /// Base URL used when building pixel/wrapped-link URLs. When unset the
    /// request's own host is used, matching reverse-proxy deployments.
    pub public_base_url: Option<String>,
    /// Budget for the read/aggregation path. The write path has no extra
    /// timeout beyond the storage layer's own.
    pub stats_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://mailtrace.db?mode=rwc".to_string()),
                backend: env::var("DATABASE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                file: env::var("LOG_FILE").ok().filter(|f| !f.is_empty()),
                format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
                enable_rotation: env::var("LOG_ROTATION")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(true),
                max_backups: env::var("LOG_MAX_BACKUPS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(7),
            },
            tracking: TrackingConfig {
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .ok()
                    .filter(|u| !u.is_empty())
                    .map(|u| u.trim_end_matches('/').to_string()),
                stats_timeout_secs: env::var("STATS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            },
        }
    }
}

/// Load configuration from the environment. Later calls are no-ops.
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let config = AppConfig::from_env();
        assert!(!config.server.host.is_empty());
        assert!(config.tracking.stats_timeout_secs > 0);
    }
}
