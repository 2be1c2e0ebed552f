//! Application configuration loaded from environment variables once at
//! startup and passed explicitly to the components that need it.

use std::env;

use fable_infra::DatabaseConfig;

/// Default sender address for share mails when SHARE_FROM_ADDRESS is unset.
const DEFAULT_SHARE_FROM: &str = "blog@fable.local";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Sender address handed to the Sharing Workflow.
    pub share_from_address: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            share_from_address: env::var("SHARE_FROM_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_SHARE_FROM.to_string()),
        }
    }
}
