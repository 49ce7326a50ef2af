//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use catalog_infra::DatabaseConfig;

/// Credentials for the one-time admin bootstrap.
#[derive(Debug, Clone)]
pub struct AdminBootstrapConfig {
    pub email: String,
    pub password: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub cache_ttl: Duration,
    pub admin: AdminBootstrapConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            cache_ttl: Duration::from_secs(
                env::var("CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            admin: AdminBootstrapConfig {
                email: env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@catalog.local".to_string()),
                password: env::var("ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "change-me-on-first-login".to_string()),
            },
        }
    }
}
