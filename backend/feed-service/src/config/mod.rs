/// Configuration management for Feed Service
///
/// Loads configuration from environment variables (and `.env` when present).
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub database: Option<DatabaseConfig>,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

/// Backing store for content and follow data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// JSON array of content rows loaded into the memory store at startup
    pub seed_path: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Upper bound on rows fetched for one feed request
    #[serde(default = "default_max_candidates")]
    pub max_candidates: i64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_run_migrations() -> bool {
    true
}

fn default_max_candidates() -> i64 {
    500
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("APP_PORT")
                .unwrap_or_else(|_| "8012".to_string())
                .parse()
                .context("APP_PORT must be a valid u16")?,
        };

        let kind = match std::env::var("FEED_STORE")
            .unwrap_or_else(|_| "memory".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StoreKind::Postgres,
            "memory" => StoreKind::Memory,
            other => bail!("FEED_STORE must be 'postgres' or 'memory', got '{}'", other),
        };

        let store = StoreConfig {
            kind,
            seed_path: std::env::var("FEED_SEED_PATH").ok(),
        };

        let database = match kind {
            StoreKind::Postgres => Some(DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .context("DATABASE_URL environment variable not set")?,
                max_connections: std::env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: std::env::var("DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
                run_migrations: std::env::var("DB_RUN_MIGRATIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_run_migrations),
            }),
            StoreKind::Memory => None,
        };

        let max_candidates = std::env::var("FEED_MAX_CANDIDATES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_max_candidates);
        if max_candidates <= 0 {
            bail!("FEED_MAX_CANDIDATES must be positive");
        }

        Ok(Config {
            app,
            store,
            database,
            feed: FeedConfig { max_candidates },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so env mutations don't race with each other
    #[test]
    fn test_from_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "FEED_STORE",
            "FEED_SEED_PATH",
            "FEED_MAX_CANDIDATES",
            "DATABASE_URL",
        ] {
            std::env::remove_var(key);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.port, 8012);
        assert_eq!(config.store.kind, StoreKind::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.feed.max_candidates, 500);

        std::env::set_var("FEED_STORE", "postgres");
        assert!(Config::from_env().is_err());

        std::env::set_var("DATABASE_URL", "postgres://test");
        let config = Config::from_env().unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.max_connections, 10);
        assert!(database.run_migrations);
        assert!(!format!("{:?}", database).contains("postgres://test"));

        std::env::set_var("FEED_STORE", "sqlite");
        assert!(Config::from_env().is_err());

        std::env::remove_var("FEED_STORE");
        std::env::remove_var("DATABASE_URL");
    }
}
