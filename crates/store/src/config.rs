//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_DATABASE_PATH` - `SQLite` database file (default: catalog.db)
//! - `CATALOG_SESSION_PATH` - Owner session flag file (default: session.json)
//! - `CATALOG_OWNER_USERNAME` - Username seeded for the owner account (default: owner)
//! - `CATALOG_OWNER_PASSWORD` - Password seeded for the owner account (default: owner123)
//! - `CATALOG_BUSY_TIMEOUT_SECS` - Seconds to wait on a locked database (default: 5)
//!
//! The owner credential is only read when the schema is first created; changing
//! it afterwards has no effect on an existing database.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_PATH: &str = "catalog.db";
const DEFAULT_SESSION_PATH: &str = "session.json";
const DEFAULT_OWNER_USERNAME: &str = "owner";
const DEFAULT_OWNER_PASSWORD: &str = "owner123";
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog store configuration.
#[derive(Clone)]
pub struct StoreConfig {
    /// `SQLite` database file holding products, media, settings and users
    pub database_path: PathBuf,
    /// JSON file holding the owner session flag
    pub session_path: PathBuf,
    /// Username of the seeded owner account
    pub owner_username: String,
    /// Password of the seeded owner account
    pub owner_password: SecretString,
    /// How long to wait for a locked database before failing
    pub busy_timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("database_path", &self.database_path)
            .field("session_path", &self.session_path)
            .field("owner_username", &self.owner_username)
            .field("owner_password", &"[REDACTED]")
            .field("busy_timeout", &self.busy_timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Build a configuration that keeps both files inside `dir`.
    ///
    /// Uses the default owner credential and busy timeout.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            database_path: dir.join(DEFAULT_DATABASE_PATH),
            session_path: dir.join(DEFAULT_SESSION_PATH),
            owner_username: DEFAULT_OWNER_USERNAME.to_owned(),
            owner_password: SecretString::from(DEFAULT_OWNER_PASSWORD),
            busy_timeout: Duration::from_secs(DEFAULT_BUSY_TIMEOUT_SECS),
        }
    }

    /// Replace the owner credential seeded on first schema creation.
    #[must_use]
    pub fn with_owner(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.owner_username = username.into();
        self.owner_password = SecretString::from(password.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_path = PathBuf::from(get_env_or_default(
            "CATALOG_DATABASE_PATH",
            DEFAULT_DATABASE_PATH,
        ));
        let session_path = PathBuf::from(get_env_or_default(
            "CATALOG_SESSION_PATH",
            DEFAULT_SESSION_PATH,
        ));

        let owner_username = get_env_or_default("CATALOG_OWNER_USERNAME", DEFAULT_OWNER_USERNAME);
        if owner_username.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_OWNER_USERNAME".to_string(),
                "must not be empty".to_string(),
            ));
        }
        let owner_password = SecretString::from(get_env_or_default(
            "CATALOG_OWNER_PASSWORD",
            DEFAULT_OWNER_PASSWORD,
        ));

        let busy_timeout_secs = get_env_or_default(
            "CATALOG_BUSY_TIMEOUT_SECS",
            &DEFAULT_BUSY_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_BUSY_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            database_path,
            session_path,
            owner_username,
            owner_password,
            busy_timeout: Duration::from_secs(busy_timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
