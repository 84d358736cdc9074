//! Command implementations.
//!
//! Every command opens the store from the environment (`StoreConfig::from_env`)
//! and writes its result to stdout as pretty JSON.

pub mod business;
pub mod media;
pub mod products;
pub mod session;

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use catalog_store::{CatalogStore, ConfigError, StoreConfig, StoreError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An ID argument is not a UUID.
    #[error("Invalid ID {0:?}: {1}")]
    InvalidId(String, String),

    /// A required flag was not given.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Reading a file or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the store described by the environment.
pub async fn open_store() -> Result<CatalogStore, CommandError> {
    let config = StoreConfig::from_env()?;
    tracing::debug!(?config, "Opening catalog store");
    Ok(CatalogStore::init(config).await?)
}

/// Report that the store is ready.
pub async fn init(store: &CatalogStore) -> Result<(), CommandError> {
    store.health_check().await?;
    tracing::info!("Catalog store initialized");
    emit(&serde_json::json!({ "ready": true }))
}

/// Write `value` to stdout as pretty JSON.
pub fn emit<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Parse a UUID-backed ID argument.
pub fn parse_id<T>(raw: &str) -> Result<T, CommandError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e: T::Err| CommandError::InvalidId(raw.to_owned(), e.to_string()))
}
