//! Database operations for the local catalog `SQLite` file.
//!
//! ## Tables
//!
//! - `products` - Catalog entries (indexed by `category`, `name`, `created_at`)
//! - `media` - Uploaded blobs (images, logo)
//! - `settings` - Key/value settings (JSON values)
//! - `users` - The seeded owner account
//!
//! # Schema
//!
//! The schema is created once, gated on `PRAGMA user_version` (see [`schema`]).

pub mod media;
pub mod products;
pub mod schema;
pub mod settings;
pub mod users;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

pub use media::MediaRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Open (creating if missing) the `SQLite` database at `path`.
///
/// A single connection is used: the store has one user, and `SQLite`
/// serializes writers anyway.
///
/// # Errors
///
/// Returns `sqlx::Error` if the file cannot be opened as a database.
pub async fn create_pool(path: &Path, busy_timeout: Duration) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(busy_timeout);

    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
