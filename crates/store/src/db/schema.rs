//! Schema creation, gated on `PRAGMA user_version`.
//!
//! Version 0 means a brand-new file: every table and index is created, the
//! owner account is seeded, and the version is bumped, all in one
//! transaction. Any later open finds the version set and skips the block.

use secrecy::SecretString;
use sqlx::SqlitePool;

use catalog_core::{Role, Timestamp};

use super::users;

/// Version written after the schema is created.
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id              BLOB PRIMARY KEY NOT NULL,
    name            TEXT NOT NULL,
    category        TEXT NOT NULL,
    price           TEXT NOT NULL,
    stock           INTEGER NOT NULL CHECK (stock >= 0),
    image_media_id  BLOB,
    description     TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_products_category   ON products(category);
CREATE INDEX IF NOT EXISTS idx_products_name       ON products(name);
CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at);

-- Media rows are never updated.
CREATE TABLE IF NOT EXISTS media (
    id          BLOB PRIMARY KEY NOT NULL,
    name        TEXT NOT NULL,
    mime_type   TEXT NOT NULL,
    size_bytes  INTEGER NOT NULL,
    blob        BLOB NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key    TEXT PRIMARY KEY NOT NULL,
    value  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    username    TEXT PRIMARY KEY NOT NULL,
    password    TEXT NOT NULL,
    role        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
";

/// Read the schema version stored in the database header.
///
/// # Errors
///
/// Returns `sqlx::Error` if the pragma cannot be read (e.g., the file is not a
/// database).
pub async fn schema_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
}

/// Create tables, indexes and the owner account if the database is new.
///
/// Returns `true` when the schema was created by this call.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails; nothing is committed then.
pub async fn ensure_schema(
    pool: &SqlitePool,
    owner_username: &str,
    owner_password: &SecretString,
    now: Timestamp,
) -> Result<bool, sqlx::Error> {
    if schema_version(pool).await? >= SCHEMA_VERSION {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    // Another connection may have created the schema since the first read.
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(&mut *tx)
        .await?;
    if version >= SCHEMA_VERSION {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::raw_sql(SCHEMA).execute(&mut *tx).await?;
    users::insert_user(&mut *tx, owner_username, owner_password, Role::Owner, now).await?;

    // PRAGMA does not accept bound parameters.
    sqlx::raw_sql(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        version = SCHEMA_VERSION,
        owner = %owner_username,
        "Catalog schema created and owner account seeded"
    );
    Ok(true)
}
