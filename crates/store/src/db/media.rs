//! Media repository for database operations.
//!
//! Media rows are write-once: there is no update or delete.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use catalog_core::{MediaId, Timestamp};

use crate::models::{MediaRecord, NewMedia};

#[derive(Debug, sqlx::FromRow)]
struct MediaRow {
    id: MediaId,
    name: String,
    mime_type: String,
    size_bytes: i64,
    blob: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl From<MediaRow> for MediaRecord {
    fn from(row: MediaRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            mime_type: row.mime_type,
            size_bytes: row.size_bytes,
            blob: row.blob,
            created_at: row.created_at,
        }
    }
}

/// Repository for media database operations.
pub struct MediaRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MediaRepository<'a> {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a blob under `id`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn insert(
        &self,
        id: MediaId,
        media: &NewMedia,
        created_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            INSERT INTO media (id, name, mime_type, size_bytes, blob, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(id)
        .bind(&media.name)
        .bind(&media.mime_type)
        .bind(media.size_bytes())
        .bind(media.bytes.as_slice())
        .bind(created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Get a blob and its metadata.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query fails.
    pub async fn get(&self, id: MediaId) -> Result<Option<MediaRecord>, sqlx::Error> {
        let row = sqlx::query_as::<_, MediaRow>(
            r"
            SELECT id, name, mime_type, size_bytes, blob, created_at
            FROM media
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Count stored blobs.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query fails.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM media")
            .fetch_one(self.pool)
            .await
    }
}
