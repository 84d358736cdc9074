//! Media and logo operations.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::instrument;

use catalog_core::MediaId;

use super::CatalogStore;
use crate::db::MediaRepository;
use crate::db::settings::{LOGO_MEDIA_ID_KEY, get_setting, set_setting};
use crate::error::{Result, StoreError};
use crate::media_url::MediaHandle;
use crate::models::{MediaRecord, NewMedia};

impl CatalogStore {
    /// Store an uploaded file and return its new ID.
    ///
    /// Identical uploads are stored twice.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the insert fails.
    #[instrument(
        skip(self, file),
        fields(name = %file.name, mime = %file.mime_type, size = file.bytes.len())
    )]
    pub async fn save_media(&self, file: NewMedia) -> Result<MediaId> {
        let id = MediaId::new(self.ids.new_id());
        MediaRepository::new(&self.pool)
            .insert(id, &file, self.now())
            .await?;

        tracing::debug!(media_id = %id, "Media saved");
        Ok(id)
    }

    /// Fetch a stored blob with its metadata.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn media_record(&self, id: MediaId) -> Result<Option<MediaRecord>> {
        Ok(MediaRepository::new(&self.pool).get(id).await?)
    }

    /// Mint a fresh URL for a stored blob, or `None` if there is no such blob.
    ///
    /// The URL stays resolvable until the returned handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    #[instrument(skip(self), fields(media_id = %id))]
    pub async fn media_url(&self, id: MediaId) -> Result<Option<MediaHandle>> {
        let record = MediaRepository::new(&self.pool).get(id).await?;
        Ok(record.map(|r| self.media_urls.register(r.id, r.mime_type, r.blob)))
    }

    /// Bytes behind a live media URL; `None` once the handle is gone.
    #[must_use]
    pub fn resolve_media_url(&self, url: &str) -> Option<Arc<[u8]>> {
        self.media_urls.resolve(url)
    }

    /// Store a new logo and point the logo setting at it.
    ///
    /// The previous logo blob is kept.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if either write fails.
    pub async fn set_logo(&self, file: NewMedia) -> Result<MediaId> {
        let id = self.save_media(file).await?;
        set_setting(
            &self.pool,
            LOGO_MEDIA_ID_KEY,
            &JsonValue::String(id.to_string()),
        )
        .await?;

        tracing::info!(media_id = %id, "Logo updated");
        Ok(id)
    }

    /// Mint a URL for the current logo.
    ///
    /// Returns `None` if no logo was ever set, or if the logo blob is missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if a query fails.
    /// Returns `StoreError::DataCorruption` if the stored pointer is not a media ID.
    pub async fn logo_url(&self) -> Result<Option<MediaHandle>> {
        let Some(value) = get_setting(&self.pool, LOGO_MEDIA_ID_KEY).await? else {
            return Ok(None);
        };

        let id = value
            .as_str()
            .and_then(|s| MediaId::parse(s).ok())
            .ok_or_else(|| {
                StoreError::DataCorruption(format!("invalid logo media id: {value}"))
            })?;

        self.media_url(id).await
    }
}
