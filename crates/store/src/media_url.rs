//! Process-local URLs for stored media.
//!
//! A [`MediaHandle`] owns one registered URL. The URL resolves through
//! [`MediaUrlRegistry::resolve`] until the handle is revoked or dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use uuid::Uuid;

use catalog_core::MediaId;

/// Scheme prefix for minted URLs.
pub const URL_PREFIX: &str = "blob:catalog/";

type Entries = Mutex<HashMap<String, Arc<[u8]>>>;

/// Registry of live media URLs. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct MediaUrlRegistry {
    entries: Arc<Entries>,
}

impl fmt::Debug for MediaUrlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaUrlRegistry")
            .field("live", &self.len())
            .finish()
    }
}

impl MediaUrlRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under a fresh URL and return the owning handle.
    #[must_use]
    pub fn register(&self, media_id: MediaId, mime_type: String, bytes: Vec<u8>) -> MediaHandle {
        let url = format!("{URL_PREFIX}{}", Uuid::new_v4());
        let bytes: Arc<[u8]> = bytes.into();

        self.entries.lock().insert(url.clone(), Arc::clone(&bytes));
        tracing::debug!(%media_id, %url, "Media URL registered");

        MediaHandle {
            url,
            media_id,
            mime_type,
            bytes,
            registry: Arc::downgrade(&self.entries),
        }
    }

    /// Bytes behind a live URL; `None` once it has been revoked.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        self.entries.lock().get(url).cloned()
    }

    /// Number of live URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A live URL for one media blob.
///
/// Every call that produces a handle mints a new URL. Dropping the handle
/// revokes it.
pub struct MediaHandle {
    url: String,
    media_id: MediaId,
    mime_type: String,
    bytes: Arc<[u8]>,
    registry: Weak<Entries>,
}

impl MediaHandle {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn media_id(&self) -> MediaId {
        self.media_id
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Release the URL now instead of at drop.
    pub fn revoke(self) {
        drop(self);
    }

    fn release(&self) {
        if let Some(entries) = self.registry.upgrade()
            && entries.lock().remove(&self.url).is_some()
        {
            tracing::debug!(media_id = %self.media_id, url = %self.url, "Media URL revoked");
        }
    }
}

impl Drop for MediaHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaHandle")
            .field("url", &self.url)
            .field("media_id", &self.media_id)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
