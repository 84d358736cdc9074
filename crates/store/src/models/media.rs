//! Media (binary blob) domain types.

use catalog_core::{MediaId, Timestamp};

/// An uploaded file as handed to the store.
///
/// There is no size field: the stored `size_bytes` is always the length of
/// `bytes`, so a size reported by the uploader cannot disagree with the blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    /// Original file name.
    pub name: String,
    /// MIME type reported by the uploader (e.g., `image/png`).
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl NewMedia {
    /// Describe an upload.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Payload size in bytes, taken from `bytes`.
    #[must_use]
    pub fn size_bytes(&self) -> i64 {
        i64::try_from(self.bytes.len()).unwrap_or(i64::MAX)
    }
}

/// A stored media blob. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub id: MediaId,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub blob: Vec<u8>,
    pub created_at: Timestamp,
}
