//! Media and logo commands.
//!
//! URLs printed by `media url` and `logo show` only live as long as the
//! process; they are useful to check that a blob is stored and readable.

use std::path::Path;

use serde_json::json;

use catalog_core::MediaId;
use catalog_store::{CatalogStore, MediaHandle, NewMedia};

use super::{CommandError, emit, parse_id};

const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME type for a file name, by extension.
fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => FALLBACK_MIME,
    }
}

async fn read_upload(path: &Path, mime: Option<&str>) -> Result<NewMedia, CommandError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mime = mime.unwrap_or_else(|| guess_mime(path));

    Ok(NewMedia::new(name, mime, bytes))
}

fn describe(handle: &MediaHandle) -> serde_json::Value {
    json!({
        "media_id": handle.media_id(),
        "url": handle.url(),
        "mime_type": handle.mime_type(),
        "size_bytes": handle.bytes().len(),
    })
}

/// Store a file and print its media ID.
pub async fn add(store: &CatalogStore, path: &Path, mime: Option<&str>) -> Result<(), CommandError> {
    let upload = read_upload(path, mime).await?;
    let id = store.save_media(upload).await?;
    tracing::info!(media_id = %id, path = %path.display(), "Media stored");
    emit(&json!({ "media_id": id }))
}

/// Mint and print a URL for a stored blob.
pub async fn url(store: &CatalogStore, id: &str) -> Result<(), CommandError> {
    let id: MediaId = parse_id(id)?;
    let handle = store
        .media_url(id)
        .await?
        .ok_or_else(|| catalog_store::StoreError::not_found("media", id))?;
    emit(&describe(&handle))
}

/// Upload a new logo.
pub async fn set_logo(
    store: &CatalogStore,
    path: &Path,
    mime: Option<&str>,
) -> Result<(), CommandError> {
    let upload = read_upload(path, mime).await?;
    let id = store.set_logo(upload).await?;
    emit(&json!({ "logo_media_id": id }))
}

/// Print the current logo, or `null` if none is set.
pub async fn show_logo(store: &CatalogStore) -> Result<(), CommandError> {
    match store.logo_url().await? {
        Some(handle) => emit(&describe(&handle)),
        None => emit(&serde_json::Value::Null),
    }
}
