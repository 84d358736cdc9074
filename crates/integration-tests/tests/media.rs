//! Integration tests for media blobs, media URLs and the logo pointer.

#![allow(clippy::unwrap_used)]

use catalog_integration_tests::{TestContext, count_rows};
use catalog_store::NewMedia;

fn upload(name: &str, bytes: &[u8]) -> NewMedia {
    NewMedia::new(name, "image/png", bytes.to_vec())
}

#[tokio::test]
async fn test_saved_media_record_matches_upload() {
    let ctx = TestContext::new().await;

    let id = ctx
        .store
        .save_media(NewMedia::new("banner.webp", "image/webp", vec![1, 2, 3, 4, 5]))
        .await
        .unwrap();
    let record = ctx.store.media_record(id).await.unwrap().unwrap();

    assert_eq!(record.id, id);
    assert_eq!(record.name, "banner.webp");
    assert_eq!(record.mime_type, "image/webp");
    assert_eq!(record.size_bytes, 5);
    assert_eq!(record.blob, [1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_media_url_lifecycle() {
    let ctx = TestContext::new().await;
    let id = ctx.store.save_media(upload("a.png", b"abc")).await.unwrap();

    let handle = ctx.store.media_url(id).await.unwrap().unwrap();
    let url = handle.url().to_owned();
    assert_eq!(
        ctx.store.resolve_media_url(&url).as_deref(),
        Some(&b"abc"[..])
    );
    assert_eq!(ctx.store.media_urls().len(), 1);

    drop(handle);
    assert!(ctx.store.resolve_media_url(&url).is_none());
    assert!(ctx.store.media_urls().is_empty());
}

#[tokio::test]
async fn test_logo_is_none_before_first_set() {
    let ctx = TestContext::new().await;
    assert!(ctx.store.logo_url().await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_logo_then_logo_url() {
    let ctx = TestContext::new().await;

    let id = ctx.store.set_logo(upload("logo.png", b"LOGO")).await.unwrap();
    let handle = ctx.store.logo_url().await.unwrap().unwrap();

    assert_eq!(handle.media_id(), id);
    assert_eq!(handle.bytes(), b"LOGO");
    assert_eq!(handle.mime_type(), "image/png");
}

#[tokio::test]
async fn test_replacing_logo_keeps_previous_blob() {
    let ctx = TestContext::new().await;

    let first = ctx.store.set_logo(upload("v1.png", b"v1")).await.unwrap();
    let second = ctx.store.set_logo(upload("v2.png", b"v2")).await.unwrap();

    assert_eq!(count_rows(&ctx.store, "media").await, 2);
    assert!(ctx.store.media_record(first).await.unwrap().is_some());
    assert_eq!(
        ctx.store.logo_url().await.unwrap().unwrap().media_id(),
        second
    );
}

#[tokio::test]
async fn test_logo_survives_reopen() {
    let mut ctx = TestContext::new().await;
    let id = ctx.store.set_logo(upload("logo.png", b"LOGO")).await.unwrap();

    ctx.reopen().await;
    let handle = ctx.store.logo_url().await.unwrap().unwrap();
    assert_eq!(handle.media_id(), id);
}
