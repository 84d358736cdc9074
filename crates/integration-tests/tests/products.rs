//! Integration tests for product operations.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use catalog_core::{MediaId, Price, ProductId, Stock};
use catalog_integration_tests::{TestContext, count_rows};
use catalog_store::{NewProduct, ProductFilter, ProductPatch, StoreError};
use uuid::Uuid;

fn price(s: &str) -> Price {
    s.parse().unwrap()
}

// ============================================================================
// Add
// ============================================================================

#[tokio::test]
async fn test_add_then_list_contains_exactly_one_matching_record() {
    let ctx = TestContext::new().await;
    let image = MediaId::new(Uuid::from_u128(500));

    let added = ctx
        .store
        .add_product(
            NewProduct::named("Gel Pen")
                .category("Writing")
                .price(price("1.80"))
                .stock(Stock::new(120))
                .description("0.5mm, black")
                .image(image),
        )
        .await
        .unwrap();

    let all = ctx.store.list_products(&ProductFilter::all()).await.unwrap();
    let matches: Vec<_> = all.iter().filter(|p| p.id == added.id).collect();
    assert_eq!(matches.len(), 1);

    let stored = matches[0];
    assert_eq!(stored.name, "Gel Pen");
    assert_eq!(stored.category, "Writing");
    assert_eq!(stored.price, price("1.80"));
    assert_eq!(stored.stock, Stock::new(120));
    assert_eq!(stored.description, "0.5mm, black");
    assert_eq!(stored.image_media_id, Some(image));
    assert_eq!(stored.created_at, stored.updated_at);
    assert_eq!(stored, &added);
}

#[tokio::test]
async fn test_add_from_json_coerces_numeric_strings() {
    let ctx = TestContext::new().await;

    let input: NewProduct =
        serde_json::from_str(r#"{"name": "Sticky Notes", "price": "2.5", "stock": "30"}"#)
            .unwrap();
    let product = ctx.store.add_product(input).await.unwrap();

    assert_eq!(product.price, price("2.5"));
    assert_eq!(product.stock, Stock::new(30));
    assert_eq!(product.category, "Stationery");
}

#[test]
fn test_non_numeric_price_is_rejected() {
    let result: Result<NewProduct, _> =
        serde_json::from_str(r#"{"name": "Ruler", "price": "cheap"}"#);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_add_with_taken_id_fails_without_overwriting() {
    let ctx = TestContext::new().await;
    let id = ProductId::new(Uuid::from_u128(42));

    let first = NewProduct {
        id: Some(id),
        ..NewProduct::named("Original")
    };
    let second = NewProduct {
        id: Some(id),
        ..NewProduct::named("Impostor")
    };

    ctx.store.add_product(first).await.unwrap();
    let err = ctx.store.add_product(second).await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));

    let stored = ctx.store.get_product(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Original");
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_price_leaves_other_fields_intact() {
    let ctx = TestContext::new().await;
    let before = ctx
        .store
        .add_product(
            NewProduct::named("Sketchbook")
                .category("Art")
                .price(price("9.00"))
                .stock(Stock::new(4)),
        )
        .await
        .unwrap();

    ctx.tick(60);
    let after = ctx
        .store
        .update_product(before.id, ProductPatch::default().price(price("7.50")))
        .await
        .unwrap();

    assert_eq!(after.price, price("7.50"));
    assert_eq!(after.id, before.id);
    assert_eq!(after.name, before.name);
    assert_eq!(after.category, before.category);
    assert_eq!(after.stock, before.stock);
    assert_eq!(after.description, before.description);
    assert_eq!(after.image_media_id, before.image_media_id);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > after.created_at);

    let stored = ctx.store.get_product(before.id).await.unwrap().unwrap();
    assert_eq!(stored, after);
}

#[tokio::test]
async fn test_update_without_clock_movement_still_advances_updated_at() {
    let ctx = TestContext::new().await;
    let product = ctx
        .store
        .add_product(NewProduct::named("Eraser"))
        .await
        .unwrap();

    let once = ctx
        .store
        .update_product(product.id, ProductPatch::default().stock(Stock::new(1)))
        .await
        .unwrap();
    let twice = ctx
        .store
        .update_product(product.id, ProductPatch::default().stock(Stock::new(2)))
        .await
        .unwrap();

    assert!(once.updated_at > product.created_at);
    assert!(twice.updated_at > once.updated_at);
}

#[tokio::test]
async fn test_update_missing_is_not_found_and_writes_nothing() {
    let ctx = TestContext::new().await;
    let missing = ProductId::new(Uuid::from_u128(0xdead));

    let err = ctx
        .store
        .update_product(missing, ProductPatch::default().name("Ghost"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, StoreError::NotFound { entity: "product", ref id } if *id == missing.to_string())
    );
    assert_eq!(count_rows(&ctx.store, "products").await, 0);
}

#[test]
fn test_patch_cannot_carry_identity_fields() {
    let result: Result<ProductPatch, _> =
        serde_json::from_str(r#"{"price": 3, "id": "00000000-0000-0000-0000-000000000009"}"#);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_can_clear_image() {
    let ctx = TestContext::new().await;
    let product = ctx
        .store
        .add_product(NewProduct::named("Card Stock").image(MediaId::new(Uuid::from_u128(3))))
        .await
        .unwrap();

    let patch: ProductPatch = serde_json::from_str(r#"{"image_media_id": null}"#).unwrap();
    let updated = ctx.store.update_product(product.id, patch).await.unwrap();
    assert_eq!(updated.image_media_id, None);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_is_idempotent() {
    let ctx = TestContext::new().await;
    let keep = ctx.store.add_product(NewProduct::named("Keep")).await.unwrap();
    let gone = ctx.store.add_product(NewProduct::named("Gone")).await.unwrap();

    ctx.store.delete_product(gone.id).await.unwrap();
    let listed: Vec<_> = ctx
        .store
        .list_products(&ProductFilter::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, [keep.id]);

    ctx.store.delete_product(gone.id).await.unwrap();
    ctx.store
        .delete_product(ProductId::new(Uuid::from_u128(777)))
        .await
        .unwrap();
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_orders_newest_first_and_filters_by_category() {
    let ctx = TestContext::new().await;

    for (name, category) in [
        ("Kraft Envelope", "Paper"),
        ("Fineliner", "Writing"),
        ("A4 Ream", "Paper"),
        ("Highlighter", "Writing"),
        ("Tracing Pad", "Paper"),
    ] {
        ctx.store
            .add_product(NewProduct::named(name).category(category))
            .await
            .unwrap();
        ctx.tick(1);
    }

    let all = ctx.store.list_products(&ProductFilter::all()).await.unwrap();
    let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["Tracing Pad", "Highlighter", "A4 Ream", "Fineliner", "Kraft Envelope"]
    );
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let paper = ctx
        .store
        .list_products(&ProductFilter::in_category("Paper"))
        .await
        .unwrap();
    let names: Vec<_> = paper.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Tracing Pad", "A4 Ream", "Kraft Envelope"]);

    let none = ctx
        .store
        .list_products(&ProductFilter::in_category("paper"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_list_same_instant_returns_latest_insert_first() {
    let ctx = TestContext::new().await;

    let first = ctx.store.add_product(NewProduct::named("First")).await.unwrap();
    let second = ctx.store.add_product(NewProduct::named("Second")).await.unwrap();
    assert_eq!(first.created_at, second.created_at);

    let ids: Vec<_> = ctx
        .store
        .list_products(&ProductFilter::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, [second.id, first.id]);
}

#[tokio::test]
async fn test_update_does_not_change_list_position() {
    let ctx = TestContext::new().await;

    let old = ctx.store.add_product(NewProduct::named("Old")).await.unwrap();
    ctx.tick(10);
    let new = ctx.store.add_product(NewProduct::named("New")).await.unwrap();
    ctx.tick(10);
    ctx.store
        .update_product(old.id, ProductPatch::default().description("restocked"))
        .await
        .unwrap();

    let ids: Vec<_> = ctx
        .store
        .list_products(&ProductFilter::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, [new.id, old.id]);
}

#[tokio::test]
async fn test_list_by_name() {
    let ctx = TestContext::new().await;
    ctx.store
        .add_product(NewProduct::named("Washi Tape").category("Craft"))
        .await
        .unwrap();
    ctx.store
        .add_product(NewProduct::named("Glue Stick").category("Craft"))
        .await
        .unwrap();

    let found = ctx
        .store
        .list_products(&ProductFilter::in_category("Craft").named("Washi Tape"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Washi Tape");
}
