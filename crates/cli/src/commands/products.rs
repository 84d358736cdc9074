//! Product commands.
//!
//! ```bash
//! catalog product add --name "A5 Notebook" --price 3.20 --stock 40
//! catalog product update <ID> --stock 35
//! catalog product list --category Paper
//! ```

use clap::Args;

use catalog_core::{MediaId, Price, ProductId, Stock};
use catalog_store::{
    CatalogStore, NewProduct, ProductFilter, ProductPatch, StoreError, coerce_price, coerce_stock,
};

use super::{CommandError, emit, parse_id};

/// Product fields accepted by `add` and `update`.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product name (required for `add`)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Category (defaults to "Stationery" on `add`)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Unit price, e.g. `4.50`
    #[arg(short, long)]
    pub price: Option<String>,

    /// Units in stock
    #[arg(short, long)]
    pub stock: Option<String>,

    /// Free-form description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Media ID of the product image
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for `add`.
#[derive(Debug, Args)]
pub struct ProductAddArgs {
    #[command(flatten)]
    pub fields: ProductArgs,

    /// Use this product ID instead of a generated one
    #[arg(long)]
    pub id: Option<String>,
}

/// Filters for `list`.
#[derive(Debug, Args)]
pub struct ProductListArgs {
    /// Only products in this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only products with exactly this name
    #[arg(short, long)]
    pub name: Option<String>,
}

fn parse_price(raw: Option<String>) -> Result<Option<Price>, CommandError> {
    Ok(raw.map(coerce_price).transpose()?)
}

fn parse_stock(raw: Option<String>) -> Result<Option<Stock>, CommandError> {
    Ok(raw.map(coerce_stock).transpose()?)
}

fn parse_image(raw: Option<&str>) -> Result<Option<MediaId>, CommandError> {
    raw.map(parse_id).transpose()
}

/// Add a product and print it.
pub async fn add(store: &CatalogStore, args: ProductAddArgs) -> Result<(), CommandError> {
    let ProductAddArgs { fields: args, id } = args;
    let Some(name) = args.name else {
        return Err(CommandError::MissingArgument("--name"));
    };

    let input = NewProduct {
        id: id.as_deref().map(parse_id).transpose()?,
        name,
        category: args.category,
        price: parse_price(args.price)?,
        stock: parse_stock(args.stock)?,
        image_media_id: parse_image(args.image.as_deref())?,
        description: args.description,
    };

    let product = store.add_product(input).await?;
    tracing::info!(id = %product.id, "Product added");
    emit(&product)
}

/// List products, newest first.
pub async fn list(store: &CatalogStore, args: ProductListArgs) -> Result<(), CommandError> {
    let filter = ProductFilter {
        category: args.category,
        name: args.name,
    };
    let products = store.list_products(&filter).await?;
    emit(&products)
}

/// Print one product.
pub async fn get(store: &CatalogStore, id: &str) -> Result<(), CommandError> {
    let id: ProductId = parse_id(id)?;
    let product = store
        .get_product(id)
        .await?
        .ok_or_else(|| StoreError::not_found("product", id))?;
    emit(&product)
}

/// Apply the given fields to a product and print the result.
pub async fn update(
    store: &CatalogStore,
    id: &str,
    args: ProductArgs,
    clear_image: bool,
) -> Result<(), CommandError> {
    let id: ProductId = parse_id(id)?;
    let image = if clear_image {
        Some(None)
    } else {
        parse_image(args.image.as_deref())?.map(Some)
    };

    let patch = ProductPatch {
        name: args.name,
        category: args.category,
        price: parse_price(args.price)?,
        stock: parse_stock(args.stock)?,
        image_media_id: image,
        description: args.description,
    };
    if patch.is_empty() {
        tracing::warn!("No fields given; only updated_at will change");
    }

    let product = store.update_product(id, patch).await?;
    tracing::info!(id = %product.id, "Product updated");
    emit(&product)
}

/// Delete a product.
pub async fn delete(store: &CatalogStore, id: &str) -> Result<(), CommandError> {
    let id: ProductId = parse_id(id)?;
    store.delete_product(id).await?;
    tracing::info!(%id, "Product deleted");
    emit(&serde_json::json!({ "deleted": id }))
}
