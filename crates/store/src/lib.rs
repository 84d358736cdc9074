//! Catalog Store - local persistence for a small shop.
//!
//! Everything lives in one `SQLite` file (products, media blobs, settings and
//! the owner account) plus a small JSON file holding the owner session flag.
//!
//! # Usage
//!
//! ```no_run
//! use catalog_store::{CatalogStore, NewProduct, ProductFilter, StoreConfig};
//!
//! # async fn demo() -> catalog_store::Result<()> {
//! let store = CatalogStore::init(StoreConfig::new("./data")).await?;
//! store.add_product(NewProduct::named("Fountain Pen")).await?;
//! let products = store.list_products(&ProductFilter::all()).await?;
//! assert_eq!(products.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - The [`CatalogStore`] handle and its operations
//! - [`db`] - Pool setup, schema gate and repositories
//! - [`models`] - Products, media, business profile, user accounts
//! - [`session`] - Owner session flag file
//! - [`media_url`] - Revocable in-process media URLs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod media_url;
pub mod models;
pub mod session;

pub use catalog::CatalogStore;
pub use clock::{Clock, IdGenerator, ManualClock, RandomIds, SequentialIds, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use error::{Result, StoreError};
pub use media_url::{MediaHandle, MediaUrlRegistry};
pub use models::{
    BusinessInfo, Coords, MediaRecord, NewMedia, NewProduct, Product, ProductFilter, ProductPatch,
    UserAccount, coerce_price, coerce_stock,
};
