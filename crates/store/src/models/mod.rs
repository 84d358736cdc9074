//! Domain models for the catalog store.

pub mod business;
pub mod media;
pub mod product;
pub mod user;

pub use business::{BusinessInfo, Coords};
pub use media::{MediaRecord, NewMedia};
pub use product::{
    NewProduct, Product, ProductFilter, ProductPatch, coerce_price, coerce_stock,
};
pub use user::UserAccount;
