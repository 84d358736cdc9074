//! Core types for the catalog store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod numeric;
pub mod price;
pub mod role;
pub mod stock;

pub use id::*;
pub use numeric::{NumericError, NumericValue};
pub use price::Price;
pub use role::Role;
pub use stock::Stock;

/// Point in time used for every stored `created_at` / `updated_at` field.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
