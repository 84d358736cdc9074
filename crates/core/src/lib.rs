//! Catalog Core - Shared types library.
//!
//! This crate provides common types used across all catalog components:
//! - `store` - Local `SQLite`-backed catalog store (products, media, settings, owner)
//! - `cli` - Command-line front end for the store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, stock levels, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
