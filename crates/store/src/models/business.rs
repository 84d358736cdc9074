//! Business profile stored under the `business` setting.

use serde::{Deserialize, Serialize};

/// Geographic position of the shop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

/// Public details about the shop.
///
/// Written wholesale; there is no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    /// Shop name shown to customers.
    pub name: String,
    /// Name of the person running the shop.
    pub owner: String,
    /// Street address.
    pub address: String,
    /// Map position.
    pub coords: Coords,
}

impl Default for BusinessInfo {
    /// The profile seeded into a fresh store.
    fn default() -> Self {
        Self {
            name: "My Stationery Shop".to_owned(),
            owner: "Shop Owner".to_owned(),
            address: String::new(),
            coords: Coords::default(),
        }
    }
}
