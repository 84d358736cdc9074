//! Product domain types.

use serde::{Deserialize, Deserializer, Serialize};

use catalog_core::{MediaId, NumericValue, Price, ProductId, Stock, Timestamp};

use crate::error::Result;

/// Category assigned when a product is created without one.
pub const DEFAULT_CATEGORY: &str = "Stationery";

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID. Never changes once assigned.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category used for filtering.
    pub category: String,
    /// Unit price.
    pub price: Price,
    /// Units on hand.
    pub stock: Stock,
    /// Product image, if any. Not checked against the media collection.
    pub image_media_id: Option<MediaId>,
    /// Free-form description.
    pub description: String,
    /// When the product was added.
    pub created_at: Timestamp,
    /// When the product was last written.
    pub updated_at: Timestamp,
}

/// Input for creating a product.
///
/// Every field except `name` may be omitted and is filled with a default.
/// `price` and `stock` accept JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Caller-chosen ID; a fresh one is generated when absent.
    pub id: Option<ProductId>,
    pub name: String,
    pub category: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    pub image_media_id: Option<MediaId>,
    pub description: Option<String>,
}

impl NewProduct {
    /// Start a product with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn stock(mut self, stock: Stock) -> Self {
        self.stock = Some(stock);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn image(mut self, media_id: MediaId) -> Self {
        self.image_media_id = Some(media_id);
        self
    }

    /// Fill defaults and stamp both timestamps with `now`.
    #[must_use]
    pub fn into_product(self, id: ProductId, now: Timestamp) -> Product {
        Product {
            id,
            name: self.name,
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
            price: self.price.unwrap_or_default(),
            stock: self.stock.unwrap_or_default(),
            image_media_id: self.image_media_id,
            description: self.description.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for an existing product.
///
/// Only the editable fields exist here, so neither `id` nor `created_at` can
/// be overwritten. JSON patches naming any other field are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    /// `Some(None)` clears the image; `None` leaves it untouched.
    #[serde(deserialize_with = "double_option")]
    pub image_media_id: Option<Option<MediaId>>,
    pub description: Option<String>,
}

impl ProductPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn stock(mut self, stock: Stock) -> Self {
        self.stock = Some(stock);
        self
    }

    #[must_use]
    pub fn image(mut self, media_id: Option<MediaId>) -> Self {
        self.image_media_id = Some(media_id);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the patch changes no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image_media_id.is_none()
            && self.description.is_none()
    }

    /// Overwrite the fields present in the patch. Does not touch timestamps.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image) = self.image_media_id {
            product.image_media_id = image;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
    }
}

/// Restriction applied by `list_products`. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact name match.
    pub name: Option<String>,
}

impl ProductFilter {
    /// Match every product.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match products in exactly this category.
    #[must_use]
    pub fn in_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Additionally require an exact name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Coerce raw price input (a number or the text typed into a form).
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` for non-numeric or negative input.
pub fn coerce_price(raw: impl Into<NumericValue>) -> Result<Price> {
    Ok(Price::try_from(raw.into())?)
}

/// Coerce raw stock input (a number or the text typed into a form).
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` for non-numeric, negative or fractional
/// input.
pub fn coerce_stock(raw: impl Into<NumericValue>) -> Result<Stock> {
    Ok(Stock::try_from(raw.into())?)
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
