//! Product operations.

use tracing::instrument;

use catalog_core::ProductId;

use super::CatalogStore;
use crate::db::ProductRepository;
use crate::error::{Result, StoreError};
use crate::models::{NewProduct, Product, ProductFilter, ProductPatch};

impl CatalogStore {
    /// Add a product, filling defaults for omitted fields.
    ///
    /// A fresh ID is assigned unless `input.id` is set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the insert fails (e.g., the supplied
    /// ID is already taken).
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_product(&self, input: NewProduct) -> Result<Product> {
        let id = input
            .id
            .unwrap_or_else(|| ProductId::new(self.ids.new_id()));
        let product = input.into_product(id, self.now());

        ProductRepository::new(&self.pool).insert(&product).await?;

        tracing::debug!(product_id = %product.id, category = %product.category, "Product added");
        Ok(product)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        ProductRepository::new(&self.pool).get(id).await
    }

    /// Merge `patch` into a product and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the product does not exist; nothing
    /// is written in that case.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let product = ProductRepository::new(&self.pool)
            .update(id, patch, self.now())
            .await?
            .ok_or_else(|| StoreError::not_found("product", id))?;

        tracing::debug!(updated_at = %product.updated_at, "Product updated");
        Ok(product)
    }

    /// Delete a product. Deleting a missing product succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        let removed = ProductRepository::new(&self.pool).delete(id).await?;
        tracing::debug!(removed, "Product delete");
        Ok(())
    }

    /// List products matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        ProductRepository::new(&self.pool).list(filter).await
    }
}
