//! Product repository for database operations.

use chrono::{DateTime, Duration, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use catalog_core::{MediaId, Price, ProductId, Stock, Timestamp};

use crate::error::{Result, StoreError};
use crate::models::{Product, ProductFilter, ProductPatch};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    category: String,
    price: Price,
    stock: i64,
    image_media_id: Option<MediaId>,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self> {
        let stock = u32::try_from(row.stock).map_err(|_| {
            StoreError::DataCorruption(format!("invalid stock for product {}: {}", row.id, row.stock))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            stock: Stock::new(stock),
            image_media_id: row.image_media_id,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r"
    SELECT id, name, category, price, stock, image_media_id, description,
           created_at, updated_at
    FROM products
";

/// Pick the `updated_at` for a write: `now`, unless the clock has not moved
/// past the previous stamp, in which case one microsecond after it.
#[must_use]
pub fn next_updated_at(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a fully populated product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the insert fails (including an id
    /// that is already taken).
    pub async fn insert(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO products (id, name, category, price, stock, image_media_id,
                                  description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(i64::from(product.stock))
        .bind(product.image_media_id)
        .bind(&product.description)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        fetch(&mut *conn, id).await
    }

    /// Merge `patch` into an existing product inside one transaction.
    ///
    /// Returns `None` (and writes nothing) if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if a query fails; the transaction is
    /// rolled back.
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
        now: Timestamp,
    ) -> Result<Option<Product>> {
        let mut tx = self.pool.begin().await?;

        let Some(mut product) = fetch(&mut *tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        patch.apply_to(&mut product);
        product.updated_at = next_updated_at(product.updated_at, now);

        sqlx::query(
            r"
            UPDATE products
            SET name = ?2, category = ?3, price = ?4, stock = ?5,
                image_media_id = ?6, description = ?7, updated_at = ?8
            WHERE id = ?1
            ",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(i64::from(product.stock))
        .bind(product.image_media_id)
        .bind(&product.description)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(product))
    }

    /// Delete a product. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List products matching `filter`, newest first.
    ///
    /// Products created at the same instant are returned most recently
    /// inserted first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if a row is invalid.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let rows = list_query(filter)
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count all products.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Build the list query with one equality predicate per set filter field,
/// so SQLite can serve it from `idx_products_category` or `idx_products_name`.
fn list_query(filter: &ProductFilter) -> QueryBuilder<'_, Sqlite> {
    let mut builder = QueryBuilder::new(SELECT_COLUMNS);
    let mut keyword = " WHERE ";

    if let Some(category) = filter.category.as_deref() {
        builder.push(keyword).push("category = ").push_bind(category);
        keyword = " AND ";
    }
    if let Some(name) = filter.name.as_deref() {
        builder.push(keyword).push("name = ").push_bind(name);
    }

    builder.push(" ORDER BY created_at DESC, rowid DESC");
    builder
}

async fn fetch(conn: &mut SqliteConnection, id: ProductId) -> Result<Option<Product>> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    row.map(TryInto::try_into).transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration as StdDuration;

    use chrono::TimeZone;
    use secrecy::SecretString;
    use uuid::Uuid;

    use super::*;
    use crate::db::{create_pool, schema};
    use crate::models::NewProduct;

    async fn pool(dir: &tempfile::TempDir) -> SqlitePool {
        let pool = create_pool(&dir.path().join("catalog.db"), StdDuration::from_secs(5))
            .await
            .unwrap();
        schema::ensure_schema(&pool, "owner", &SecretString::from("pw"), Utc::now())
            .await
            .unwrap();
        pool
    }

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn product(n: u128, name: &str, category: &str, created: Timestamp) -> Product {
        NewProduct::named(name)
            .category(category)
            .into_product(ProductId::new(Uuid::from_u128(n)), created)
    }

    #[test]
    fn test_next_updated_at_is_strictly_increasing() {
        let t = at(1_000);
        assert_eq!(next_updated_at(t, at(1_001)), at(1_001));
        assert_eq!(next_updated_at(t, t), t + Duration::microseconds(1));
        assert_eq!(next_updated_at(t, at(999)), t + Duration::microseconds(1));
    }

    #[tokio::test]
    async fn test_insert_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let mut p = product(1, "Pencil", "Writing", at(10));
        p.price = "1.25".parse().unwrap();
        p.stock = Stock::new(40);
        p.image_media_id = Some(MediaId::new(Uuid::from_u128(77)));
        repo.insert(&p).await.unwrap();

        assert_eq!(repo.get(p.id).await.unwrap(), Some(p));
        assert_eq!(
            repo.get(ProductId::new(Uuid::from_u128(2))).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let p = product(1, "Pencil", "Writing", at(10));
        repo.insert(&p).await.unwrap();
        let err = repo.insert(&p).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_list_orders_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        repo.insert(&product(1, "Old", "Paper", at(10))).await.unwrap();
        repo.insert(&product(2, "New", "Paper", at(30))).await.unwrap();
        repo.insert(&product(3, "Mid", "Ink", at(20))).await.unwrap();
        // Same instant as "New": inserted later, so listed first.
        repo.insert(&product(4, "Tie", "Paper", at(30))).await.unwrap();

        let names: Vec<_> = repo
            .list(&ProductFilter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Tie", "New", "Mid", "Old"]);

        let paper = repo.list(&ProductFilter::in_category("Paper")).await.unwrap();
        assert_eq!(paper.len(), 3);
        assert!(paper.iter().all(|p| p.category == "Paper"));

        let named = repo
            .list(&ProductFilter::all().named("Mid"))
            .await
            .unwrap();
        assert_eq!(named.len(), 1);

        assert!(repo
            .list(&ProductFilter::in_category("Nothing"))
            .await
            .unwrap()
            .is_empty());
    }

    async fn query_plan(pool: &SqlitePool, filter: &ProductFilter) -> String {
        use sqlx::Row;

        let sql = format!("EXPLAIN QUERY PLAN {}", list_query(filter).sql());
        let mut query = sqlx::query(&sql);
        for value in [filter.category.as_deref(), filter.name.as_deref()]
            .into_iter()
            .flatten()
        {
            query = query.bind(value);
        }

        query
            .fetch_all(pool)
            .await
            .unwrap()
            .iter()
            .map(|row| row.get::<String, _>("detail"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_filtered_list_uses_indexes() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;

        let plan = query_plan(&pool, &ProductFilter::in_category("Paper")).await;
        assert!(plan.contains("idx_products_category"), "{plan}");

        let plan = query_plan(&pool, &ProductFilter::all().named("Mid")).await;
        assert!(plan.contains("idx_products_name"), "{plan}");

        let plan = query_plan(&pool, &ProductFilter::in_category("Paper").named("Mid")).await;
        assert!(
            plan.contains("idx_products_category") || plan.contains("idx_products_name"),
            "{plan}"
        );
    }

    #[tokio::test]
    async fn test_combined_filter_matches_both_fields() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        repo.insert(&product(1, "Pad", "Paper", at(10))).await.unwrap();
        repo.insert(&product(2, "Pad", "Ink", at(20))).await.unwrap();
        repo.insert(&product(3, "Ream", "Paper", at(30))).await.unwrap();

        let found = repo
            .list(&ProductFilter::in_category("Paper").named("Pad"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().id, ProductId::new(Uuid::from_u128(1)));
    }

    #[tokio::test]
    async fn test_update_missing_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let result = repo
            .update(
                ProductId::new(Uuid::from_u128(9)),
                ProductPatch::default().name("Ghost"),
                at(50),
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_bumps_updated_at_when_clock_stalls() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let p = product(1, "Pencil", "Writing", at(10));
        repo.insert(&p).await.unwrap();

        let updated = repo
            .update(p.id, ProductPatch::default().stock(Stock::new(3)), at(10))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.created_at, at(10));
        assert!(updated.updated_at > p.updated_at);
        assert_eq!(repo.get(p.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let p = product(1, "Pencil", "Writing", at(10));
        repo.insert(&p).await.unwrap();
        assert!(repo.delete(p.id).await.unwrap());
        assert!(!repo.delete(p.id).await.unwrap());
        assert_eq!(repo.get(p.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_negative_stock_row_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;

        // Simulate a foreign writer that ignored the CHECK constraint.
        sqlx::query("PRAGMA ignore_check_constraints = ON")
            .execute(&pool)
            .await
            .unwrap();
        let p = product(1, "Broken", "Writing", at(10));
        ProductRepository::new(&pool).insert(&p).await.unwrap();
        sqlx::query("UPDATE products SET stock = -1")
            .execute(&pool)
            .await
            .unwrap();

        let err = ProductRepository::new(&pool).get(p.id).await.unwrap_err();
        assert!(matches!(err, StoreError::DataCorruption(_)));
    }
}
