//! Settings database operations.
//!
//! Values are JSON documents stored as text; the last write to a key wins.

use serde_json::Value as JsonValue;
use sqlx::SqlitePool;

use crate::error::Result;

/// Setting key holding the [`BusinessInfo`](crate::models::BusinessInfo) document.
pub const BUSINESS_KEY: &str = "business";

/// Setting key holding the current logo's media ID as a JSON string.
pub const LOGO_MEDIA_ID_KEY: &str = "logoMediaId";

/// Get a setting value.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::Serialization` if the stored text is not JSON.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<JsonValue>> {
    let text: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(text.as_deref().map(serde_json::from_str::<JsonValue>).transpose()?)
}

/// Set a setting value, replacing any previous value.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &JsonValue) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO settings (key, value)
        VALUES (?1, ?2)
        ON CONFLICT (key) DO UPDATE SET value = excluded.value
        ",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use secrecy::SecretString;
    use serde_json::json;

    use super::*;
    use crate::db::{create_pool, schema};
    use crate::error::StoreError;

    async fn pool(dir: &tempfile::TempDir) -> SqlitePool {
        let pool = create_pool(&dir.path().join("catalog.db"), Duration::from_secs(5))
            .await
            .unwrap();
        schema::ensure_schema(&pool, "owner", &SecretString::from("pw"), Utc::now())
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        assert_eq!(get_setting(&pool, "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;

        set_setting(&pool, LOGO_MEDIA_ID_KEY, &json!("a")).await.unwrap();
        set_setting(&pool, LOGO_MEDIA_ID_KEY, &json!("b")).await.unwrap();
        assert_eq!(
            get_setting(&pool, LOGO_MEDIA_ID_KEY).await.unwrap(),
            Some(json!("b"))
        );

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_nested_document_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;

        let doc = json!({"name": "Shop", "coords": {"lat": 1.5, "lng": -2.0}});
        set_setting(&pool, BUSINESS_KEY, &doc).await.unwrap();
        assert_eq!(get_setting(&pool, BUSINESS_KEY).await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_non_json_value_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;

        sqlx::query("INSERT INTO settings (key, value) VALUES ('broken', 'not json')")
            .execute(&pool)
            .await
            .unwrap();
        let err = get_setting(&pool, "broken").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
