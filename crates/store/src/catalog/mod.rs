//! The catalog store handle.
//!
//! [`CatalogStore`] owns everything the operations need: the database pool,
//! the session file, the media URL registry, and the injected clock and id
//! sources. Operations are split by concern across the submodules.

mod auth;
mod media;
mod products;
mod settings;

use std::fmt;
use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::instrument;

use crate::clock::{Clock, IdGenerator, RandomIds, SystemClock};
use crate::config::StoreConfig;
use crate::db::{self, schema};
use crate::error::{Result, StoreError};
use crate::media_url::MediaUrlRegistry;
use crate::models::BusinessInfo;
use crate::session::SessionStore;

/// An open catalog store.
///
/// Cheap to clone; clones share the pool, registry and session file.
#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
    session: SessionStore,
    media_urls: MediaUrlRegistry,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("session", &self.session)
            .field("media_urls", &self.media_urls)
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Open the store with the system clock and random ids.
    ///
    /// Idempotent: opening an existing database never re-creates tables or
    /// re-seeds data.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the database cannot be opened,
    /// or any error raised while creating the schema or seeding.
    pub async fn init(config: StoreConfig) -> Result<Self> {
        Self::open(config, Arc::new(SystemClock), Arc::new(RandomIds)).await
    }

    /// Open the store with explicit time and id sources.
    ///
    /// # Errors
    ///
    /// See [`CatalogStore::init`].
    #[instrument(skip_all, fields(database = %config.database_path.display()))]
    pub async fn open(
        config: StoreConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        let pool = db::create_pool(&config.database_path, config.busy_timeout)
            .await
            .map_err(StoreError::Unavailable)?;

        // A file that is not a database fails here.
        schema::schema_version(&pool)
            .await
            .map_err(StoreError::Unavailable)?;

        schema::ensure_schema(
            &pool,
            &config.owner_username,
            &config.owner_password,
            clock.now(),
        )
        .await?;

        let store = Self {
            pool,
            session: SessionStore::new(config.session_path),
            media_urls: MediaUrlRegistry::new(),
            clock,
            ids,
        };

        store.seed_business_info().await?;

        tracing::info!("Catalog store ready");
        Ok(store)
    }

    async fn seed_business_info(&self) -> Result<()> {
        if db::settings::get_setting(&self.pool, db::settings::BUSINESS_KEY)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let info = BusinessInfo::default();
        db::settings::set_setting(
            &self.pool,
            db::settings::BUSINESS_KEY,
            &serde_json::to_value(&info)?,
        )
        .await?;

        tracing::info!(name = %info.name, "Default business info seeded");
        Ok(())
    }

    /// Check that the database still answers queries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("Catalog store closed");
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The registry backing [`CatalogStore::media_url`].
    #[must_use]
    pub const fn media_urls(&self) -> &MediaUrlRegistry {
        &self.media_urls
    }

    fn now(&self) -> catalog_core::Timestamp {
        self.clock.now()
    }
}
