//! Integration tests for the catalog store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-integration-tests
//! ```
//!
//! Each test opens a real store in its own temporary directory. The clock is
//! a [`ManualClock`] so `created_at` ordering is deterministic, and ids come
//! from [`SequentialIds`].
//!
//! # Test Categories
//!
//! - `lifecycle` - init, seeding, reopen, unavailable engine
//! - `products` - add, update, delete, list ordering and filters
//! - `media` - blobs, media URLs, logo pointer
//! - `settings` - business profile
//! - `session` - owner login state machine

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Duration;
use tempfile::TempDir;

use catalog_store::{CatalogStore, Clock, IdGenerator, ManualClock, SequentialIds, StoreConfig};

/// Unix time the test clock starts at (2023-11-14T22:13:20Z).
pub const START_UNIX: i64 = 1_700_000_000;

/// A store rooted in a temporary directory.
pub struct TestContext {
    pub dir: TempDir,
    pub clock: Arc<ManualClock>,
    pub ids: Arc<SequentialIds>,
    pub store: CatalogStore,
}

impl TestContext {
    /// Open a fresh store.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::at_unix(START_UNIX));
        let ids = Arc::new(SequentialIds::default());
        let store = open(&dir, &clock, &ids).await;

        Self {
            dir,
            clock,
            ids,
            store,
        }
    }

    /// Configuration pointing at this context's directory.
    #[must_use]
    pub fn config(&self) -> StoreConfig {
        StoreConfig::new(self.dir.path())
    }

    /// Close the store and open it again on the same files, as a new process
    /// would. Clock and id sequence carry over.
    pub async fn reopen(&mut self) {
        self.store.close().await;
        self.store = open(&self.dir, &self.clock, &self.ids).await;
    }

    /// Advance the clock by whole seconds.
    pub fn tick(&self, secs: i64) {
        self.clock.advance(Duration::seconds(secs));
    }
}

async fn open(dir: &TempDir, clock: &Arc<ManualClock>, ids: &Arc<SequentialIds>) -> CatalogStore {
    let clock: Arc<dyn Clock> = Arc::<ManualClock>::clone(clock);
    let ids: Arc<dyn IdGenerator> = Arc::<SequentialIds>::clone(ids);

    CatalogStore::open(StoreConfig::new(dir.path()), clock, ids)
        .await
        .unwrap()
}

/// Count rows in a table.
pub async fn count_rows(store: &CatalogStore, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(store.pool())
        .await
        .unwrap()
}
