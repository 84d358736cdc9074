//! Injected time and id sources.
//!
//! The store never calls `Utc::now()` or `Uuid::new_v4()` directly; it asks a
//! [`Clock`] and an [`IdGenerator`] so callers and tests control both.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use catalog_core::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> Timestamp;
}

/// Source of fresh unique identifiers.
pub trait IdGenerator: Send + Sync {
    /// A new identifier, distinct from every previously returned one.
    fn new_id(&self) -> Uuid;
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Random (v4) UUID generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Clock that only moves when told to.
///
/// Useful for deterministic ordering of `created_at` in tests and scripted
/// imports.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Start the clock at `start`.
    #[must_use]
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Start the clock at a Unix timestamp in seconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    #[must_use]
    pub fn at_unix(secs: i64) -> Self {
        let start = Utc.timestamp_opt(secs, 0).single().unwrap_or_default();
        Self::new(start)
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    /// Set the clock to an exact time.
    pub fn set(&self, to: Timestamp) {
        *self.now.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

/// Generator of predictable UUIDs (`00000000-0000-0000-0000-000000000001`, ...).
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn new_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::at_unix(1_700_000_000);
        let before = clock.now();
        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now() - before, Duration::seconds(5));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::at_unix(0);
        let target = Utc.timestamp_opt(42, 0).single().unwrap_or_default();
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn test_sequential_ids_are_distinct() {
        let ids = SequentialIds::default();
        let a = ids.new_id();
        let b = ids.new_id();
        assert_ne!(a, b);
        assert_eq!(a, Uuid::from_u128(1));
        assert_eq!(b, Uuid::from_u128(2));
    }

    #[test]
    fn test_random_ids_are_distinct() {
        assert_ne!(RandomIds.new_id(), RandomIds.new_id());
    }
}
