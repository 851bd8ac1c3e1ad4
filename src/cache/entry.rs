//! Cache Entry Module
//!
//! The cached stats value with its computation metadata, plus the clock
//! abstraction used to age it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::cache::CatalogStats;

// == Clock ==
/// Time source for cache expiry. Tests inject a [`ManualClock`].
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time in Unix milliseconds.
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        current_timestamp_ms()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// == Stats Entry ==
/// A computed stats value.
#[derive(Debug, Clone)]
pub struct StatsEntry {
    pub value: CatalogStats,
    /// Computation timestamp (Unix milliseconds)
    pub computed_at: u64,
    /// Invalidation generation observed when the computation started
    pub generation: u64,
}

impl StatsEntry {
    pub fn new(value: CatalogStats, computed_at: u64, generation: u64) -> Self {
        Self {
            value,
            computed_at,
            generation,
        }
    }

    // == Is Expired ==
    /// True once `ttl` has fully elapsed since computation.
    ///
    /// Boundary: an age exactly equal to the TTL is expired. A clock that went
    /// backwards counts as zero age.
    pub fn is_expired(&self, now_ms: u64, ttl: Duration) -> bool {
        self.age_ms(now_ms) >= ttl.as_millis() as u64
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.computed_at)
    }

    /// True when the entry is within TTL and no invalidation happened since.
    pub fn is_fresh(&self, now_ms: u64, ttl: Duration, generation: u64) -> bool {
        self.generation == generation && !self.is_expired(now_ms, ttl)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
