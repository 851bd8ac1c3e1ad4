//! Stats Cache Module
//!
//! Holds the most recent [`CatalogStats`] for a bounded time and drops it
//! early whenever the underlying store reports a mutation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CatalogStats, Clock, StatsEntry, SystemClock};
use crate::catalog::{MutationObserver, Store};
use crate::error::Result;

// == Cache State ==
/// Observable state of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No valid entry; the next `get` recomputes
    Cold,
    /// A valid entry is present
    Warm,
}

// == Stats Cache ==
/// TTL cache over the stats of a [`Store`].
///
/// The check/compute/write-back sequence runs under one mutex, so at most one
/// computation is in flight. Invalidation only bumps an atomic generation and
/// never waits on that mutex; an entry computed under an older generation is
/// treated as absent.
pub struct StatsCache {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entry: Mutex<Option<StatsEntry>>,
    generation: Arc<AtomicU64>,
}

impl StatsCache {
    // == Constructor ==
    /// Creates a cold cache. Does not subscribe to the store; see [`Self::watching`].
    pub fn new(store: Arc<dyn Store>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl,
            entry: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a cold cache using the wall clock and registers its
    /// invalidator on `store`.
    pub fn watching(store: Arc<dyn Store>, ttl: Duration) -> Self {
        Self::watching_with_clock(store, ttl, Arc::new(SystemClock))
    }

    pub fn watching_with_clock(store: Arc<dyn Store>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let cache = Self::new(store.clone(), ttl, clock);
        store.subscribe(cache.invalidator());
        cache
    }

    // == Get ==
    /// Returns the cached stats if fresh, otherwise recomputes from the store.
    ///
    /// Fails only when a recompute is needed and the store cannot be read.
    pub fn get(&self) -> Result<CatalogStats> {
        let mut slot = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        let now = self.clock.now_ms();
        let generation = self.generation.load(Ordering::SeqCst);

        if let Some(entry) = slot.as_ref() {
            if entry.is_fresh(now, self.ttl, generation) {
                debug!("Serving stats from cache (age {}ms)", entry.age_ms(now));
                return Ok(entry.value.clone());
            }
        }

        info!("Calculating fresh stats");
        let items = self.store.read_all()?;
        let stats = CatalogStats::compute(&items);
        *slot = Some(StatsEntry::new(stats.clone(), now, generation));

        Ok(stats)
    }

    // == Invalidate ==
    /// Forces the next `get` to recompute. Never blocks.
    pub fn invalidate(&self) {
        bump(&self.generation);
    }

    /// Observer to register on a store so its mutations invalidate this cache.
    pub fn invalidator(&self) -> MutationObserver {
        let generation = self.generation.clone();
        Arc::new(move || bump(&generation))
    }

    // == State ==
    /// Current state as seen at the cache's clock time.
    ///
    /// Blocks while a computation holds the entry.
    pub fn state(&self) -> CacheState {
        let slot = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        let generation = self.generation.load(Ordering::SeqCst);
        match slot.as_ref() {
            Some(entry) if entry.is_fresh(self.clock.now_ms(), self.ttl, generation) => {
                CacheState::Warm
            }
            _ => CacheState::Cold,
        }
    }
}

fn bump(generation: &AtomicU64) {
    generation.fetch_add(1, Ordering::SeqCst);
    info!("Item store changed, invalidating stats cache");
}

impl fmt::Debug for StatsCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsCache")
            .field("store", &self.store)
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}
