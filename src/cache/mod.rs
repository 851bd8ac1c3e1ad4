//! Cache Module
//!
//! Aggregate statistics over the catalog and the TTL cache that serves them.

mod entry;
mod stats;
mod stats_cache;


// Re-export public types
pub use entry::{current_timestamp_ms, Clock, ManualClock, StatsEntry, SystemClock};
pub use stats::{round_cents, CatalogStats};
pub use stats_cache::{CacheState, StatsCache};
