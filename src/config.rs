//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON file holding the item collection
    pub data_path: PathBuf,
    /// Stats cache TTL in seconds
    pub stats_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Data file watch interval in milliseconds
    pub watch_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_PATH` - Item collection file (default: data/items.json)
    /// - `STATS_TTL` - Stats cache TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `WATCH_INTERVAL` - Data file poll frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: env::var("DATA_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            stats_ttl: env::var("STATS_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.stats_ttl),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            watch_interval: env::var("WATCH_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.watch_interval),
        }
    }

    /// Stats cache TTL as a Duration.
    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_ttl)
    }

    /// Watch interval as a Duration.
    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/items.json"),
            stats_ttl: 300,
            server_port: 3001,
            watch_interval: 1000,
        }
    }
}
