//! Catalog Service - A small item catalog server
//!
//! Provides filtered, paginated item listings over a JSON file store and
//! aggregate statistics served from a TTL cache that is invalidated on writes.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_watch_task;
