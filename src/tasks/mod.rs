//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Data file watch: invalidates the stats cache when the items file changes on disk

mod watcher;

pub use watcher::spawn_watch_task;
