//! Catalog Module
//!
//! Items, their durable store, the query engine and the service that
//! composes them.

mod item;
pub mod query;
mod service;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use item::{Item, ItemDraft, ValidItem};
pub use query::{ListParams, Page, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use service::CatalogService;
pub use store::{JsonFileStore, MemoryStore, MutationObserver, Observers, Store};
