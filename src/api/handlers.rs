//! API Handlers
//!
//! HTTP request handlers for each catalog server endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::cache::CatalogStats;
use crate::catalog::{CatalogService, Item, JsonFileStore, Page, Store};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{CreateItemRequest, ErrorResponse, HealthResponse, ListQuery};

/// Application state shared across all handlers.
///
/// Holds the catalog service behind an Arc; the service does its own locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the JSON file store at `data_path` (creating an empty collection
    /// if the file is missing) with a stats cache using the configured TTL.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = JsonFileStore::new(&config.data_path);
        store.ensure_exists()?;
        let store: Arc<dyn Store> = Arc::new(store);
        Ok(Self::new(CatalogService::new(store, config.stats_ttl())))
    }
}

/// Runs a catalog call on the blocking thread pool.
///
/// Every catalog operation reads the data file, so it must stay off the async
/// workers. A panicked or cancelled worker surfaces as a storage failure.
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        CatalogError::StorageUnavailable(format!("Catalog worker failed: {}", e))
    })?
}

/// Handler for GET /api/items
///
/// Lists items matching `q`, paginated by `page` and `limit`.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page>> {
    let params = query.into_params();
    let page = run_blocking(move || state.catalog.list(&params)).await?;
    Ok(Json(page))
}

/// Handler for GET /api/items/:id
///
/// Returns one item. Ids that are not integers are reported as not found.
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let item = run_blocking(move || state.catalog.get_raw(&id)).await?;
    Ok(Json(item))
}

/// Handler for POST /api/items
///
/// Creates an item and returns it with its assigned id. A body that is not
/// valid JSON is treated like any other invalid payload.
pub async fn create_item_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let Json(req) = payload.map_err(|rejection| {
        debug!("Rejected create body: {}", rejection.body_text());
        CatalogError::InvalidPayload(
            "Invalid payload. Required: name, category, and positive price".to_string(),
        )
    })?;

    let item = run_blocking(move || state.catalog.create(&req)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/stats
///
/// Returns aggregate stats, from the cache when fresh.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<CatalogStats>> {
    let stats = run_blocking(move || state.catalog.stats()).await?;
    Ok(Json(stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route Not Found")),
    )
}
