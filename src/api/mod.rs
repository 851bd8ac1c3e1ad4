//! API Module
//!
//! HTTP handlers and routing for the catalog server REST API.
//!
//! # Endpoints
//! - `GET /api/items` - Search and paginate items
//! - `POST /api/items` - Create an item
//! - `GET /api/items/:id` - Fetch one item
//! - `GET /api/stats` - Aggregate statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
