//! Catalog Domain
//!
//! This module provides a complete domain implementation for browsing a
//! catalog of items backed by a single JSON file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼───┐ ┌─▼──────────┐
//! │Query │ │ StatsCache │  ← In-memory filtering / cached aggregates
//! └──┬───┘ └─┬──────────┘
//!    │       │     ▲
//! ┌──▼───────▼──┐  │ refresh on file change
//! │  ItemStore  │  │
//! └─────────────┘ ┌┴─────────────┐
//!                 │ StoreWatcher │
//!                 └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, service::CatalogService, store::JsonFileStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a file-backed store and service
//! let store = Arc::new(JsonFileStore::new("data/items.json"));
//! let service = CatalogService::new(store);
//!
//! // Create Axum routers
//! let items = handlers::router(service.clone());
//! let stats = handlers::stats_router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod service;
pub mod stats;
pub mod store;
pub mod watcher;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::{ApiDoc, StatsApiDoc};
pub use models::{CreateItem, Item, ItemPage, ItemQuery, StatsSnapshot};
pub use service::CatalogService;
pub use stats::StatsCache;
pub use store::{ItemStore, JsonFileStore};
pub use watcher::StoreWatcher;
