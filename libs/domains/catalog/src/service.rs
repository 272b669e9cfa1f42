//! Catalog Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateItem, Item, ItemPage, ItemQuery, StatsSnapshot};
use crate::query;
use crate::stats::StatsCache;
use crate::store::ItemStore;

/// Catalog service providing business logic operations
///
/// The service layer handles validation, the write-boundary invariants
/// (non-empty unique name, defined price) and orchestrates store, query
/// engine and stats cache.
pub struct CatalogService<S: ItemStore> {
    store: Arc<S>,
    stats: Arc<StatsCache<S>>,
}

impl<S: ItemStore> CatalogService<S> {
    /// Create a new CatalogService over the given store.
    pub fn new(store: Arc<S>) -> Self {
        let stats = Arc::new(StatsCache::new(Arc::clone(&store)));
        Self { store, stats }
    }

    /// The stats cache, for wiring up the file watcher.
    pub fn stats_cache(&self) -> Arc<StatsCache<S>> {
        Arc::clone(&self.stats)
    }

    /// List items matching the query, one page at a time
    #[instrument(skip(self))]
    pub async fn list_items(&self, params: ItemQuery) -> CatalogResult<ItemPage> {
        let items = self.store.load().await?;
        Ok(query::query(&items, &params))
    }

    /// Get an item by id
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> CatalogResult<Item> {
        let items = self.store.load().await?;
        query::find_by_id(&items, id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Create a new item and persist the full collection
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> CatalogResult<Item> {
        // Validate input before touching storage
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut items = self.store.load().await?;

        if items.iter().any(|i| i.name == input.name) {
            return Err(CatalogError::Validation(format!(
                "Item with name '{}' already exists",
                input.name
            )));
        }

        let item = Item::new(input);
        items.push(item.clone());
        self.store.save(&items).await?;

        tracing::info!(item_id = item.id, "Item created successfully");
        Ok(item)
    }

    /// Aggregate statistics over the full collection
    #[instrument(skip(self))]
    pub async fn stats(&self) -> CatalogResult<Arc<StatsSnapshot>> {
        self.stats.get().await
    }
}

impl<S: ItemStore> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            stats: Arc::clone(&self.stats),
        }
    }
}
