//! Item store - JSON file persistence

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Item;

/// Store trait for Item persistence
///
/// This trait defines the data access interface for the item collection.
/// There is deliberately no caching at this layer: every `load` re-reads
/// from disk.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Read the entire item collection from persistent storage
    async fn load(&self) -> CatalogResult<Vec<Item>>;

    /// Overwrite persistent storage with the given full collection
    async fn save(&self, items: &[Item]) -> CatalogResult<()>;

    /// The backing file's last-modified timestamp
    async fn modified(&self) -> CatalogResult<SystemTime>;
}

/// JSON file implementation of the ItemStore.
///
/// The file holds a single top-level array of items, pretty-printed so the
/// on-disk format stays stable and diffable. Writes are whole-file
/// overwrites with no atomicity beyond the underlying write call.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given file path.
    ///
    /// # Example
    /// ```ignore
    /// let store = JsonFileStore::new("data/items.json");
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> CatalogResult<Vec<Item>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::StorageRead(e.to_string()))?;

        let items: Vec<Item> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::StorageRead(e.to_string()))?;

        Ok(items)
    }

    #[instrument(skip(self, items), fields(path = %self.path.display(), count = items.len()))]
    async fn save(&self, items: &[Item]) -> CatalogResult<()> {
        let raw = serde_json::to_string_pretty(items)
            .map_err(|e| CatalogError::StorageWrite(e.to_string()))?;

        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| CatalogError::StorageWrite(e.to_string()))?;

        tracing::info!("Item store saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn modified(&self) -> CatalogResult<SystemTime> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| CatalogError::StorageRead(e.to_string()))?;

        metadata
            .modified()
            .map_err(|e| CatalogError::StorageRead(e.to_string()))
    }
}
