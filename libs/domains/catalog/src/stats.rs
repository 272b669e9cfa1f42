//! Stats cache - cached aggregate statistics with file-change invalidation

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::StatsSnapshot;
use crate::store::ItemStore;

/// Process-scoped cache of aggregate statistics over the item collection.
///
/// The cache starts empty and is populated by [`recompute`](Self::recompute).
/// The snapshot is replaced with a single `Arc` swap, so a concurrent
/// reader sees either the fully-old or fully-new snapshot, never a mix.
/// There is one mutator path (the file watcher plus the first `get`);
/// readers never mutate.
pub struct StatsCache<S: ItemStore> {
    store: Arc<S>,
    snapshot: RwLock<Option<Arc<StatsSnapshot>>>,
}

impl<S: ItemStore> StatsCache<S> {
    /// Create an empty cache over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(None),
        }
    }

    /// The cached snapshot, computing one synchronously if none exists yet.
    ///
    /// A recompute failure is only surfaced when no snapshot has ever been
    /// produced; otherwise the previous (possibly stale) snapshot is served.
    pub async fn get(&self) -> CatalogResult<Arc<StatsSnapshot>> {
        if let Some(snapshot) = self.current().await {
            return Ok(snapshot);
        }

        self.recompute()
            .await
            .map_err(|_| CatalogError::StatsUnavailable)
    }

    /// Recompute the snapshot from the full item collection.
    ///
    /// On failure the previous snapshot is left in place.
    #[instrument(skip(self))]
    pub async fn recompute(&self) -> CatalogResult<Arc<StatsSnapshot>> {
        let items = self.store.load().await?;
        // Recorded after the read, like the original computation order;
        // a write landing between the two shows up as a later mtime and
        // triggers another recompute.
        let modified = self.store.modified().await.ok();

        let snapshot = Arc::new(StatsSnapshot::compute(&items, modified));
        *self.snapshot.write().await = Some(Arc::clone(&snapshot));

        tracing::debug!(
            total = snapshot.total,
            average_price = snapshot.average_price,
            "Stats snapshot recomputed"
        );
        Ok(snapshot)
    }

    /// Recompute only if the backing file changed since the last snapshot.
    ///
    /// Returns whether a recompute ran. Multiple rapid file changes may
    /// coalesce into one recompute.
    #[instrument(skip(self))]
    pub async fn refresh_if_modified(&self) -> CatalogResult<bool> {
        let Some(snapshot) = self.current().await else {
            self.recompute().await?;
            return Ok(true);
        };

        let modified = self.store.modified().await?;
        if snapshot.modified == Some(modified) {
            return Ok(false);
        }

        self.recompute().await?;
        Ok(true)
    }

    async fn current(&self) -> Option<Arc<StatsSnapshot>> {
        self.snapshot.read().await.clone()
    }
}
