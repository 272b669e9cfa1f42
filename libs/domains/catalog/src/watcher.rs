//! File watcher for item store changes
//!
//! Watches the backing JSON file and refreshes the stats cache when its
//! modification time advances.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace};

use crate::stats::StatsCache;
use crate::store::ItemStore;

/// Background watcher over the item store's backing file.
///
/// Filesystem events are funneled into a tokio task which asks the stats
/// cache to refresh when the data file was created or modified. The cache
/// compares mtimes itself, so bursts of events coalesce into at most one
/// recompute per actual change. The watcher lives for the process lifetime;
/// [`stop`](Self::stop) exists for shutdown and tests.
pub struct StoreWatcher {
    /// Notify watcher instance
    _watcher: RecommendedWatcher,

    /// Shutdown signal
    shutdown_tx: mpsc::Sender<()>,
}

impl StoreWatcher {
    /// Start watching the data file's parent directory.
    ///
    /// The parent is watched rather than the file itself so replace-style
    /// writes (write temp + rename) keep producing events.
    pub fn start<S: ItemStore + 'static>(
        data_path: PathBuf,
        cache: Arc<StatsCache<S>>,
        poll_interval: Duration,
    ) -> Result<Self, notify::Error> {
        let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(100);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Create watcher; the poll interval only applies to the fallback
        // polling backend
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = event_tx.blocking_send(res);
            },
            Config::default().with_poll_interval(poll_interval),
        )?;

        let watch_root = data_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        info!(data_path = %data_path.display(), "Item store watcher started");

        // Spawn event processor
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Some(result) = event_rx.recv() => {
                        match result {
                            Ok(event) => {
                                if !is_data_file_event(&event, &data_path) {
                                    continue;
                                }
                                trace!(?event, "Data file event");
                                match cache.refresh_if_modified().await {
                                    Ok(true) => debug!("Stats refreshed after file change"),
                                    Ok(false) => trace!("File event without mtime change, skipping"),
                                    Err(e) => {
                                        // Previous snapshot stays available
                                        error!(error = %e, "Stats refresh failed");
                                    }
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "File watcher error");
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!("Item store watcher shutting down");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            shutdown_tx,
        })
    }

    /// Stop the watcher task.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Whether a notify event is a create/modify touching the data file.
fn is_data_file_event(event: &Event, data_path: &Path) -> bool {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => {}
        _ => return false,
    }

    let file_name = data_path.file_name();
    event
        .paths
        .iter()
        .any(|p| p == data_path || (file_name.is_some() && p.file_name() == file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use crate::store::JsonFileStore;
    use notify::event::{CreateKind, DataChange, ModifyKind};
    use tempfile::TempDir;

    fn modify_event(path: &str) -> Event {
        Event {
            kind: EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            paths: vec![PathBuf::from(path)],
            ..Default::default()
        }
    }

    #[test]
    fn test_modify_event_for_data_file_matches() {
        let data_path = Path::new("/srv/catalog/items.json");
        assert!(is_data_file_event(
            &modify_event("/srv/catalog/items.json"),
            data_path
        ));
    }

    #[test]
    fn test_create_event_for_data_file_matches() {
        let data_path = Path::new("/srv/catalog/items.json");
        let event = Event {
            kind: EventKind::Create(CreateKind::File),
            paths: vec![PathBuf::from("/srv/catalog/items.json")],
            ..Default::default()
        };
        assert!(is_data_file_event(&event, data_path));
    }

    #[test]
    fn test_event_for_other_file_is_ignored() {
        let data_path = Path::new("/srv/catalog/items.json");
        assert!(!is_data_file_event(
            &modify_event("/srv/catalog/other.json"),
            data_path
        ));
    }

    #[test]
    fn test_remove_event_is_ignored() {
        let data_path = Path::new("/srv/catalog/items.json");
        let event = Event {
            kind: EventKind::Remove(notify::event::RemoveKind::File),
            paths: vec![PathBuf::from("/srv/catalog/items.json")],
            ..Default::default()
        };
        assert!(!is_data_file_event(&event, data_path));
    }

    #[tokio::test]
    async fn test_watcher_start_and_stop() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("items.json");
        let store = Arc::new(JsonFileStore::new(&data_path));
        store.save(&[] as &[Item]).await.unwrap();

        let cache = Arc::new(StatsCache::new(Arc::clone(&store)));
        let watcher = StoreWatcher::start(
            data_path,
            Arc::clone(&cache),
            Duration::from_millis(100),
        )
        .unwrap();

        watcher.stop().await;
    }
}
