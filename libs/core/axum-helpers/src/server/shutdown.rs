//! Shutdown coordination.
//!
//! The catalog server shuts down in two phases: stop accepting
//! connections and drain in-flight requests, then run cleanup for
//! background tasks (the item store watcher) within a bounded window.
//! `ShutdownCoordinator` ties both phases to one SIGINT/SIGTERM signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Coordinates graceful shutdown across the server and background tasks.
///
/// Cloned handles share one broadcast channel; the first `shutdown()`
/// call wins and every subscriber is notified exactly once.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new coordinator and a first shutdown receiver.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        let coordinator = Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    /// Subscribe to shutdown notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Whether shutdown has been initiated.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Relaxed)
    }

    /// Initiate shutdown and notify all subscribers. Idempotent.
    pub fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Block until SIGINT or SIGTERM arrives, then initiate shutdown.
    pub async fn wait_for_signal(&self) {
        let signal_name = sigint_or_sigterm().await;
        info!("Received {signal_name}, initiating graceful shutdown");
        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new().0
    }
}

/// Resolves when SIGINT (Ctrl+C) or SIGTERM arrives, naming the signal.
async fn sigint_or_sigterm() -> &'static str {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT (Ctrl+C)",
        _ = terminate => "SIGTERM",
    }
}

/// Plain shutdown signal for `axum::serve().with_graceful_shutdown()`.
///
/// **WARNING**: this only drains the server; background tasks get no
/// cleanup window. `create_production_app` uses `ShutdownCoordinator`
/// to also stop the store watcher.
pub async fn shutdown_signal() {
    let signal_name = sigint_or_sigterm().await;
    info!("Received {signal_name}, shutting down gracefully");
}

/// Shutdown future handed to axum by `create_production_app`.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}
