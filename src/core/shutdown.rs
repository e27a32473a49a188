//! Shutdown Coordination
//!
//! Turns process signals into a broadcast that long-running commands (the
//! check-in session) select on to tear down cleanly.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Coordinates graceful shutdown across the application
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        let coordinator = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, shutdown_rx)
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown
    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    /// Check if shutdown has been requested
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Run `future_fn` with signal handlers installed, handing it the shutdown receiver
    pub async fn guard<F, Fut, R>(future_fn: F) -> R
    where
        F: FnOnce(broadcast::Receiver<()>) -> Fut,
        Fut: std::future::Future<Output = R>,
    {
        let (coordinator, shutdown_rx) = Self::new();
        coordinator.install_signal_handlers();
        future_fn(shutdown_rx).await
    }

    /// Spawn signal listeners; the first signal requests shutdown, a second one exits
    pub fn install_signal_handlers(&self) {
        let signal_count = Arc::new(AtomicUsize::new(0));

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            for kind in [SignalKind::terminate(), SignalKind::hangup()] {
                let tx = self.shutdown_tx.clone();
                let requested = self.shutdown_requested.clone();
                let counter = signal_count.clone();
                tokio::spawn(async move {
                    if let Ok(mut sig) = signal(kind) {
                        while sig.recv().await.is_some() {
                            on_signal(&tx, &requested, &counter);
                        }
                    }
                });
            }
        }

        let tx = self.shutdown_tx.clone();
        let requested = self.shutdown_requested.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                on_signal(&tx, &requested, &signal_count);
            }
        });
    }
}

fn on_signal(tx: &broadcast::Sender<()>, requested: &AtomicBool, counter: &AtomicUsize) {
    let prev = counter.fetch_add(1, Ordering::AcqRel);
    requested.store(true, Ordering::Release);
    let _ = tx.send(());
    if prev >= 1 {
        log::warn!("Second interrupt received; exiting");
        std::process::exit(130);
    }
    log::info!("Interrupt received; shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_shutdown_coordinator_creation() {
        let (coordinator, _rx) = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutdown_requested());
    }

    #[tokio::test]
    async fn test_shutdown_coordinator_trigger() {
        let (coordinator, mut rx) = ShutdownCoordinator::new();

        coordinator.trigger_shutdown();

        assert!(coordinator.is_shutdown_requested());
        let signal_received = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(signal_received.is_ok(), "Should receive shutdown signal");
    }

    #[tokio::test]
    async fn test_shutdown_coordinator_multiple_subscribers() {
        let (coordinator, _rx1) = ShutdownCoordinator::new();
        let mut rx2 = coordinator.subscribe();
        let mut rx3 = coordinator.subscribe();

        coordinator.trigger_shutdown();

        assert!(timeout(Duration::from_millis(100), rx2.recv()).await.is_ok());
        assert!(timeout(Duration::from_millis(100), rx3.recv()).await.is_ok());
    }

    #[tokio::test]
    async fn test_guard_runs_future_to_completion() {
        let result = ShutdownCoordinator::guard(|mut shutdown_rx| async move {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(20)) => 42,
                _ = shutdown_rx.recv() => -1,
            }
        })
        .await;

        assert_eq!(result, 42);
    }
}
