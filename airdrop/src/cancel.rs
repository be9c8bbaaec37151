use tokio::sync::broadcast;
use tracing::info;

/// Coordinates cancellation of an in-flight confirmation poll.
///
/// Wraps a single-slot broadcast channel. Subscribe before the work starts:
/// a receiver only observes cancels sent after it subscribed.
pub struct CancelController {
    tx: broadcast::Sender<()>,
}

impl CancelController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Get a receiver to listen for cancellation.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Cancel whatever is listening. Safe to call with no subscribers.
    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }

    /// Listen for Ctrl+C and translate it into a cancel.
    pub async fn cancel_on_ctrl_c(&self) {
        let _ = tokio::signal::ctrl_c().await;
        info!("interrupt received, cancelling");
        self.cancel();
    }
}

impl Default for CancelController {
    fn default() -> Self {
        Self::new()
    }
}
