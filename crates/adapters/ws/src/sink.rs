//! Channel-backed observer sink.

use tokio::sync::mpsc;

use agrihub_app::ports::{ObserverSink, SinkClosed};

/// Hands frames to the per-connection writer task.
///
/// The channel is bounded; a client too slow to drain it counts as dead
/// and gets dropped by the hub on the next broadcast.
#[derive(Debug, Clone)]
pub struct WsSink {
    tx: mpsc::Sender<String>,
}

impl WsSink {
    /// Wrap the sending half of a writer channel.
    #[must_use]
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

impl ObserverSink for WsSink {
    fn send(&self, frame: &str) -> Result<(), SinkClosed> {
        self.tx.try_send(frame.to_string()).map_err(|_| SinkClosed)
    }
}
