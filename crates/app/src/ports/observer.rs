//! Observer sink port — one live connection's send half.

/// The send half of a live observer connection.
///
/// `send` must be non-blocking: transports back the sink with a channel
/// drained by their own writer task. A returned [`SinkClosed`] marks the
/// connection as unusable and causes the hub to drop it.
pub trait ObserverSink: Send + Sync + 'static {
    /// Hand one serialized frame to the connection.
    ///
    /// # Errors
    ///
    /// Returns [`SinkClosed`] when the connection can no longer accept
    /// frames (closed socket, full or dropped channel).
    fn send(&self, frame: &str) -> Result<(), SinkClosed>;
}

/// The connection behind a sink is gone.
#[derive(Debug, thiserror::Error)]
#[error("observer connection closed")]
pub struct SinkClosed;
