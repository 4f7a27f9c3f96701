//! Live broadcast hub — fan-out of pipeline events to observer connections.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use agrihub_domain::event::HubEvent;
use agrihub_domain::id::ConnectionId;

use crate::ports::{ObserverSink, SinkClosed};

/// Registry of live observer connections.
///
/// Events are serialized once per broadcast and handed to every registered
/// sink. A sink that refuses a frame is removed on the spot; the transport
/// behind it is expected to notice its channel closing and tear the
/// connection down. Slow or dead observers never block the pipeline.
pub struct BroadcastHub<S> {
    connections: Mutex<HashMap<ConnectionId, S>>,
}

impl<S> Default for BroadcastHub<S> {
    fn default() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl<S: ObserverSink> BroadcastHub<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and send it the `connected` handshake.
    ///
    /// # Errors
    ///
    /// Returns [`SinkClosed`] when the handshake cannot be delivered; the
    /// connection is not registered in that case.
    pub fn register(&self, sink: S) -> Result<ConnectionId, SinkClosed> {
        let id = ConnectionId::new();
        match serde_json::to_string(&HubEvent::connected(id)) {
            Ok(frame) => sink.send(&frame)?,
            Err(error) => tracing::warn!(%error, "failed to encode handshake frame"),
        }
        let mut connections = self.lock();
        connections.insert(id, sink);
        tracing::info!(client = %id, connections = connections.len(), "observer connected");
        Ok(id)
    }

    /// Drop a connection, typically after its socket closed.
    pub fn unregister(&self, id: ConnectionId) {
        let mut connections = self.lock();
        if connections.remove(&id).is_some() {
            tracing::info!(client = %id, connections = connections.len(), "observer disconnected");
        }
    }

    /// Fan one event out to every connection.
    ///
    /// Returns the number of connections the frame was delivered to.
    /// Connections that refuse the frame are removed.
    pub fn broadcast(&self, event: &HubEvent) -> usize {
        let frame = match serde_json::to_string(event) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(%error, "failed to encode broadcast frame");
                return 0;
            }
        };
        let mut connections = self.lock();
        connections.retain(|id, sink| match sink.send(&frame) {
            Ok(()) => true,
            Err(SinkClosed) => {
                tracing::info!(client = %id, "dropping dead observer connection");
                false
            }
        });
        connections.len()
    }

    /// Number of live connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ConnectionId, S>> {
        self.connections.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
