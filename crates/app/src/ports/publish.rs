//! Command publisher port — fire-and-forget outbound control messages.

use std::future::Future;
use std::sync::Arc;

use agrihub_domain::error::AgriHubError;

/// Publishes control messages to the outbound transport.
///
/// Delivery is at-most-once: a disconnected transport drops the message
/// rather than queueing it, and a failed publish never fails the pipeline.
pub trait CommandPublisher: Send + Sync {
    /// Publish one JSON payload to `topic`.
    fn publish(
        &self,
        topic: &str,
        payload: serde_json::Value,
    ) -> impl Future<Output = Result<(), AgriHubError>> + Send;
}

impl<T: CommandPublisher> CommandPublisher for Arc<T> {
    fn publish(
        &self,
        topic: &str,
        payload: serde_json::Value,
    ) -> impl Future<Output = Result<(), AgriHubError>> + Send {
        (**self).publish(topic, payload)
    }
}

/// Degraded-mode publisher used when no broker is reachable.
///
/// Swallows every message so the rest of the pipeline behaves identically
/// with or without an outbound transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

impl CommandPublisher for NoopPublisher {
    fn publish(
        &self,
        topic: &str,
        _payload: serde_json::Value,
    ) -> impl Future<Output = Result<(), AgriHubError>> + Send {
        tracing::debug!(topic, "no outbound transport, dropping command");
        async { Ok(()) }
    }
}
