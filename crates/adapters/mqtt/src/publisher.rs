//! Outbound control-message publisher sharing the broker connection.

use rumqttc::{AsyncClient, QoS};

use agrihub_app::ports::CommandPublisher;
use agrihub_domain::error::AgriHubError;

use crate::error::MqttError;

/// Publishes control messages with at-most-once delivery.
///
/// `try_publish` hands the message to the client's send buffer without
/// waiting: a full buffer or a disconnected client returns an error and the
/// message is gone. Callers treat that as a dropped command, never a retry.
pub struct MqttCommandPublisher {
    client: AsyncClient,
}

impl MqttCommandPublisher {
    #[must_use]
    pub(crate) fn new(client: AsyncClient) -> Self {
        Self { client }
    }
}

impl CommandPublisher for MqttCommandPublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), AgriHubError> {
        let body = payload.to_string();
        self.client
            .try_publish(topic, QoS::AtMostOnce, false, body)
            .map_err(|error| MqttError::Client(error).into_domain())
    }
}
