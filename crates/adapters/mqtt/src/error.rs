//! MQTT adapter error types.

use agrihub_domain::error::AgriHubError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The initial broker handshake failed.
    #[error("failed to connect to MQTT broker")]
    Connect(#[source] rumqttc::ConnectionError),

    /// The rumqttc client returned an error.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// A message arrived on a topic this adapter never subscribed to.
    #[error("unexpected topic: {0}")]
    Topic(String),

    /// Failed to parse an incoming MQTT payload as JSON.
    #[error("failed to parse MQTT payload")]
    PayloadParse(#[source] serde_json::Error),
}

impl MqttError {
    /// Convert into an [`AgriHubError::Transport`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> AgriHubError {
        AgriHubError::Transport(Box::new(self))
    }
}

impl From<MqttError> for AgriHubError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_topic_error() {
        let err = MqttError::Topic("sensors/7".to_string());
        assert_eq!(err.to_string(), "unexpected topic: sensors/7");
    }

    #[test]
    fn should_display_payload_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err = MqttError::PayloadParse(json_err);
        assert_eq!(err.to_string(), "failed to parse MQTT payload");
    }

    #[test]
    fn should_convert_into_transport_error() {
        let err: AgriHubError = MqttError::Topic("oops".to_string()).into();
        assert!(matches!(err, AgriHubError::Transport(_)));
    }
}
