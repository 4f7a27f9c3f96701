//! Live reading source backed by a broker subscription.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use serde::Deserialize;
use tokio::sync::mpsc;

use agrihub_app::ports::ReadingSource;
use agrihub_domain::reading::SensorReading;
use agrihub_domain::time::Timestamp;

use crate::config::MqttConfig;
use crate::error::MqttError;
use crate::publisher::MqttCommandPublisher;

const SENSOR_TOPIC_FILTER: &str = "sensors/+/data";

/// JSON body published by sensor gateways on `sensors/{id}/data`.
#[derive(Debug, Deserialize)]
struct ReadingPayload {
    /// Kind of measurement; gateways occasionally omit it.
    #[serde(rename = "type", default)]
    sensor_type: Option<String>,
    value: f64,
    #[serde(default)]
    unit: Option<String>,
    /// Sample time at the gateway; defaults to arrival time when absent.
    #[serde(default)]
    timestamp: Option<Timestamp>,
}

/// Sensor readings decoded from the live broker subscription.
///
/// A background task polls the broker event loop, decodes publishes, and
/// hands readings over a bounded channel. Undecodable payloads are logged
/// and skipped; the subscription is re-issued on every reconnect, since a
/// clean session starts without it.
pub struct MqttSource {
    rx: mpsc::Receiver<SensorReading>,
}

impl MqttSource {
    /// Connect to the broker, subscribe to the sensor topics, and return
    /// the source together with the publisher sharing the connection.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Connect`] when the broker handshake fails and
    /// [`MqttError::Client`] when the subscription is refused. Callers are
    /// expected to fall back to the synthetic source on error.
    pub async fn connect(
        config: &MqttConfig,
    ) -> Result<(Self, MqttCommandPublisher), MqttError> {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));

        let (client, mut eventloop) = AsyncClient::new(options, 16);

        // Drive the event loop until the broker acknowledges the session.
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => break,
                Ok(_) => {}
                Err(error) => return Err(MqttError::Connect(error)),
            }
        }
        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            "connected to MQTT broker"
        );

        client
            .subscribe(SENSOR_TOPIC_FILTER, QoS::AtMostOnce)
            .await
            .map_err(MqttError::Client)?;

        let (tx, rx) = mpsc::channel(config.channel_capacity);
        let poll_client = client.clone();
        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(ref event) if is_session_start(event) => {
                        // The broker forgot the clean session's subscription.
                        match poll_client.try_subscribe(SENSOR_TOPIC_FILTER, QoS::AtMostOnce) {
                            Ok(()) => tracing::info!("resubscribed after reconnect"),
                            Err(error) => {
                                tracing::warn!(%error, "failed to resubscribe after reconnect");
                            }
                        }
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        match parse_reading(&publish.topic, &publish.payload) {
                            Ok(reading) => {
                                if tx.send(reading).await.is_err() {
                                    // Pipeline gone; stop polling.
                                    break;
                                }
                            }
                            Err(error) => {
                                tracing::warn!(%error, topic = %publish.topic, "skipping message");
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(error) => {
                        tracing::warn!(%error, "MQTT connection lost, retrying");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        Ok((Self { rx }, MqttCommandPublisher::new(client)))
    }
}

impl ReadingSource for MqttSource {
    async fn recv(&mut self) -> Option<SensorReading> {
        self.rx.recv().await
    }
}

/// A ConnAck marks a fresh broker session, which starts subscription-less.
fn is_session_start(event: &Event) -> bool {
    matches!(event, Event::Incoming(Packet::ConnAck(_)))
}

/// Decode one publish into a domain reading.
fn parse_reading(topic: &str, payload: &[u8]) -> Result<SensorReading, MqttError> {
    let sensor_id = match topic.split('/').collect::<Vec<_>>().as_slice() {
        ["sensors", id, "data"] if !id.is_empty() => (*id).to_string(),
        _ => return Err(MqttError::Topic(topic.to_string())),
    };
    let body: ReadingPayload = serde_json::from_slice(payload).map_err(MqttError::PayloadParse)?;
    Ok(SensorReading {
        sensor_id: sensor_id.into(),
        sensor_type: body
            .sensor_type
            .unwrap_or_else(|| "unknown".to_string()),
        value: body.value,
        unit: body.unit,
        timestamp: body.timestamp.unwrap_or_else(agrihub_domain::time::now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrihub_domain::id::SensorId;

    #[test]
    fn should_parse_complete_payload() {
        let payload = r#"{
            "type": "temperature",
            "value": 25.5,
            "unit": "℃",
            "timestamp": "2026-08-30T10:15:00Z"
        }"#;
        let reading = parse_reading("sensors/3/data", payload.as_bytes()).unwrap();
        assert_eq!(reading.sensor_id, SensorId::new("3"));
        assert_eq!(reading.sensor_type, "temperature");
        assert_eq!(reading.value, 25.5);
        assert_eq!(reading.unit.as_deref(), Some("℃"));
        assert_eq!(
            reading.timestamp.to_rfc3339(),
            "2026-08-30T10:15:00+00:00"
        );
    }

    #[test]
    fn should_default_missing_type_to_unknown() {
        let reading = parse_reading("sensors/9/data", br#"{"value": 1.0}"#).unwrap();
        assert_eq!(reading.sensor_type, "unknown");
        assert!(reading.unit.is_none());
    }

    #[test]
    fn should_stamp_arrival_time_when_timestamp_is_missing() {
        let before = agrihub_domain::time::now();
        let reading =
            parse_reading("sensors/1/data", br#"{"type": "co2", "value": 400}"#).unwrap();
        assert!(reading.timestamp >= before);
    }

    #[test]
    fn should_reject_unexpected_topic() {
        let err = parse_reading("actuators/5/control", br#"{"value": 1.0}"#).unwrap_err();
        assert!(matches!(err, MqttError::Topic(_)));
        let err = parse_reading("sensors//data", br#"{"value": 1.0}"#).unwrap_err();
        assert!(matches!(err, MqttError::Topic(_)));
    }

    #[test]
    fn should_reject_payload_without_value() {
        let err = parse_reading("sensors/1/data", br#"{"type": "temperature"}"#).unwrap_err();
        assert!(matches!(err, MqttError::PayloadParse(_)));
    }

    #[test]
    fn should_reject_non_json_payload() {
        let err = parse_reading("sensors/1/data", b"not json").unwrap_err();
        assert!(matches!(err, MqttError::PayloadParse(_)));
    }

    #[test]
    fn should_treat_conn_ack_as_session_start() {
        let ack = Event::Incoming(Packet::ConnAck(rumqttc::ConnAck {
            session_present: false,
            code: rumqttc::ConnectReturnCode::Success,
        }));
        assert!(is_session_start(&ack));
    }

    #[test]
    fn should_not_treat_other_packets_as_session_start() {
        assert!(!is_session_start(&Event::Incoming(Packet::PingResp)));
        assert!(!is_session_start(&Event::Outgoing(rumqttc::Outgoing::PingReq)));
    }
}
