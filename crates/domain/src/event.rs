//! `HubEvent` — the envelope fanned out to live observers.
//!
//! Every frame serializes as `{type, ...fields, timestamp}`, with the
//! `type` tag taking one of `connected`, `sensor_update`, `alarm`,
//! `actuator_update`, `robot_update`.

use serde::{Deserialize, Serialize};

use crate::alarm::Alarm;
use crate::id::{ActuatorId, ConnectionId, RobotId, SensorId};
use crate::reading::SensorReading;
use crate::time::Timestamp;

/// A server→client frame for the live observer protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubEvent {
    /// Handshake sent once to a newly registered connection.
    #[serde(rename_all = "camelCase")]
    Connected {
        client_id: ConnectionId,
        timestamp: Timestamp,
    },
    /// A sensor reading passed through the pipeline.
    #[serde(rename_all = "camelCase")]
    SensorUpdate {
        sensor_id: SensorId,
        data: SensorReading,
        timestamp: Timestamp,
    },
    /// A newly created alarm.
    Alarm { alarm: Alarm, timestamp: Timestamp },
    /// An actuator state change caused by a dispatched action.
    #[serde(rename_all = "camelCase")]
    ActuatorUpdate {
        actuator_id: ActuatorId,
        status: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
        timestamp: Timestamp,
    },
    /// A robot command dispatched by the pipeline.
    #[serde(rename_all = "camelCase")]
    RobotUpdate {
        robot_id: RobotId,
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<serde_json::Value>,
        timestamp: Timestamp,
    },
}

impl HubEvent {
    /// Handshake frame for a fresh connection.
    #[must_use]
    pub fn connected(client_id: ConnectionId) -> Self {
        Self::Connected {
            client_id,
            timestamp: crate::time::now(),
        }
    }

    /// Frame echoing one reading to all observers.
    #[must_use]
    pub fn sensor_update(reading: SensorReading) -> Self {
        Self::SensorUpdate {
            sensor_id: reading.sensor_id.clone(),
            data: reading,
            timestamp: crate::time::now(),
        }
    }

    /// Frame announcing a newly created alarm.
    #[must_use]
    pub fn alarm(alarm: Alarm) -> Self {
        Self::Alarm {
            alarm,
            timestamp: crate::time::now(),
        }
    }

    /// Frame reflecting an actuator state change.
    #[must_use]
    pub fn actuator_update(actuator_id: ActuatorId, status: impl Into<String>, value: Option<f64>) -> Self {
        Self::ActuatorUpdate {
            actuator_id,
            status: status.into(),
            value,
            timestamp: crate::time::now(),
        }
    }

    /// Frame reflecting a dispatched robot command.
    #[must_use]
    pub fn robot_update(
        robot_id: RobotId,
        command: impl Into<String>,
        parameters: Option<serde_json::Value>,
    ) -> Self {
        Self::RobotUpdate {
            robot_id,
            command: command.into(),
            parameters,
            timestamp: crate::time::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::Severity;

    #[test]
    fn should_tag_connected_frame() {
        let event = HubEvent::connected(ConnectionId::new());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "connected");
        assert!(json["clientId"].is_string());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn should_tag_sensor_update_frame_with_reading_payload() {
        let reading = SensorReading::new("1", "temperature", 25.5, Some("℃".to_string()));
        let event = HubEvent::sensor_update(reading);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "sensor_update");
        assert_eq!(json["sensorId"], "1");
        assert_eq!(json["data"]["sensorType"], "temperature");
        assert_eq!(json["data"]["value"], 25.5);
    }

    #[test]
    fn should_tag_alarm_frame() {
        let alarm = Alarm::new("humidity", Severity::Warning, "too dry", SensorId::new("2"));
        let event = HubEvent::alarm(alarm);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "alarm");
        assert_eq!(json["alarm"]["severity"], "warning");
    }

    #[test]
    fn should_tag_actuator_update_frame() {
        let event = HubEvent::actuator_update(ActuatorId::new(5), "on", Some(0.5));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "actuator_update");
        assert_eq!(json["actuatorId"], 5);
        assert_eq!(json["status"], "on");
        assert_eq!(json["value"], 0.5);
    }

    #[test]
    fn should_omit_value_when_actuator_update_has_none() {
        let event = HubEvent::actuator_update(ActuatorId::new(5), "off", None);
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("value").is_none());
    }

    #[test]
    fn should_tag_robot_update_frame() {
        let event = HubEvent::robot_update(
            RobotId::new(2),
            "move_to",
            Some(serde_json::json!({"row": 4})),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "robot_update");
        assert_eq!(json["robotId"], 2);
        assert_eq!(json["command"], "move_to");
        assert_eq!(json["parameters"]["row"], 4);
    }

    #[test]
    fn should_roundtrip_events_through_serde_json() {
        let events = vec![
            HubEvent::connected(ConnectionId::new()),
            HubEvent::sensor_update(SensorReading::new("3", "co2", 410.0, None)),
            HubEvent::actuator_update(ActuatorId::new(1), "on", None),
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let parsed: HubEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(&parsed, event);
        }
    }
}
