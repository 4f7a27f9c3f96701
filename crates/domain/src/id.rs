//! Typed identifier newtypes.
//!
//! Internally generated identifiers (rules, thresholds, alarms, observer
//! connections) are random UUIDs. Identifiers that arrive on the wire keep
//! their wire shape: sensor ids are the middle segment of the
//! `sensors/{id}/data` topic (free-form text), actuator and robot ids are
//! numeric.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_uuid_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

macro_rules! define_numeric_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw numeric identifier.
            #[must_use]
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Access the raw numeric value.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

define_uuid_id!(
    /// Unique identifier for a [`Rule`](crate::rule::Rule).
    RuleId
);

define_uuid_id!(
    /// Unique identifier for an [`AlarmThreshold`](crate::alarm::AlarmThreshold).
    ThresholdId
);

define_uuid_id!(
    /// Unique identifier for an [`Alarm`](crate::alarm::Alarm).
    AlarmId
);

define_uuid_id!(
    /// Unique identifier for an observer connection.
    ConnectionId
);

define_numeric_id!(
    /// Identifier of an actuator, numeric on the wire (`actuators/{id}/control`).
    ActuatorId
);

define_numeric_id!(
    /// Identifier of a robot, numeric on the wire (`robots/{id}/command`).
    RobotId
);

/// Identifier of a sensor as it appears on the wire (`sensors/{id}/data`).
///
/// Sensor ids are free-form text: external fleets use whatever naming their
/// gateway emits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(String);

impl SensorId {
    /// Wrap a raw sensor identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the raw identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SensorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SensorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = RuleId::new();
        let b = RuleId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = AlarmId::new();
        let text = id.to_string();
        let parsed: AlarmId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_roundtrip_uuid_id_through_serde_json() {
        let id = ConnectionId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ConnectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_return_error_when_parsing_invalid_uuid() {
        let result = ThresholdId::from_str("not-a-uuid");
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_actuator_id_as_bare_number() {
        let id = ActuatorId::new(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
    }

    #[test]
    fn should_deserialize_robot_id_from_bare_number() {
        let id: RobotId = serde_json::from_str("12").unwrap();
        assert_eq!(id, RobotId::new(12));
    }

    #[test]
    fn should_serialize_sensor_id_as_bare_string() {
        let id = SensorId::new("greenhouse-3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"greenhouse-3\"");
    }

    #[test]
    fn should_display_sensor_id_as_raw_text() {
        let id = SensorId::new("7");
        assert_eq!(id.to_string(), "7");
        assert_eq!(id.as_str(), "7");
    }
}
