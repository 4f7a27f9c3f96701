//! `SensorReading` — one timestamped sample from a sensor.

use serde::{Deserialize, Serialize};

use crate::id::SensorId;
use crate::time::Timestamp;

/// An immutable environmental sample.
///
/// Produced by a reading source (live broker subscription or synthetic
/// generator) and consumed by the rule engine and the alarm monitor. This
/// core never persists readings; time-series storage is a collaborator's
/// job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Identifier of the originating sensor.
    pub sensor_id: SensorId,
    /// Kind of measurement, e.g. `"temperature"`, `"humidity"`, `"soil_moisture"`.
    pub sensor_type: String,
    /// Measured value.
    pub value: f64,
    /// Unit of measurement, when the sensor reports one (e.g. `"℃"`, `"%"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// When the sample was taken.
    pub timestamp: Timestamp,
}

impl SensorReading {
    /// Create a reading stamped with the current time.
    #[must_use]
    pub fn new(
        sensor_id: impl Into<SensorId>,
        sensor_type: impl Into<String>,
        value: f64,
        unit: Option<String>,
    ) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            sensor_type: sensor_type.into(),
            value,
            unit,
            timestamp: crate::time::now(),
        }
    }

    /// Unit text for message formatting, empty when none was reported.
    #[must_use]
    pub fn unit_str(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }
}
