//! Alarms and alarm thresholds.
//!
//! A threshold is a (sensor type, min/max, severity) band. Several
//! thresholds may target the same sensor type — e.g. a warning band inside
//! a wider critical band — and each is checked independently.

use serde::{Deserialize, Serialize};

use crate::id::{AlarmId, SensorId, ThresholdId};
use crate::time::Timestamp;

/// How serious a threshold violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Lifecycle status of an alarm.
///
/// The pipeline only ever creates `Unread` alarms; `Read` and `Resolved`
/// transitions are operator actions handled elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    Unread,
    Read,
    Resolved,
}

/// Which bound of a threshold a value breached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundViolation {
    /// Value fell below the configured minimum.
    BelowMin(f64),
    /// Value rose above the configured maximum.
    AboveMax(f64),
}

/// A min/max alarm band for one sensor type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmThreshold {
    pub id: ThresholdId,
    /// Sensor type this band applies to, e.g. `"temperature"`.
    pub sensor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub severity: Severity,
}

impl AlarmThreshold {
    /// Create a threshold with a fresh id.
    #[must_use]
    pub fn new(
        sensor_type: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
        severity: Severity,
    ) -> Self {
        Self {
            id: ThresholdId::new(),
            sensor_type: sensor_type.into(),
            min,
            max,
            severity,
        }
    }

    /// Check a value against the band.
    ///
    /// The min bound is checked first; a value cannot breach both bounds of
    /// a well-formed band.
    #[must_use]
    pub fn violation(&self, value: f64) -> Option<BoundViolation> {
        if let Some(min) = self.min {
            if value < min {
                return Some(BoundViolation::BelowMin(min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(BoundViolation::AboveMax(max));
            }
        }
        None
    }
}

/// An alarm raised for a threshold violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: AlarmId,
    /// The triggering sensor type.
    pub alarm_type: String,
    pub severity: Severity,
    /// Human-readable description embedding value, bound, and unit.
    pub message: String,
    /// The sensor whose reading violated the band.
    pub sensor_id: SensorId,
    pub status: AlarmStatus,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Timestamp>,
}

impl Alarm {
    /// Create a fresh `Unread` alarm stamped with the current time.
    #[must_use]
    pub fn new(
        alarm_type: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        sensor_id: SensorId,
    ) -> Self {
        Self {
            id: AlarmId::new(),
            alarm_type: alarm_type.into(),
            severity,
            message: message.into(),
            sensor_id,
            status: AlarmStatus::Unread,
            created_at: crate::time::now(),
            resolved_at: None,
        }
    }
}
