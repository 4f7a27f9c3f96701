//! Condition tree — the predicate side of a rule.

use serde::{Deserialize, Serialize};

use crate::id::SensorId;
use crate::reading::SensorReading;

/// Comparison operator applied to a sensor value.
///
/// `==` and `!=` compare floating-point values exactly. That is brittle for
/// real sensor data and is kept because operator-authored rules use it; an
/// epsilon comparison would silently change their meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl Comparator {
    /// Apply the operator to `value` against `threshold`.
    #[must_use]
    pub fn compare(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Ge => value >= threshold,
            Self::Lt => value < threshold,
            Self::Le => value <= threshold,
            Self::Eq => value == threshold,
            Self::Ne => value != threshold,
        }
    }

    /// Wire/display symbol, e.g. `">="`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Recursive predicate evaluated against a single reading.
///
/// The tree is a closed set of variants with exhaustive matching; the wire
/// shape is the tagged JSON stored with each rule (`type` ∈
/// `"sensor" | "and" | "or"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionNode {
    /// Compare the reading's value against a threshold.
    ///
    /// The node matches a reading only if the reading's sensor type equals
    /// `sensor_type`, and — when `sensor_id` is set — the reading's sensor
    /// id matches too.
    #[serde(rename_all = "camelCase")]
    Sensor {
        /// Restrict the comparison to one sensor; `None` matches the whole type.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sensor_id: Option<SensorId>,
        sensor_type: String,
        operator: Comparator,
        threshold: f64,
    },
    /// True iff all children are true. Vacuously true when empty.
    And { conditions: Vec<ConditionNode> },
    /// True iff any child is true. Vacuously false when empty.
    Or { conditions: Vec<ConditionNode> },
}

impl ConditionNode {
    /// Evaluate the tree against one reading. Pure; no shared state.
    #[must_use]
    pub fn matches(&self, reading: &SensorReading) -> bool {
        match self {
            Self::Sensor {
                sensor_id,
                sensor_type,
                operator,
                threshold,
            } => {
                if *sensor_type != reading.sensor_type {
                    return false;
                }
                if let Some(id) = sensor_id {
                    if *id != reading.sensor_id {
                        return false;
                    }
                }
                operator.compare(reading.value, *threshold)
            }
            Self::And { conditions } => conditions.iter().all(|c| c.matches(reading)),
            Self::Or { conditions } => conditions.iter().any(|c| c.matches(reading)),
        }
    }
}

impl std::fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sensor {
                sensor_type,
                operator,
                threshold,
                ..
            } => write!(f, "sensor({sensor_type} {operator} {threshold})"),
            Self::And { conditions } => write!(f, "and({} children)", conditions.len()),
            Self::Or { conditions } => write!(f, "or({} children)", conditions.len()),
        }
    }
}
