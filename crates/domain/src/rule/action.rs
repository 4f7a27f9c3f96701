//! Action — the control command issued when a rule fires.

use serde::{Deserialize, Serialize};

use crate::id::{ActuatorId, RobotId};

/// An outbound control command produced by the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Set an actuator's state (valve, fan, pump, …).
    #[serde(rename_all = "camelCase")]
    Actuator {
        actuator_id: ActuatorId,
        /// Target status, e.g. `"on"`, `"off"`.
        status: String,
        /// Optional setpoint (e.g. valve opening percentage).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
    },
    /// Send a command to a robot.
    #[serde(rename_all = "camelCase")]
    Robot {
        robot_id: RobotId,
        /// Command name, e.g. `"move_to"`, `"start_harvest"`.
        command: String,
        /// Free-form command parameters.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<serde_json::Value>,
    },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actuator {
                actuator_id,
                status,
                ..
            } => write!(f, "actuator({actuator_id} -> {status})"),
            Self::Robot {
                robot_id, command, ..
            } => write!(f, "robot({robot_id} <- {command})"),
        }
    }
}
