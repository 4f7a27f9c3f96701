//! In-memory actuator state.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use agrihub_app::ports::ActuatorRepository;
use agrihub_domain::error::AgriHubError;
use agrihub_domain::id::ActuatorId;

/// Last dispatched state per actuator.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorState {
    pub status: String,
    pub value: Option<f64>,
}

/// Records the most recent status per actuator.
#[derive(Debug, Default)]
pub struct InMemoryActuatorRepository {
    states: Mutex<HashMap<ActuatorId, ActuatorState>>,
}

impl InMemoryActuatorRepository {
    /// Last recorded state of `id`, when any dispatch reached it.
    #[must_use]
    pub fn state(&self, id: ActuatorId) -> Option<ActuatorState> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

impl ActuatorRepository for InMemoryActuatorRepository {
    async fn update_status(
        &self,
        id: ActuatorId,
        status: &str,
        value: Option<f64>,
    ) -> Result<(), AgriHubError> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                id,
                ActuatorState {
                    status: status.to_string(),
                    value,
                },
            );
        Ok(())
    }
}
