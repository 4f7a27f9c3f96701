//! Command dispatcher — turns rule actions into outbound control messages.

use serde::Serialize;

use agrihub_domain::event::HubEvent;
use agrihub_domain::rule::Action;
use agrihub_domain::time::Timestamp;

use crate::ports::{ActuatorRepository, CommandPublisher};

/// Payload published to `actuators/{id}/control`.
#[derive(Debug, Serialize)]
struct ActuatorCommand<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    timestamp: Timestamp,
}

/// Payload published to `robots/{id}/command`.
#[derive(Debug, Serialize)]
struct RobotCommand<'a> {
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<&'a serde_json::Value>,
    timestamp: Timestamp,
}

/// Executes actions emitted by the rule engine.
///
/// Dispatch is fire-and-forget with at-most-once delivery: a failed state
/// write or publish is logged and dropped, never retried, and never stops
/// the pipeline. The returned [`HubEvent`] always reflects the attempted
/// command so live observers stay informed even in degraded mode.
pub struct CommandDispatcher<A, P> {
    actuators: A,
    publisher: P,
}

impl<A, P> CommandDispatcher<A, P>
where
    A: ActuatorRepository,
    P: CommandPublisher,
{
    pub fn new(actuators: A, publisher: P) -> Self {
        Self {
            actuators,
            publisher,
        }
    }

    /// Execute one action and return the frame describing it.
    pub async fn dispatch(&self, action: &Action) -> HubEvent {
        match action {
            Action::Actuator {
                actuator_id,
                status,
                value,
            } => {
                if let Err(error) = self
                    .actuators
                    .update_status(*actuator_id, status, *value)
                    .await
                {
                    tracing::warn!(%error, actuator = %actuator_id, "failed to record actuator state");
                }
                let topic = format!("actuators/{actuator_id}/control");
                self.publish(
                    &topic,
                    &ActuatorCommand {
                        status,
                        value: *value,
                        timestamp: agrihub_domain::time::now(),
                    },
                )
                .await;
                HubEvent::actuator_update(*actuator_id, status, *value)
            }
            Action::Robot {
                robot_id,
                command,
                parameters,
            } => {
                let topic = format!("robots/{robot_id}/command");
                self.publish(
                    &topic,
                    &RobotCommand {
                        command,
                        parameters: parameters.as_ref(),
                        timestamp: agrihub_domain::time::now(),
                    },
                )
                .await;
                HubEvent::robot_update(*robot_id, command, parameters.clone())
            }
        }
    }

    async fn publish<C: Serialize>(&self, topic: &str, command: &C) {
        let payload = match serde_json::to_value(command) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, topic, "failed to encode command");
                return;
            }
        };
        tracing::debug!(topic, "dispatching command");
        if let Err(error) = self.publisher.publish(topic, payload).await {
            tracing::warn!(%error, topic, "failed to publish command");
        }
    }
}
