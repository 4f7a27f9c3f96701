//! Collaborator-store ports — the persistence calls this core consumes.
//!
//! Schema design and CRUD surfaces live with the collaborator; the pipeline
//! only needs these narrow calls. In-memory implementations
//! (`agrihub-adapter-memory`) stand in when no store is reachable.

use std::future::Future;
use std::sync::Arc;

use agrihub_domain::alarm::{Alarm, AlarmThreshold};
use agrihub_domain::error::AgriHubError;
use agrihub_domain::id::{ActuatorId, SensorId};
use agrihub_domain::rule::Rule;

/// Bulk load of the enabled rule set.
pub trait RuleRepository: Send + Sync {
    /// Fetch all rules with `enabled = true`, in creation order.
    ///
    /// The rule store sorts by priority; a stable sort preserves this
    /// order as the tiebreaker.
    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, AgriHubError>> + Send;
}

/// Bulk load of the alarm threshold set.
pub trait ThresholdRepository: Send + Sync {
    /// Fetch all configured thresholds.
    fn get_all(&self) -> impl Future<Output = Result<Vec<AlarmThreshold>, AgriHubError>> + Send;
}

/// Persisted actuator state, updated on dispatch.
pub trait ActuatorRepository: Send + Sync {
    /// Record an actuator's new status (and optional setpoint).
    fn update_status(
        &self,
        id: ActuatorId,
        status: &str,
        value: Option<f64>,
    ) -> impl Future<Output = Result<(), AgriHubError>> + Send;
}

/// Alarm persistence and the dedup lookup.
pub trait AlarmRepository: Send + Sync {
    /// Persist a newly created alarm.
    fn create(&self, alarm: Alarm) -> impl Future<Output = Result<Alarm, AgriHubError>> + Send;

    /// Find an `unread` alarm of the same (type, sensor) created within the
    /// trailing `window`.
    fn find_recent_unread(
        &self,
        alarm_type: &str,
        sensor_id: &SensorId,
        window: chrono::Duration,
    ) -> impl Future<Output = Result<Option<Alarm>, AgriHubError>> + Send;
}

impl<T: RuleRepository> RuleRepository for Arc<T> {
    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, AgriHubError>> + Send {
        (**self).get_enabled()
    }
}

impl<T: ThresholdRepository> ThresholdRepository for Arc<T> {
    fn get_all(&self) -> impl Future<Output = Result<Vec<AlarmThreshold>, AgriHubError>> + Send {
        (**self).get_all()
    }
}

impl<T: ActuatorRepository> ActuatorRepository for Arc<T> {
    fn update_status(
        &self,
        id: ActuatorId,
        status: &str,
        value: Option<f64>,
    ) -> impl Future<Output = Result<(), AgriHubError>> + Send {
        (**self).update_status(id, status, value)
    }
}

impl<T: AlarmRepository> AlarmRepository for Arc<T> {
    fn create(&self, alarm: Alarm) -> impl Future<Output = Result<Alarm, AgriHubError>> + Send {
        (**self).create(alarm)
    }

    fn find_recent_unread(
        &self,
        alarm_type: &str,
        sensor_id: &SensorId,
        window: chrono::Duration,
    ) -> impl Future<Output = Result<Option<Alarm>, AgriHubError>> + Send {
        (**self).find_recent_unread(alarm_type, sensor_id, window)
    }
}
