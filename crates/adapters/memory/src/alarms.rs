//! In-memory alarm storage with the recent-unread lookup.

use std::sync::{Mutex, PoisonError};

use agrihub_app::ports::AlarmRepository;
use agrihub_domain::alarm::{Alarm, AlarmStatus};
use agrihub_domain::error::AgriHubError;
use agrihub_domain::id::SensorId;

/// Stores alarms in creation order.
#[derive(Debug, Default)]
pub struct InMemoryAlarmRepository {
    alarms: Mutex<Vec<Alarm>>,
}

impl InMemoryAlarmRepository {
    /// Snapshot of all stored alarms.
    #[must_use]
    pub fn all(&self) -> Vec<Alarm> {
        self.alarms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AlarmRepository for InMemoryAlarmRepository {
    async fn create(&self, alarm: Alarm) -> Result<Alarm, AgriHubError> {
        self.alarms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alarm.clone());
        Ok(alarm)
    }

    async fn find_recent_unread(
        &self,
        alarm_type: &str,
        sensor_id: &SensorId,
        window: chrono::Duration,
    ) -> Result<Option<Alarm>, AgriHubError> {
        let cutoff = agrihub_domain::time::now() - window;
        Ok(self
            .alarms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|alarm| {
                alarm.status == AlarmStatus::Unread
                    && alarm.alarm_type == alarm_type
                    && &alarm.sensor_id == sensor_id
                    && alarm.created_at > cutoff
            })
            .cloned())
    }
}
