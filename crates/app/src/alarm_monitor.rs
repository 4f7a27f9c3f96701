//! Alarm monitor — threshold checks with a deduplication window.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;

use agrihub_domain::alarm::{Alarm, BoundViolation};
use agrihub_domain::id::SensorId;
use agrihub_domain::reading::SensorReading;

use crate::ports::{AlarmRepository, ThresholdRepository};
use crate::rule_store::ThresholdStore;

/// Checks readings against alarm thresholds and raises deduplicated alarms.
///
/// At most one alarm per `(sensor type, sensor id)` pair is raised within
/// the dedup window. The lookup-then-create sequence for a pair runs under
/// a per-pair async lock, so two concurrent checks for the same pair cannot
/// both pass the duplicate lookup. Checks for distinct pairs proceed in
/// parallel.
pub struct AlarmMonitor<T, A> {
    thresholds: Arc<ThresholdStore<T>>,
    alarms: A,
    dedup_window: chrono::Duration,
    // One entry per (sensor type, sensor id) pair ever seen; bounded by the
    // fleet size, so entries are never reclaimed.
    locks: StdMutex<HashMap<(String, SensorId), Arc<AsyncMutex<()>>>>,
}

impl<T, A> AlarmMonitor<T, A>
where
    T: ThresholdRepository,
    A: AlarmRepository,
{
    /// Create a monitor over a shared threshold snapshot.
    pub fn new(thresholds: Arc<ThresholdStore<T>>, alarms: A, dedup_window: chrono::Duration) -> Self {
        Self {
            thresholds,
            alarms,
            dedup_window,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Check one reading against every threshold for its sensor type.
    ///
    /// Returns the alarms raised by this reading, already persisted when the
    /// store cooperated. Store failures are logged and never stop the check:
    /// an alarm that could not be persisted is still returned so it reaches
    /// live observers.
    pub async fn check(&self, reading: &SensorReading) -> Vec<Alarm> {
        let bands = self.thresholds.for_type(&reading.sensor_type);
        if bands.is_empty() {
            return Vec::new();
        }

        let lock = self.lock_for(reading);
        let _guard = lock.lock().await;

        let mut raised = Vec::new();
        for band in &bands {
            let Some(violation) = band.violation(reading.value) else {
                continue;
            };
            match self
                .alarms
                .find_recent_unread(&reading.sensor_type, &reading.sensor_id, self.dedup_window)
                .await
            {
                Ok(Some(existing)) => {
                    tracing::debug!(
                        alarm_type = %reading.sensor_type,
                        sensor_id = %reading.sensor_id,
                        existing = %existing.id,
                        "duplicate alarm suppressed"
                    );
                    continue;
                }
                Ok(None) => {}
                Err(error) => {
                    // Treated as "no duplicate": a store outage must not
                    // silence alarms.
                    tracing::warn!(%error, "duplicate lookup failed");
                }
            }

            let alarm = Alarm::new(
                &reading.sensor_type,
                band.severity,
                violation_message(reading, &violation),
                reading.sensor_id.clone(),
            );
            tracing::info!(
                alarm_type = %alarm.alarm_type,
                severity = %alarm.severity,
                sensor_id = %alarm.sensor_id,
                "alarm raised"
            );
            match self.alarms.create(alarm.clone()).await {
                Ok(stored) => raised.push(stored),
                Err(error) => {
                    tracing::warn!(%error, alarm = %alarm.id, "failed to persist alarm");
                    raised.push(alarm);
                }
            }
        }
        raised
    }

    fn lock_for(&self, reading: &SensorReading) -> Arc<AsyncMutex<()>> {
        let key = (reading.sensor_type.clone(), reading.sensor_id.clone());
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key).or_default())
    }
}

fn violation_message(reading: &SensorReading, violation: &BoundViolation) -> String {
    let value = quantity(reading.value, reading.unit_str());
    match violation {
        BoundViolation::BelowMin(min) => format!(
            "{} is below minimum ({} < {})",
            reading.sensor_type,
            value,
            quantity(*min, reading.unit_str())
        ),
        BoundViolation::AboveMax(max) => format!(
            "{} is above maximum ({} > {})",
            reading.sensor_type,
            value,
            quantity(*max, reading.unit_str())
        ),
    }
}

fn quantity(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}
