//! In-memory threshold repository and the default greenhouse bands.

use std::sync::{Mutex, PoisonError};

use agrihub_app::ports::ThresholdRepository;
use agrihub_domain::alarm::{AlarmThreshold, Severity};
use agrihub_domain::error::AgriHubError;

/// The default alarm bands: a warning band nested inside a wider critical
/// band for temperature and soil moisture, a single warning band for
/// humidity.
#[must_use]
pub fn default_thresholds() -> Vec<AlarmThreshold> {
    vec![
        AlarmThreshold::new("temperature", Some(10.0), Some(35.0), Severity::Warning),
        AlarmThreshold::new("temperature", Some(5.0), Some(40.0), Severity::Critical),
        AlarmThreshold::new("humidity", Some(40.0), Some(80.0), Severity::Warning),
        AlarmThreshold::new("soil_moisture", Some(20.0), Some(60.0), Severity::Warning),
        AlarmThreshold::new("soil_moisture", Some(15.0), Some(70.0), Severity::Critical),
    ]
}

/// Seedable threshold storage.
#[derive(Debug, Default)]
pub struct InMemoryThresholdRepository {
    thresholds: Mutex<Vec<AlarmThreshold>>,
}

impl InMemoryThresholdRepository {
    #[must_use]
    pub fn new(thresholds: Vec<AlarmThreshold>) -> Self {
        Self {
            thresholds: Mutex::new(thresholds),
        }
    }

    /// Repository seeded with [`default_thresholds`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(default_thresholds())
    }
}

impl ThresholdRepository for InMemoryThresholdRepository {
    async fn get_all(&self) -> Result<Vec<AlarmThreshold>, AgriHubError> {
        Ok(self
            .thresholds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
