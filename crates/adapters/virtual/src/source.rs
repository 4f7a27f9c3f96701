//! Synthetic reading source driven by a tokio interval.

use std::collections::VecDeque;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::{Instant, Interval, interval_at};

use agrihub_app::ports::ReadingSource;
use agrihub_domain::reading::SensorReading;

use crate::sensor::{SimulatedSensor, default_fleet};

/// Infinite reading source over a simulated sensor fleet.
///
/// Emits one reading per sensor immediately, then steps the whole fleet
/// once per tick. The source never closes: `recv` always produces another
/// reading eventually.
pub struct SyntheticSource {
    sensors: Vec<SimulatedSensor>,
    rng: StdRng,
    interval: Interval,
    pending: VecDeque<SensorReading>,
}

impl SyntheticSource {
    /// Create a source over `sensors`, stepping every `tick`.
    #[must_use]
    pub fn new(sensors: Vec<SimulatedSensor>, tick: Duration) -> Self {
        tracing::info!(sensors = sensors.len(), ?tick, "using synthetic sensor fleet");
        let pending = sensors.iter().map(SimulatedSensor::reading).collect();
        Self {
            sensors,
            rng: StdRng::from_entropy(),
            interval: interval_at(Instant::now() + tick, tick),
            pending,
        }
    }

    /// Create a source over the default greenhouse fleet.
    #[must_use]
    pub fn with_default_fleet(tick: Duration) -> Self {
        Self::new(default_fleet(), tick)
    }
}

impl ReadingSource for SyntheticSource {
    async fn recv(&mut self) -> Option<SensorReading> {
        loop {
            if let Some(reading) = self.pending.pop_front() {
                return Some(reading);
            }
            self.interval.tick().await;
            for sensor in &mut self.sensors {
                sensor.step(&mut self.rng);
                self.pending.push_back(sensor.reading());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrihub_domain::id::SensorId;

    #[tokio::test(start_paused = true)]
    async fn should_emit_initial_reading_for_each_sensor() {
        let mut source = SyntheticSource::with_default_fleet(Duration::from_secs(30));
        for index in 1..=10 {
            let reading = source.recv().await.unwrap();
            assert_eq!(reading.sensor_id, SensorId::new(index.to_string()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_produce_next_batch_after_a_tick() {
        let mut source = SyntheticSource::with_default_fleet(Duration::from_secs(30));
        for _ in 0..10 {
            source.recv().await.unwrap();
        }
        // Paused time auto-advances to the next tick when the runtime idles.
        let reading = source.recv().await.unwrap();
        assert_eq!(reading.sensor_id, SensorId::new("1"));
        assert_eq!(reading.sensor_type, "temperature");
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_emitted_values_within_sensor_bounds() {
        let bounds = |sensor_type: &str| match sensor_type {
            "temperature" => (20.0, 35.0),
            "humidity" => (40.0, 80.0),
            "co2" => (350.0, 1200.0),
            "par" => (0.0, 2000.0),
            "solar_radiation" => (0.0, 1500.0),
            "soil_moisture" => (15.0, 70.0),
            "soil_ec" => (0.5, 3.0),
            "soil_ph" => (5.0, 8.0),
            "wind_speed" => (0.0, 15.0),
            "wind_direction" => (0.0, 360.0),
            other => panic!("unexpected sensor type {other}"),
        };
        let mut source = SyntheticSource::with_default_fleet(Duration::from_secs(30));
        for _ in 0..50 {
            let reading = source.recv().await.unwrap();
            let (min, max) = bounds(&reading.sensor_type);
            assert!(
                reading.value >= min && reading.value <= max,
                "{} out of bounds: {}",
                reading.sensor_type,
                reading.value
            );
        }
    }
}
