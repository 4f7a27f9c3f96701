//! Simulated sensors and the default fleet.

use rand::Rng;

use agrihub_domain::reading::SensorReading;

/// Direction a simulated value is drifting in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trend {
    Up,
    Down,
    Stable,
}

/// One simulated sensor with bounded random-walk behaviour.
///
/// Upward and downward trends drift by up to 0.5 per step, a stable trend
/// jitters by up to ±0.15. Values bounce off their bounds (the trend flips
/// there) and the trend is re-rolled with 10% probability each step.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    id: String,
    sensor_type: String,
    unit: String,
    value: f64,
    min: f64,
    max: f64,
    pub(crate) trend: Trend,
}

impl SimulatedSensor {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        sensor_type: impl Into<String>,
        unit: impl Into<String>,
        value: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            id: id.into(),
            sensor_type: sensor_type.into(),
            unit: unit.into(),
            value,
            min,
            max,
            trend: Trend::Stable,
        }
    }

    /// Advance the simulation by one step.
    pub(crate) fn step<R: Rng>(&mut self, rng: &mut R) {
        let change = match self.trend {
            Trend::Up => rng.r#gen::<f64>() * 0.5,
            Trend::Down => -rng.r#gen::<f64>() * 0.5,
            Trend::Stable => (rng.r#gen::<f64>() - 0.5) * 0.3,
        };
        self.value += change;

        if self.value < self.min {
            self.value = self.min;
            self.trend = Trend::Up;
        } else if self.value > self.max {
            self.value = self.max;
            self.trend = Trend::Down;
        }

        if rng.r#gen::<f64>() < 0.1 {
            self.trend = match rng.gen_range(0..3u8) {
                0 => Trend::Up,
                1 => Trend::Down,
                _ => Trend::Stable,
            };
        }
    }

    /// Current value as a reading, rounded to two decimals like a real
    /// gateway would report it.
    #[must_use]
    pub fn reading(&self) -> SensorReading {
        SensorReading::new(
            self.id.as_str(),
            self.sensor_type.as_str(),
            (self.value * 100.0).round() / 100.0,
            Some(self.unit.clone()),
        )
    }
}

/// The ten-sensor greenhouse fleet used by default.
#[must_use]
pub fn default_fleet() -> Vec<SimulatedSensor> {
    vec![
        SimulatedSensor::new("1", "temperature", "℃", 25.0, 20.0, 35.0),
        SimulatedSensor::new("2", "humidity", "%", 60.0, 40.0, 80.0),
        SimulatedSensor::new("3", "co2", "ppm", 400.0, 350.0, 1200.0),
        SimulatedSensor::new("4", "par", "μmol/m²/s", 500.0, 0.0, 2000.0),
        SimulatedSensor::new("5", "solar_radiation", "W/m²", 800.0, 0.0, 1500.0),
        SimulatedSensor::new("6", "soil_moisture", "%", 40.0, 15.0, 70.0),
        SimulatedSensor::new("7", "soil_ec", "dS/m", 1.5, 0.5, 3.0),
        SimulatedSensor::new("8", "soil_ph", "pH", 6.5, 5.0, 8.0),
        SimulatedSensor::new("9", "wind_speed", "m/s", 2.5, 0.0, 15.0),
        SimulatedSensor::new("10", "wind_direction", "°", 180.0, 0.0, 360.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrihub_domain::id::SensorId;
    use rand::rngs::mock::StepRng;

    // A constant stream of u64::MAX / 2 makes gen::<f64>() return ~0.5,
    // which keeps the 10% trend re-roll from ever firing.
    fn midpoint_rng() -> StepRng {
        StepRng::new(u64::MAX / 2, 0)
    }

    #[test]
    fn should_keep_stable_sensor_near_its_value() {
        let mut sensor = SimulatedSensor::new("1", "temperature", "℃", 25.0, 20.0, 35.0);
        let mut rng = midpoint_rng();
        for _ in 0..10 {
            sensor.step(&mut rng);
        }
        // Stable change is (0.5 - 0.5) * 0.3 = 0 per step.
        assert!((sensor.value - 25.0).abs() < 1e-9);
        assert_eq!(sensor.trend, Trend::Stable);
    }

    #[test]
    fn should_drift_upward_under_up_trend() {
        let mut sensor = SimulatedSensor::new("1", "temperature", "℃", 25.0, 20.0, 35.0);
        sensor.trend = Trend::Up;
        let mut rng = midpoint_rng();
        sensor.step(&mut rng);
        // Up change is 0.5 * 0.5 = 0.25 per step.
        assert!((sensor.value - 25.25).abs() < 1e-9);
    }

    #[test]
    fn should_clamp_at_max_and_flip_trend_down() {
        let mut sensor = SimulatedSensor::new("1", "temperature", "℃", 34.9, 20.0, 35.0);
        sensor.trend = Trend::Up;
        let mut rng = midpoint_rng();
        sensor.step(&mut rng);
        assert_eq!(sensor.value, 35.0);
        assert_eq!(sensor.trend, Trend::Down);
    }

    #[test]
    fn should_clamp_at_min_and_flip_trend_up() {
        let mut sensor = SimulatedSensor::new("6", "soil_moisture", "%", 15.1, 15.0, 70.0);
        sensor.trend = Trend::Down;
        let mut rng = midpoint_rng();
        sensor.step(&mut rng);
        assert_eq!(sensor.value, 15.0);
        assert_eq!(sensor.trend, Trend::Up);
    }

    #[test]
    fn should_round_reading_to_two_decimals() {
        let mut sensor = SimulatedSensor::new("8", "soil_ph", "pH", 6.5, 5.0, 8.0);
        sensor.value = 6.123_456;
        let reading = sensor.reading();
        assert_eq!(reading.value, 6.12);
        assert_eq!(reading.sensor_id, SensorId::new("8"));
        assert_eq!(reading.unit.as_deref(), Some("pH"));
    }

    #[test]
    fn should_provide_ten_default_sensors() {
        let fleet = default_fleet();
        assert_eq!(fleet.len(), 10);
        let types: Vec<&str> = fleet.iter().map(|s| s.sensor_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "temperature",
                "humidity",
                "co2",
                "par",
                "solar_radiation",
                "soil_moisture",
                "soil_ec",
                "soil_ph",
                "wind_speed",
                "wind_direction",
            ]
        );
        for (index, sensor) in fleet.iter().enumerate() {
            assert_eq!(sensor.id, (index + 1).to_string());
            assert!(sensor.min <= sensor.value && sensor.value <= sensor.max);
        }
    }

    #[test]
    fn should_stay_within_bounds_over_many_steps() {
        let mut sensor = SimulatedSensor::new("9", "wind_speed", "m/s", 2.5, 0.0, 15.0);
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            sensor.step(&mut rng);
            assert!(sensor.value >= 0.0 && sensor.value <= 15.0);
        }
    }
}
