//! # agrihub-adapter-virtual
//!
//! Synthetic reading source — simulates a smart-farm sensor fleet for
//! development and for degraded mode when no broker is reachable.
//!
//! ## Provided sensors
//!
//! The default fleet mirrors a recommended greenhouse setup: temperature,
//! humidity, CO₂, PAR, solar radiation, soil moisture, soil EC, soil pH,
//! wind speed, and wind direction. Values drift by a per-sensor trend and
//! bounce off their configured bounds.
//!
//! ## Dependency rule
//! Depends on `agrihub-app` (port traits) and `agrihub-domain` only.

mod sensor;
mod source;

pub use sensor::{SimulatedSensor, default_fleet};
pub use source::SyntheticSource;
