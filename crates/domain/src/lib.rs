//! # agrihub-domain
//!
//! Pure domain model for the agrihub smart-farm automation core.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **SensorReading** (one timestamped sample from a sensor)
//! - Define **Rules** (condition tree → action, with priority and enabled flag)
//! - Define **Alarms** and **AlarmThresholds** (min/max bands with severity)
//! - Define the **HubEvent** envelope fanned out to live observers
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod alarm;
pub mod event;
pub mod reading;
pub mod rule;
