//! # agrihub-adapter-memory
//!
//! In-memory implementations of the store ports.
//!
//! The collaborator store owns schema and CRUD surfaces; these repositories
//! stand in for it during development, in degraded mode, and in tests. They
//! are seedable and fully thread-safe, but nothing survives a restart.
//!
//! ## Dependency rule
//! Depends on `agrihub-app` (port traits) and `agrihub-domain` only.

mod actuators;
mod alarms;
mod rules;
mod thresholds;

pub use actuators::InMemoryActuatorRepository;
pub use alarms::InMemoryAlarmRepository;
pub use rules::InMemoryRuleRepository;
pub use thresholds::{InMemoryThresholdRepository, default_thresholds};
