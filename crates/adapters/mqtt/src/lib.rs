//! # agrihub-adapter-mqtt
//!
//! MQTT adapter — the live transport.
//!
//! ## Responsibilities
//! - Connect to the broker and subscribe to `sensors/+/data`
//! - Decode sensor payloads into domain readings ([`MqttSource`])
//! - Publish fire-and-forget control messages to `actuators/{id}/control`
//!   and `robots/{id}/command` ([`MqttCommandPublisher`])
//!
//! A failed connect is reported to the caller, which is expected to fall
//! back to the synthetic source (`agrihub-adapter-virtual`).
//!
//! ## Dependency rule
//! Depends on `agrihub-app` (ports) and `agrihub-domain`. Never imported by
//! either.

mod config;
mod error;
mod publisher;
mod source;

pub use config::MqttConfig;
pub use error::MqttError;
pub use publisher::MqttCommandPublisher;
pub use source::MqttSource;
