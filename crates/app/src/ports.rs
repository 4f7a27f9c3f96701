//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod observer;
pub mod publish;
pub mod source;
pub mod store;

pub use observer::{ObserverSink, SinkClosed};
pub use publish::{CommandPublisher, NoopPublisher};
pub use source::ReadingSource;
pub use store::{ActuatorRepository, AlarmRepository, RuleRepository, ThresholdRepository};
