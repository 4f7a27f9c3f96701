//! Reading source port — a lazy, infinite stream of sensor readings.

use std::future::Future;

use agrihub_domain::reading::SensorReading;

/// Produces timestamped sensor readings, one at a time.
///
/// The sequence is lazy, infinite, and non-restartable: implementations
/// keep producing until closed, after which [`recv`](Self::recv) returns
/// `None` forever. Readings from a single sensor are delivered in arrival
/// order.
///
/// Two interchangeable implementations exist: the live broker subscription
/// (`agrihub-adapter-mqtt`) and the synthetic generator
/// (`agrihub-adapter-virtual`).
pub trait ReadingSource: Send {
    /// Wait for the next reading. Returns `None` once the source is closed.
    fn recv(&mut self) -> impl Future<Output = Option<SensorReading>> + Send;
}
