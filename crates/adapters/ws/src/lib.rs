//! # agrihub-adapter-ws
//!
//! WebSocket adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve `/ws` and upgrade connections into observer registrations
//! - Back each connection's [`ObserverSink`] with a bounded channel drained
//!   by a per-connection writer task, so a slow client never blocks the
//!   broadcast path
//! - Accept (and acknowledge by doing nothing) the client `subscribe` /
//!   `unsubscribe` frames; every observer receives every event
//!
//! ## Dependency rule
//! Depends on `agrihub-app` (hub and sink port) and `agrihub-domain`. Never
//! leaks axum types into the application layer.
//!
//! [`ObserverSink`]: agrihub_app::ports::ObserverSink

mod router;
mod sink;
mod socket;

pub use router::build;
pub use sink::WsSink;
