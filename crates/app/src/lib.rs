//! # agrihub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement (driven/outbound ports):
//!   - `ReadingSource` — a lazy, infinite stream of sensor readings
//!   - `RuleRepository` / `ThresholdRepository` — bulk loads from the
//!     collaborator store
//!   - `ActuatorRepository` / `AlarmRepository` — persistence calls consumed
//!     by the pipeline
//!   - `CommandPublisher` — fire-and-forget outbound control messages
//!   - `ObserverSink` — one live observer connection's send half
//! - Provide the pipeline components:
//!   - `RuleStore` / `ThresholdStore` — atomically swapped snapshots
//!   - `RuleEngine` — condition-tree evaluation per reading
//!   - `AlarmMonitor` — threshold checks with per-key dedup serialization
//!   - `CommandDispatcher` — actions → persisted state + control messages
//!   - `BroadcastHub` — observer registry and event fan-out
//!   - `Pipeline` — the ingestion-to-effects coordinator
//!
//! ## Dependency rule
//! Depends on `agrihub-domain` only (plus `tokio::sync`/`tokio::time` for
//! channels and timers). Never imports adapter crates. Adapters depend on
//! *this* crate, not the reverse.

pub mod alarm_monitor;
pub mod dispatcher;
pub mod hub;
pub mod pipeline;
pub mod ports;
pub mod rule_engine;
pub mod rule_store;
