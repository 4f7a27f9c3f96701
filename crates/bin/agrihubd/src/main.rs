//! # agrihubd — agrihub daemon
//!
//! Composition root that wires the adapters together and runs the pipeline.
//!
//! ## Responsibilities
//! - Load configuration (`agrihub.toml` + env overrides)
//! - Construct the in-memory repositories and the snapshot stores
//! - Pick the reading source: live MQTT, falling back to the synthetic
//!   fleet when the broker is unreachable or disabled
//! - Start the pipeline, serve the WebSocket endpoint, and stop both
//!   gracefully on SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use agrihub_adapter_memory::{
    InMemoryActuatorRepository, InMemoryAlarmRepository, InMemoryRuleRepository,
    InMemoryThresholdRepository,
};
use agrihub_adapter_mqtt::MqttSource;
use agrihub_adapter_virtual::SyntheticSource;
use agrihub_adapter_ws::WsSink;
use agrihub_app::alarm_monitor::AlarmMonitor;
use agrihub_app::dispatcher::CommandDispatcher;
use agrihub_app::hub::BroadcastHub;
use agrihub_app::pipeline::{Pipeline, PipelineContext};
use agrihub_app::ports::NoopPublisher;
use agrihub_app::rule_store::{RuleStore, ThresholdStore};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Repositories — in-memory; the collaborator store plugs in here.
    let rule_repo = Arc::new(InMemoryRuleRepository::default());
    let threshold_repo = Arc::new(InMemoryThresholdRepository::with_defaults());
    let actuator_repo = Arc::new(InMemoryActuatorRepository::default());
    let alarm_repo = Arc::new(InMemoryAlarmRepository::default());

    // Pipeline components.
    let rules = Arc::new(RuleStore::new(rule_repo));
    let thresholds = Arc::new(ThresholdStore::new(threshold_repo));
    let monitor = Arc::new(AlarmMonitor::new(
        Arc::clone(&thresholds),
        alarm_repo,
        chrono::Duration::seconds(config.pipeline.dedup_window_secs),
    ));
    let hub: Arc<BroadcastHub<WsSink>> = Arc::new(BroadcastHub::new());
    let reload_interval = Duration::from_secs(config.pipeline.reload_interval_secs);
    let simulator_tick = Duration::from_secs(config.simulator.tick_secs);

    // Reading source: live broker first, synthetic fleet as fallback. The
    // publisher rides the same connection, so degraded mode also swaps in
    // the no-op publisher.
    let live = if config.mqtt.enabled {
        match MqttSource::connect(&config.mqtt.connection).await {
            Ok(connection) => Some(connection),
            Err(error) => {
                tracing::warn!(%error, "MQTT unavailable, falling back to synthetic sensors");
                None
            }
        }
    } else {
        None
    };

    let pipeline = match live {
        Some((source, publisher)) => {
            let ctx = PipelineContext {
                rules,
                thresholds,
                monitor,
                dispatcher: Arc::new(CommandDispatcher::new(actuator_repo, publisher)),
                hub: Arc::clone(&hub),
                reload_interval,
            };
            Pipeline::start(ctx, source).await
        }
        None => {
            let ctx = PipelineContext {
                rules,
                thresholds,
                monitor,
                dispatcher: Arc::new(CommandDispatcher::new(actuator_repo, NoopPublisher)),
                hub: Arc::clone(&hub),
                reload_interval,
            };
            Pipeline::start(ctx, SyntheticSource::with_default_fleet(simulator_tick)).await
        }
    };

    let app = agrihub_adapter_ws::build(hub);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "agrihubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pipeline.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
