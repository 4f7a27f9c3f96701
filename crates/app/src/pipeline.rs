//! Pipeline coordinator — drives readings through engine, monitor, and hub.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use agrihub_domain::event::HubEvent;
use agrihub_domain::reading::SensorReading;

use crate::alarm_monitor::AlarmMonitor;
use crate::dispatcher::CommandDispatcher;
use crate::hub::BroadcastHub;
use crate::ports::{
    ActuatorRepository, AlarmRepository, CommandPublisher, ObserverSink, ReadingSource,
    RuleRepository, ThresholdRepository,
};
use crate::rule_engine::RuleEngine;
use crate::rule_store::{RuleStore, ThresholdStore};

/// Lifecycle of the processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Everything the pipeline loop needs, shared by reference counting.
pub struct PipelineContext<R, T, AC, AL, P, S> {
    pub rules: Arc<RuleStore<R>>,
    pub thresholds: Arc<ThresholdStore<T>>,
    pub monitor: Arc<AlarmMonitor<T, AL>>,
    pub dispatcher: Arc<CommandDispatcher<AC, P>>,
    pub hub: Arc<BroadcastHub<S>>,
    /// How often the rule and threshold snapshots are refreshed.
    pub reload_interval: Duration,
}

impl<R, T, AC, AL, P, S> Clone for PipelineContext<R, T, AC, AL, P, S> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            thresholds: Arc::clone(&self.thresholds),
            monitor: Arc::clone(&self.monitor),
            dispatcher: Arc::clone(&self.dispatcher),
            hub: Arc::clone(&self.hub),
            reload_interval: self.reload_interval,
        }
    }
}

/// Handle to the running pipeline.
///
/// The loop consumes readings one at a time, so readings are processed in
/// arrival order; no reading from a sensor overtakes an earlier one.
/// Periodically the rule and threshold snapshots are refreshed from the
/// store. [`Pipeline::stop`] finishes the reading in flight before the
/// loop exits.
pub struct Pipeline {
    state: Arc<StdMutex<PipelineState>>,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Pipeline {
    /// Load initial snapshots and spawn the processing loop.
    ///
    /// A failing store is not fatal: the pipeline starts with whatever
    /// snapshot it has (possibly empty) and retries at the next reload
    /// tick.
    pub async fn start<R, T, AC, AL, P, S, Src>(
        ctx: PipelineContext<R, T, AC, AL, P, S>,
        source: Src,
    ) -> Self
    where
        R: RuleRepository + 'static,
        T: ThresholdRepository + 'static,
        AC: ActuatorRepository + 'static,
        AL: AlarmRepository + 'static,
        P: CommandPublisher + 'static,
        S: ObserverSink,
        Src: ReadingSource + 'static,
    {
        let state = Arc::new(StdMutex::new(PipelineState::Starting));
        tracing::info!("pipeline starting");

        match ctx.rules.load().await {
            Ok(count) => tracing::info!(count, "rules loaded"),
            Err(error) => tracing::warn!(%error, "starting with empty rule set"),
        }
        match ctx.thresholds.load().await {
            Ok(count) => tracing::info!(count, "alarm thresholds loaded"),
            Err(error) => tracing::warn!(%error, "starting with empty threshold set"),
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(ctx, source, shutdown_rx, Arc::clone(&state)));
        *state.lock().unwrap_or_else(PoisonError::into_inner) = PipelineState::Running;
        tracing::info!("pipeline running");

        Self {
            state,
            shutdown,
            handle,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stop the loop and wait for the reading in flight to finish.
    pub async fn stop(self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = PipelineState::Stopping;
        tracing::info!("pipeline stopping");
        let _ = self.shutdown.send(true);
        if let Err(error) = self.handle.await {
            tracing::warn!(%error, "pipeline task failed");
        }
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = PipelineState::Stopped;
        tracing::info!("pipeline stopped");
    }
}

async fn run_loop<R, T, AC, AL, P, S, Src>(
    ctx: PipelineContext<R, T, AC, AL, P, S>,
    mut source: Src,
    mut shutdown: watch::Receiver<bool>,
    state: Arc<StdMutex<PipelineState>>,
) where
    R: RuleRepository,
    T: ThresholdRepository,
    AC: ActuatorRepository,
    AL: AlarmRepository,
    P: CommandPublisher,
    S: ObserverSink,
    Src: ReadingSource,
{
    let engine = RuleEngine::new(Arc::clone(&ctx.rules));
    let mut reload = tokio::time::interval(ctx.reload_interval);
    // The first tick fires immediately; the snapshots were just loaded.
    reload.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = reload.tick() => reload_snapshots(&ctx).await,
            reading = source.recv() => match reading {
                Some(reading) => process_reading(&ctx, &engine, reading).await,
                None => {
                    tracing::warn!("reading source closed");
                    break;
                }
            }
        }
    }
    *state.lock().unwrap_or_else(PoisonError::into_inner) = PipelineState::Stopped;
}

async fn reload_snapshots<R, T, AC, AL, P, S>(ctx: &PipelineContext<R, T, AC, AL, P, S>)
where
    R: RuleRepository,
    T: ThresholdRepository,
{
    match ctx.rules.load().await {
        Ok(count) => tracing::debug!(count, "rules reloaded"),
        Err(error) => tracing::warn!(%error, "rule reload failed, keeping previous snapshot"),
    }
    match ctx.thresholds.load().await {
        Ok(count) => tracing::debug!(count, "alarm thresholds reloaded"),
        Err(error) => {
            tracing::warn!(%error, "threshold reload failed, keeping previous snapshot");
        }
    }
}

/// One reading's trip through the pipeline: echo it to observers, fire
/// matching rules, then check alarm thresholds.
async fn process_reading<R, T, AC, AL, P, S>(
    ctx: &PipelineContext<R, T, AC, AL, P, S>,
    engine: &RuleEngine<R>,
    reading: SensorReading,
) where
    R: RuleRepository,
    T: ThresholdRepository,
    AC: ActuatorRepository,
    AL: AlarmRepository,
    P: CommandPublisher,
    S: ObserverSink,
{
    tracing::debug!(
        sensor_id = %reading.sensor_id,
        sensor_type = %reading.sensor_type,
        value = reading.value,
        "processing reading"
    );
    ctx.hub.broadcast(&HubEvent::sensor_update(reading.clone()));

    for action in engine.evaluate(&reading) {
        let event = ctx.dispatcher.dispatch(&action).await;
        ctx.hub.broadcast(&event);
    }

    for alarm in ctx.monitor.check(&reading).await {
        ctx.hub.broadcast(&HubEvent::alarm(alarm));
    }
}
