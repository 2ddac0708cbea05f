//! Tokio runtime that drives the simulation on a timer.
//!
//! Each tick advances the simulator, records its readings into the reporting
//! engine and publishes the new live snapshot on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::{broadcast, watch};
use tokio::time::{interval, MissedTickBehavior};

use super::metrics::{LiveMetricsSnapshot, PerformanceMode};
use super::simulation::Simulator;
use crate::core::reporting::ReportingEngine;
use crate::error::{ApeError, Result};

/// Operator controls applied on the next tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationControl {
    pub performance_mode: PerformanceMode,
    /// `None` keeps the fan on its automatic curve
    pub manual_fan_speed: Option<f64>,
}

/// Wrapper around the Tokio runtime running the simulation loop.
pub struct SimulationRuntime {
    /// Receiver for live snapshots
    pub snapshot_rx: watch::Receiver<Arc<LiveMetricsSnapshot>>,

    /// Sender for operator controls
    control_tx: watch::Sender<SimulationControl>,

    /// Shutdown signal sender
    shutdown_tx: broadcast::Sender<()>,

    /// Handle to the runtime (for shutdown)
    _runtime_handle: tokio::runtime::Runtime,
}

impl SimulationRuntime {
    /// Start ticking every `tick_interval`, recording into `engine`.
    pub fn start(
        engine: Arc<ReportingEngine>,
        tick_interval: Duration,
        seed: Option<u64>,
    ) -> Result<Self> {
        if tick_interval.is_zero() {
            return Err(ApeError::runtime("tick interval must be greater than zero"));
        }

        log::info!(
            "Starting simulation runtime (tick every {}ms)",
            tick_interval.as_millis()
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .thread_name("ape-simulation")
            .build()
            .map_err(|e| ApeError::runtime(format!("failed to build tokio runtime: {}", e)))?;

        let simulator = Simulator::new(tick_interval, seed);
        let initial = simulator.state().snapshot(Local::now());

        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial));
        let (control_tx, control_rx) = watch::channel(SimulationControl::default());
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        runtime.spawn(simulation_task(
            simulator,
            engine,
            snapshot_tx,
            control_rx,
            shutdown_tx.subscribe(),
        ));

        Ok(Self {
            snapshot_rx,
            control_tx,
            shutdown_tx,
            _runtime_handle: runtime,
        })
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> Arc<LiveMetricsSnapshot> {
        self.snapshot_rx.borrow().clone()
    }

    pub fn set_performance_mode(&self, mode: PerformanceMode) {
        self.control_tx.send_modify(|control| control.performance_mode = mode);
    }

    pub fn set_manual_fan_speed(&self, speed: Option<f64>) {
        self.control_tx.send_modify(|control| control.manual_fan_speed = speed);
    }

    /// Shutdown the runtime gracefully.
    pub fn shutdown(self) {
        log::info!("Shutting down simulation runtime");
        let _ = self.shutdown_tx.send(());
        // Runtime will shutdown when dropped
    }
}

async fn simulation_task(
    mut simulator: Simulator,
    engine: Arc<ReportingEngine>,
    snapshot_tx: watch::Sender<Arc<LiveMetricsSnapshot>>,
    mut control_rx: watch::Receiver<SimulationControl>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(simulator.state().tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if control_rx.has_changed().unwrap_or(false) {
                    let control = control_rx.borrow_and_update().clone();
                    let state = simulator.state_mut();
                    state.set_performance_mode(control.performance_mode);
                    state.set_manual_fan_speed(control.manual_fan_speed);
                    log::debug!("Applied simulation controls: {:?}", control);
                }

                let (snapshot, readings) = simulator.step(Local::now());
                engine.record_batch(readings);

                // watch::send() only fails if there are no receivers (which is fine)
                let _ = snapshot_tx.send(Arc::new(snapshot));
            }
            _ = shutdown.recv() => {
                log::debug!("Simulation task shutting down");
                break;
            }
        }
    }
}
