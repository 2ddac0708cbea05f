//! Simulated system monitoring.
//!
//! This module provides the simulated hardware state, the bounded reading
//! buffer, alert rules and the runtime that drives the simulation on a timer.

mod activity;
pub mod alerts;
mod estimator;
mod history;
mod metrics;
mod runtime;
mod simulation;

pub use activity::{ActivityLog, LogEntry, LogSink};
pub use alerts::{
    evaluate_alerts, evaluate_health_alerts, Alert, AlertCategory, AlertConfig, AlertSeverity,
    HealthAlerts, HealthInputs,
};
pub use estimator::{Estimator, FixedEstimator, RandomEstimator};
pub use history::{ReadingBuffer, DEFAULT_BUFFER_CAPACITY};
pub use metrics::{
    GpuMetrics, LiveMetricsSnapshot, MetricKind, MetricReading, NetworkMetrics, PerformanceMode,
    SystemMetrics,
};
pub use runtime::{SimulationControl, SimulationRuntime};
pub use simulation::{FanMode, SimulationState, Simulator};
