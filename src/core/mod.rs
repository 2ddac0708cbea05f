// Core business logic module

pub mod config;
pub mod reporting;
pub mod system_monitor;

// Re-export commonly used items
pub use config::{ApeConfig, ConfigEditor};
pub use reporting::{DailyReport, ReportCategory, ReportingEngine};
pub use system_monitor::{LiveMetricsSnapshot, SimulationState, Simulator};
