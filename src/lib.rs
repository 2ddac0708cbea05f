// APE Monitor Library - Public API

// Re-export error types
pub mod error;
pub use error::{ApeError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::ApeConfig;
pub use crate::core::reporting::{DailyReport, ReportCategory, ReportingEngine};
pub use crate::core::system_monitor::{LiveMetricsSnapshot, MetricKind, MetricReading};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
