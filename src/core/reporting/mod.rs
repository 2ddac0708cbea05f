//! Daily analytics and status reporting.
//!
//! The aggregator reduces the reading buffer plus a live snapshot into a
//! [`DailyReport`]; category reports describe the live snapshot alone.

pub mod analysis;
mod category;
mod daily;
mod delivery;
mod engine;

pub use analysis::{
    analyze, AnalysisPolicy, ComplianceAnalysis, ComplianceBaseline, NetworkAnalysis,
    PerformanceAnalysis, PerformanceGrade, ReportAnalysis, SystemHealth, TemperatureAnalysis,
    Trend, TrendAnalysis, TrendThresholds,
};
pub use category::{
    category_report, gpu_status, network_status, system_status, thermal_status, ReportCategory,
};
pub use daily::{DailyReport, ReportSummary};
pub use delivery::{
    validate_destination, DeliveryOutcome, LogDelivery, OutboxDelivery, OutboxMessage,
    ReportDelivery,
};
pub use engine::ReportingEngine;
