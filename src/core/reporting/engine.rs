use std::sync::Arc;

use chrono::{DateTime, Local};
use log::Level;

use super::analysis::AnalysisPolicy;
use super::category::{category_report, ReportCategory};
use super::daily::DailyReport;
use super::delivery::{validate_destination, DeliveryOutcome, LogDelivery, ReportDelivery};
use crate::core::config::ApeConfig;
use crate::core::system_monitor::{
    ActivityLog, Estimator, LiveMetricsSnapshot, LogSink, MetricKind, MetricReading,
    RandomEstimator, ReadingBuffer,
};
use crate::error::{ApeError, Result};

const COMPONENT: &str = "REPORTS";

/// Owns the reading buffer and produces reports from it.
///
/// All methods take `&self`; share the engine behind an `Arc` between the
/// simulation loop and report consumers.
pub struct ReportingEngine {
    buffer: ReadingBuffer,
    estimator: Box<dyn Estimator>,
    policy: AnalysisPolicy,
    delivery: Box<dyn ReportDelivery>,
    log: Arc<dyn LogSink>,
    default_destination: Option<String>,
}

impl ReportingEngine {
    /// Engine with default policy, random estimator, mock mailer and activity log
    pub fn new() -> Self {
        Self {
            buffer: ReadingBuffer::new(),
            estimator: Box::new(RandomEstimator::new()),
            policy: AnalysisPolicy::default(),
            delivery: Box::new(LogDelivery),
            log: Arc::new(ActivityLog::new()),
            default_destination: None,
        }
    }

    pub fn from_config(config: &ApeConfig) -> Self {
        let estimator: Box<dyn Estimator> = match config.monitoring.seed {
            Some(seed) => Box::new(RandomEstimator::seeded(seed)),
            None => Box::new(RandomEstimator::new()),
        };

        Self {
            buffer: ReadingBuffer::with_capacity(config.monitoring.buffer_capacity),
            estimator,
            policy: config.analysis_policy(),
            default_destination: config.reporting.email.clone(),
            ..Self::new()
        }
    }

    pub fn with_estimator(mut self, estimator: impl Estimator + 'static) -> Self {
        self.estimator = Box::new(estimator);
        self
    }

    pub fn with_delivery(mut self, delivery: impl ReportDelivery + 'static) -> Self {
        self.delivery = Box::new(delivery);
        self
    }

    pub fn with_log_sink(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer = ReadingBuffer::with_capacity(capacity);
        self
    }

    pub fn with_policy(mut self, policy: AnalysisPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_default_destination(mut self, destination: Option<String>) -> Self {
        self.default_destination = destination;
        self
    }

    pub fn buffer(&self) -> &ReadingBuffer {
        &self.buffer
    }

    pub fn policy(&self) -> &AnalysisPolicy {
        &self.policy
    }

    pub fn record(&self, metric: MetricKind, component: &str, value: f64) {
        self.buffer.record(metric, component, value);
    }

    pub fn record_at(&self, timestamp: DateTime<Local>, metric: MetricKind, component: &str, value: f64) {
        self.buffer.record_at(timestamp, metric, component, value);
    }

    pub fn record_batch(&self, readings: Vec<MetricReading>) {
        self.buffer.extend(readings);
    }

    /// Record by textual tag. Unknown tags are logged and dropped.
    pub fn record_tagged(&self, tag: &str, component: &str, value: f64) -> bool {
        match tag.parse::<MetricKind>() {
            Ok(metric) => {
                self.record(metric, component, value);
                true
            }
            Err(e) => {
                self.log.add_log(
                    Level::Warn,
                    "MONITOR",
                    &format!("Ignoring reading from {}: {}", component, e),
                );
                false
            }
        }
    }

    pub fn generate_daily_report(&self, snapshot: &LiveMetricsSnapshot) -> DailyReport {
        self.generate_daily_report_at(Local::now(), snapshot)
    }

    /// Report for the calendar day of `now` over a snapshot of the buffer
    pub fn generate_daily_report_at(
        &self,
        now: DateTime<Local>,
        snapshot: &LiveMetricsSnapshot,
    ) -> DailyReport {
        let readings = self.buffer.readings_on(now.date_naive());
        let report = DailyReport::assemble(
            now,
            readings,
            snapshot,
            self.estimator.as_ref(),
            &self.policy,
        );

        self.log.add_log(
            Level::Info,
            COMPONENT,
            &format!(
                "Daily report generated for {}: {} readings, score {:.1} ({})",
                report.date,
                report.summary.total_readings,
                report.summary.average_performance,
                report.analysis.system_health.performance_grade
            ),
        );
        if report.summary.critical_events > 0 {
            self.log.add_log(
                Level::Warn,
                COMPONENT,
                &format!("{} critical issue(s) in daily report", report.summary.critical_events),
            );
        }

        report
    }

    pub fn generate_category_report(
        &self,
        category: ReportCategory,
        snapshot: &LiveMetricsSnapshot,
    ) -> String {
        let text = category_report(category, snapshot);
        self.log.add_log(
            Level::Info,
            COMPONENT,
            &format!("{} report generated", category),
        );
        text
    }

    /// Explicit destination wins over the configured one
    pub fn resolve_destination(&self, explicit: Option<&str>) -> Result<String> {
        let destination = explicit
            .map(str::to_string)
            .or_else(|| self.default_destination.clone())
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| ApeError::missing_delivery_target("report delivery"))?;

        validate_destination(&destination)?;
        Ok(destination.trim().to_string())
    }

    pub fn deliver_daily_report(
        &self,
        report: &DailyReport,
        destination: Option<&str>,
    ) -> DeliveryOutcome {
        let subject = format!("APE System Daily Report - {}", report.date);
        self.deliver(&subject, &report.to_text(), destination)
    }

    pub fn deliver_category_report(
        &self,
        category: ReportCategory,
        snapshot: &LiveMetricsSnapshot,
        destination: Option<&str>,
    ) -> DeliveryOutcome {
        let body = self.generate_category_report(category, snapshot);
        let subject = format!("APE System - {}", category.title());
        self.deliver(&subject, &body, destination)
    }

    fn deliver(&self, subject: &str, body: &str, destination: Option<&str>) -> DeliveryOutcome {
        let destination = match self.resolve_destination(destination) {
            Ok(destination) => destination,
            Err(e @ ApeError::MissingDeliveryTarget(_)) => {
                self.log.add_log(
                    Level::Warn,
                    "DELIVERY",
                    &format!("'{}' not sent: {}", subject, e),
                );
                return DeliveryOutcome::Skipped(e.to_string());
            }
            Err(e) => {
                self.log.add_log(Level::Error, "DELIVERY", &e.to_string());
                return DeliveryOutcome::Failed(e.to_string());
            }
        };

        match self.delivery.send(subject, body, &destination) {
            Ok(()) => {
                self.log.add_log(
                    Level::Info,
                    "DELIVERY",
                    &format!("'{}' sent to {}", subject, destination),
                );
                DeliveryOutcome::Sent { destination }
            }
            Err(e) => {
                self.log.add_log(
                    Level::Error,
                    "DELIVERY",
                    &format!("'{}' failed: {}", subject, e),
                );
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }
}

impl Default for ReportingEngine {
    fn default() -> Self {
        Self::new()
    }
}
