use std::fmt::Write as _;

use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::analysis::{analyze, AnalysisPolicy, ReportAnalysis};
use crate::core::system_monitor::{Estimator, LiveMetricsSnapshot, MetricReading};

const RECOMMENDED_ACTIONS_LIMIT: usize = 5;
const MAINTENANCE_INTERVAL_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_readings: usize,
    pub system_uptime: u64, // seconds
    pub critical_events: usize,
    pub warning_events: usize,
    pub average_performance: f64,
    pub energy_consumption: f64, // Wh, naive 24h projection of current draw
    pub recommended_actions: Vec<String>,
    pub next_maintenance_date: NaiveDate,
}

/// Aggregated analysis of one calendar day's readings plus the live state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub generated_at: DateTime<Local>,
    pub readings: Vec<MetricReading>,
    pub analysis: ReportAnalysis,
    pub summary: ReportSummary,
}

impl DailyReport {
    /// Build the report for the day of `now`.
    ///
    /// `readings` may hold other days; only entries dated `now`'s day are kept.
    pub fn assemble(
        now: DateTime<Local>,
        readings: Vec<MetricReading>,
        snapshot: &LiveMetricsSnapshot,
        estimator: &dyn Estimator,
        policy: &AnalysisPolicy,
    ) -> Self {
        let date = now.date_naive();
        let readings: Vec<MetricReading> = readings
            .into_iter()
            .filter(|r| r.timestamp.date_naive() == date)
            .collect();

        let analysis = analyze(&readings, snapshot, estimator, policy);
        let summary = summarize(date, readings.len(), &analysis, snapshot);

        Self {
            date,
            generated_at: now,
            readings,
            analysis,
            summary,
        }
    }

    /// Pretty JSON with the camelCase field names of the dashboard
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text rendering used as a delivery body
    pub fn to_text(&self) -> String {
        let a = &self.analysis;
        let s = &self.summary;
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "APE SYSTEM DAILY REPORT - {}", self.date);
        let _ = writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out);
        let _ = writeln!(out, "SUMMARY");
        let _ = writeln!(out, "  Total readings:      {}", s.total_readings);
        let _ = writeln!(out, "  System uptime:       {}s", s.system_uptime);
        let _ = writeln!(out, "  Critical events:     {}", s.critical_events);
        let _ = writeln!(out, "  Warning events:      {}", s.warning_events);
        let _ = writeln!(out, "  Average performance: {:.1}", s.average_performance);
        let _ = writeln!(out, "  Energy consumption:  {:.1} Wh", s.energy_consumption);
        let _ = writeln!(out, "  Next maintenance:    {}", s.next_maintenance_date);
        let _ = writeln!(out);
        let _ = writeln!(out, "TEMPERATURE");
        let _ = writeln!(
            out,
            "  Average {:.1}°C, peak {:.1}°C, minimum {:.1}°C",
            a.temperature.average, a.temperature.peak, a.temperature.minimum
        );
        let _ = writeln!(
            out,
            "  Time at critical {:.1}%, thermal events {}, cooling efficiency {:.2}",
            a.temperature.time_at_critical, a.temperature.thermal_events, a.temperature.cooling_efficiency
        );
        let _ = writeln!(out, "PERFORMANCE");
        let _ = writeln!(
            out,
            "  CPU {:.1}%, GPU {:.1}%, memory {:.1}%",
            a.performance.avg_cpu_utilization,
            a.performance.avg_gpu_utilization,
            a.performance.avg_memory_pressure
        );
        let _ = writeln!(
            out,
            "  Stability {:.1}, power efficiency {:.1}, load distribution {:.0}",
            a.performance.system_stability, a.performance.power_efficiency, a.performance.load_distribution
        );
        let _ = writeln!(out, "NETWORK");
        let _ = writeln!(
            out,
            "  Latency {:.1}ms, bandwidth {:.1}%, signal {:.0}%, packet loss {:.2}% (est.)",
            a.network.avg_latency,
            a.network.bandwidth_utilization,
            a.network.signal_quality,
            a.network.packet_loss
        );
        let _ = writeln!(out, "HEALTH");
        let _ = writeln!(
            out,
            "  Score {:.1} (grade {}), reliability {:.1}",
            a.system_health.overall_score, a.system_health.performance_grade, a.system_health.reliability_index
        );
        let _ = writeln!(out, "TRENDS");
        let _ = writeln!(
            out,
            "  Temperature {}, performance {}, network {}",
            a.trends.temperature_trend, a.trends.performance_trend, a.trends.network_trend
        );
        for alert in &a.trends.forecast_alerts {
            let _ = writeln!(out, "  ! {}", alert);
        }
        let _ = writeln!(out, "COMPLIANCE");
        let _ = writeln!(
            out,
            "  Thermal {:.1}, performance {:.1}, uptime {:.1}, security {:.1}, energy {:.1}",
            a.compliance.thermal_compliance,
            a.compliance.performance_compliance,
            a.compliance.uptime_compliance,
            a.compliance.security_compliance,
            a.compliance.energy_efficiency
        );

        if !s.recommended_actions.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "RECOMMENDED ACTIONS");
            for (i, action) in s.recommended_actions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, action);
            }
        }

        out
    }
}

fn summarize(
    date: NaiveDate,
    total_readings: usize,
    analysis: &ReportAnalysis,
    snapshot: &LiveMetricsSnapshot,
) -> ReportSummary {
    let health = &analysis.system_health;

    let recommended_actions = health
        .optimization_suggestions
        .iter()
        .chain(health.maintenance_alerts.iter())
        .take(RECOMMENDED_ACTIONS_LIMIT)
        .cloned()
        .collect();

    ReportSummary {
        total_readings,
        system_uptime: snapshot.system.uptime_secs,
        critical_events: health.critical_issues.len(),
        warning_events: health.maintenance_alerts.len(),
        average_performance: health.overall_score,
        energy_consumption: snapshot.gpu.power_draw_watts * 24.0,
        recommended_actions,
        next_maintenance_date: date
            .checked_add_days(Days::new(MAINTENANCE_INTERVAL_DAYS))
            .unwrap_or(date),
    }
}
