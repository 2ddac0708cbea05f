//! Alert rules for monitoring conditions.
//!
//! Two rule sets live here: the daily-report health rules that work on averaged
//! readings, and live alerts evaluated against the current snapshot.

use super::metrics::LiveMetricsSnapshot;
use serde::{Deserialize, Serialize};

/// Alert configuration with thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub maintenance_temperature: f64, // Average °C above which cooling needs service
    pub maintenance_cpu: f64,         // Average CPU (%) above which workload needs review
    pub maintenance_fan_speed: f64,   // Fan speed (%) above which fans need cleaning
    pub critical_memory: f64,         // Average memory pressure (%)
    pub optimization_latency: f64,    // Average latency (ms)
    pub optimization_power_efficiency: f64,
    pub temp_warning: f64,  // Warning threshold (°C)
    pub temp_critical: f64, // Critical threshold (°C)
    pub cpu_warning: f64,
    pub cpu_critical: f64,
    pub memory_warning: f64,
    pub memory_critical: f64,
    pub gpu_temp_warning: f64,
    pub gpu_temp_critical: f64,
    pub latency_warning: f64, // ms
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            maintenance_temperature: 75.0,
            maintenance_cpu: 85.0,
            maintenance_fan_speed: 80.0,
            critical_memory: 90.0,
            optimization_latency: 100.0,
            optimization_power_efficiency: 50.0,
            temp_warning: 75.0,
            temp_critical: 85.0,
            cpu_warning: 75.0,
            cpu_critical: 90.0,
            memory_warning: 80.0,
            memory_critical: 95.0,
            gpu_temp_warning: 80.0,
            gpu_temp_critical: 90.0,
            latency_warning: 100.0,
        }
    }
}

/// Averaged figures the health rules look at
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthInputs {
    pub avg_temperature: f64,
    pub avg_cpu: f64,
    pub avg_memory_pressure: f64,
    pub avg_latency: f64,
    pub fan_speed: f64,
    pub power_efficiency: f64,
}

/// Rule-based alert lists of the daily report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAlerts {
    pub maintenance_alerts: Vec<String>,
    pub critical_issues: Vec<String>,
    pub optimization_suggestions: Vec<String>,
}

/// Apply the daily-report health rules
pub fn evaluate_health_alerts(inputs: &HealthInputs, config: &AlertConfig) -> HealthAlerts {
    let mut alerts = HealthAlerts::default();

    if inputs.avg_temperature > config.maintenance_temperature {
        alerts.maintenance_alerts.push(format!(
            "High average temperature ({:.1}°C) - schedule a cooling system inspection",
            inputs.avg_temperature
        ));
    }
    if inputs.avg_cpu > config.maintenance_cpu {
        alerts.maintenance_alerts.push(format!(
            "Sustained CPU utilization ({:.1}%) - review workload distribution",
            inputs.avg_cpu
        ));
    }
    if inputs.fan_speed > config.maintenance_fan_speed {
        alerts.maintenance_alerts.push(format!(
            "Fan running at {:.0}% - check for dust buildup",
            inputs.fan_speed
        ));
    }

    if inputs.avg_memory_pressure > config.critical_memory {
        alerts.critical_issues.push(format!(
            "Memory pressure at {:.1}% - immediate attention required",
            inputs.avg_memory_pressure
        ));
    }

    if inputs.avg_latency > config.optimization_latency {
        alerts.optimization_suggestions.push(format!(
            "Average latency {:.0}ms - review network configuration",
            inputs.avg_latency
        ));
    }
    if inputs.power_efficiency < config.optimization_power_efficiency {
        alerts.optimization_suggestions.push(format!(
            "Power efficiency at {:.1}% - tune GPU power settings",
            inputs.power_efficiency
        ));
    }

    alerts
}

/// An individual live alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCategory {
    Thermal,
    CPU,
    Memory,
    GPU,
    Network,
}

fn threshold_alert(
    category: AlertCategory,
    label: &str,
    unit: &str,
    value: f64,
    warning: f64,
    critical: f64,
) -> Option<Alert> {
    let (severity, threshold, kind) = if value >= critical {
        (AlertSeverity::Critical, critical, "critical")
    } else if value >= warning {
        (AlertSeverity::Warning, warning, "warning")
    } else {
        return None;
    };

    Some(Alert {
        severity,
        category,
        message: format!(
            "{} at {:.1}{} ({} threshold: {:.1}{})",
            label, value, unit, kind, threshold, unit
        ),
        value,
        threshold,
    })
}

/// Evaluate the live snapshot and generate alerts
pub fn evaluate_alerts(snapshot: &LiveMetricsSnapshot, config: &AlertConfig) -> Vec<Alert> {
    let checks = [
        threshold_alert(
            AlertCategory::Thermal,
            "Core temperature",
            "°C",
            snapshot.temperature,
            config.temp_warning,
            config.temp_critical,
        ),
        threshold_alert(
            AlertCategory::CPU,
            "CPU usage",
            "%",
            snapshot.system.cpu_usage,
            config.cpu_warning,
            config.cpu_critical,
        ),
        threshold_alert(
            AlertCategory::Memory,
            "Memory usage",
            "%",
            snapshot.system.memory_usage,
            config.memory_warning,
            config.memory_critical,
        ),
        threshold_alert(
            AlertCategory::GPU,
            "GPU temperature",
            "°C",
            snapshot.gpu.temperature_celsius,
            config.gpu_temp_warning,
            config.gpu_temp_critical,
        ),
    ];

    let mut alerts: Vec<Alert> = checks.into_iter().flatten().collect();

    // Latency only has a warning level
    if snapshot.network.latency_ms >= config.latency_warning {
        alerts.push(Alert {
            severity: AlertSeverity::Warning,
            category: AlertCategory::Network,
            message: format!(
                "Network latency at {:.0}ms (warning threshold: {:.0}ms)",
                snapshot.network.latency_ms, config.latency_warning
            ),
            value: snapshot.network.latency_ms,
            threshold: config.latency_warning,
        });
    }

    alerts
}
