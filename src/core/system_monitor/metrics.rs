use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::ApeError;

/// Kind of scalar tracked in the reading buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Temperature,
    Cpu,
    Gpu,
    Memory,
    Network,
    Latency,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Temperature,
        MetricKind::Cpu,
        MetricKind::Gpu,
        MetricKind::Memory,
        MetricKind::Network,
        MetricKind::Latency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "temperature",
            MetricKind::Cpu => "cpu",
            MetricKind::Gpu => "gpu",
            MetricKind::Memory => "memory",
            MetricKind::Network => "network",
            MetricKind::Latency => "latency",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = ApeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ApeError::invalid_metric_kind(s))
    }
}

/// A single timestamped observation of one metric for one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub timestamp: DateTime<Local>,
    pub metric: MetricKind,
    pub component: String,
    pub value: f64,
}

impl MetricReading {
    pub fn new(
        timestamp: DateTime<Local>,
        metric: MetricKind,
        component: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            timestamp,
            metric,
            component: component.into(),
            value,
        }
    }
}

/// Power profile of the simulated machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    Eco,
    #[default]
    Balanced,
    Performance,
}

impl PerformanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceMode::Eco => "eco",
            PerformanceMode::Balanced => "balanced",
            PerformanceMode::Performance => "performance",
        }
    }
}

impl fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceMode {
    type Err = ApeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eco" => Ok(PerformanceMode::Eco),
            "balanced" => Ok(PerformanceMode::Balanced),
            "performance" => Ok(PerformanceMode::Performance),
            other => Err(ApeError::config(format!(
                "unknown performance mode '{}' (expected eco, balanced or performance)",
                other
            ))),
        }
    }
}

/// Current-moment values of every simulated metric.
///
/// Owned by the simulation layer; the reporting core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetricsSnapshot {
    pub timestamp: i64, // Unix timestamp
    pub temperature: f64,
    pub fan_speed: f64,
    pub performance_mode: PerformanceMode,
    pub gpu: GpuMetrics,
    pub network: NetworkMetrics,
    pub system: SystemMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuMetrics {
    pub usage_percent: f64,
    pub temperature_celsius: f64,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub clock_mhz: u32,
    pub power_draw_watts: f64,
}

impl GpuMetrics {
    pub fn memory_percent(&self) -> f64 {
        if self.memory_total_bytes > 0 {
            self.memory_used_bytes as f64 / self.memory_total_bytes as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub download_bytes_per_sec: u64,
    pub upload_bytes_per_sec: u64,
    pub latency_ms: f64,
    pub signal_strength: f64, // percent
    pub packets_sent: u64,
    pub packets_received: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub uptime_secs: u64,
    pub process_count: u32,
    pub load_average: (f64, f64, f64), // 1, 5, 15 min
}
