//! Per-subsystem status reports built from the live snapshot only.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::system_monitor::LiveMetricsSnapshot;
use crate::error::ApeError;
use crate::ui::formatters::{format_bytes, format_rate, format_uptime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Thermal,
    Processing,
    Network,
    System,
    All,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 5] = [
        ReportCategory::Thermal,
        ReportCategory::Processing,
        ReportCategory::Network,
        ReportCategory::System,
        ReportCategory::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::Thermal => "thermal",
            ReportCategory::Processing => "processing",
            ReportCategory::Network => "network",
            ReportCategory::System => "system",
            ReportCategory::All => "all",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportCategory::Thermal => "THERMAL MANAGEMENT REPORT",
            ReportCategory::Processing => "PROCESSING UNIT REPORT",
            ReportCategory::Network => "NETWORK STATUS REPORT",
            ReportCategory::System => "SYSTEM STATUS REPORT",
            ReportCategory::All => "COMPREHENSIVE SYSTEM REPORT",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportCategory {
    type Err = ApeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ApeError::invalid_category(s))
    }
}

/// Core temperature status: < 60 OPTIMAL, 60-80 WARNING, > 80 CRITICAL
pub fn thermal_status(temperature: f64) -> &'static str {
    if temperature < 60.0 {
        "OPTIMAL"
    } else if temperature <= 80.0 {
        "WARNING"
    } else {
        "CRITICAL"
    }
}

/// GPU temperature status: < 70 OPTIMAL, 70-85 WARNING, > 85 CRITICAL
pub fn gpu_status(temperature: f64) -> &'static str {
    if temperature < 70.0 {
        "OPTIMAL"
    } else if temperature <= 85.0 {
        "WARNING"
    } else {
        "CRITICAL"
    }
}

pub fn network_status(latency_ms: f64) -> &'static str {
    if latency_ms < 50.0 {
        "EXCELLENT"
    } else if latency_ms < 100.0 {
        "GOOD"
    } else {
        "DEGRADED"
    }
}

pub fn system_status(cpu: f64, memory: f64) -> &'static str {
    let worst = cpu.max(memory);
    if worst < 80.0 {
        "HEALTHY"
    } else if worst < 95.0 {
        "STRAINED"
    } else {
        "OVERLOADED"
    }
}

/// Deterministic status text for one category
pub fn category_report(category: ReportCategory, snapshot: &LiveMetricsSnapshot) -> String {
    match category {
        ReportCategory::Thermal => thermal_section(snapshot),
        ReportCategory::Processing => processing_section(snapshot),
        ReportCategory::Network => network_section(snapshot),
        ReportCategory::System => system_section(snapshot),
        ReportCategory::All => {
            let mut out = format!("APE SYSTEM - {}\n", ReportCategory::All.title());
            for section in [
                thermal_section(snapshot),
                processing_section(snapshot),
                network_section(snapshot),
                system_section(snapshot),
            ] {
                out.push('\n');
                out.push_str(&section);
            }
            out
        }
    }
}

fn header(category: ReportCategory) -> String {
    format!("APE SYSTEM - {}\n", category.title())
}

fn thermal_section(snapshot: &LiveMetricsSnapshot) -> String {
    let mut out = header(ReportCategory::Thermal);
    let _ = writeln!(out, "Core Temperature: {:.1}°C", snapshot.temperature);
    let _ = writeln!(out, "Fan Speed: {:.0}%", snapshot.fan_speed);
    let _ = writeln!(out, "Performance Mode: {}", snapshot.performance_mode);
    let _ = writeln!(out, "Thermal Status: {}", thermal_status(snapshot.temperature));
    out
}

fn processing_section(snapshot: &LiveMetricsSnapshot) -> String {
    let gpu = &snapshot.gpu;
    let mut out = header(ReportCategory::Processing);
    let _ = writeln!(out, "GPU Usage: {:.1}%", gpu.usage_percent);
    let _ = writeln!(out, "GPU Temperature: {:.1}°C", gpu.temperature_celsius);
    let _ = writeln!(
        out,
        "GPU Memory: {} / {} ({:.1}%)",
        format_bytes(gpu.memory_used_bytes),
        format_bytes(gpu.memory_total_bytes),
        gpu.memory_percent()
    );
    let _ = writeln!(out, "Core Clock: {} MHz", gpu.clock_mhz);
    let _ = writeln!(out, "Power Draw: {:.0}W", gpu.power_draw_watts);
    let _ = writeln!(out, "CPU Usage: {:.1}%", snapshot.system.cpu_usage);
    let _ = writeln!(out, "GPU Status: {}", gpu_status(gpu.temperature_celsius));
    out
}

fn network_section(snapshot: &LiveMetricsSnapshot) -> String {
    let net = &snapshot.network;
    let mut out = header(ReportCategory::Network);
    let _ = writeln!(out, "Download: {}", format_rate(net.download_bytes_per_sec));
    let _ = writeln!(out, "Upload: {}", format_rate(net.upload_bytes_per_sec));
    let _ = writeln!(out, "Latency: {:.0}ms", net.latency_ms);
    let _ = writeln!(out, "Signal Strength: {:.0}%", net.signal_strength);
    let _ = writeln!(
        out,
        "Packets: {} sent / {} received",
        net.packets_sent, net.packets_received
    );
    let _ = writeln!(out, "Connection Status: {}", network_status(net.latency_ms));
    out
}

fn system_section(snapshot: &LiveMetricsSnapshot) -> String {
    let sys = &snapshot.system;
    let (one, five, fifteen) = sys.load_average;
    let mut out = header(ReportCategory::System);
    let _ = writeln!(out, "CPU Usage: {:.1}%", sys.cpu_usage);
    let _ = writeln!(out, "Memory Usage: {:.1}%", sys.memory_usage);
    let _ = writeln!(out, "Uptime: {}", format_uptime(sys.uptime_secs));
    let _ = writeln!(out, "Processes: {}", sys.process_count);
    let _ = writeln!(out, "Load Average: {:.2}, {:.2}, {:.2}", one, five, fifteen);
    let _ = writeln!(out, "System Status: {}", system_status(sys.cpu_usage, sys.memory_usage));
    out
}
