use colored::*;

use crate::core::reporting::{
    thermal_status, DailyReport, DeliveryOutcome, PerformanceGrade, Trend,
};
use crate::core::system_monitor::{Alert, AlertSeverity, LiveMetricsSnapshot};
use crate::ui::formatters::{format_rate, format_time, format_uptime};

fn section(title: &str) {
    println!("\n{}", title.bold().bright_cyan());
    println!("{}", "-".repeat(60));
}

fn colored_status(label: &str) -> ColoredString {
    match label {
        "OPTIMAL" | "EXCELLENT" | "HEALTHY" => label.green(),
        "WARNING" | "GOOD" | "STRAINED" => label.yellow(),
        _ => label.red(),
    }
}

fn colored_trend(trend: Trend) -> ColoredString {
    match trend {
        Trend::Improving => trend.as_str().green(),
        Trend::Stable => trend.as_str().normal(),
        Trend::Degrading => trend.as_str().red(),
    }
}

fn colored_grade(grade: PerformanceGrade) -> ColoredString {
    match grade {
        PerformanceGrade::APlus | PerformanceGrade::A => grade.as_str().green().bold(),
        PerformanceGrade::B => grade.as_str().yellow().bold(),
        PerformanceGrade::C | PerformanceGrade::D => grade.as_str().red().bold(),
    }
}

fn colored_score(score: f64) -> ColoredString {
    let text = format!("{:.1}", score);
    if score >= 80.0 {
        text.green()
    } else if score >= 60.0 {
        text.yellow()
    } else {
        text.red()
    }
}

pub fn print_snapshot(snapshot: &LiveMetricsSnapshot) {
    let status = thermal_status(snapshot.temperature);
    println!(
        "{} {:.1}°C [{}]  {} {:.0}%  {} {:.1}%  {} {:.1}%  {} {:.1}%  {} {:.0}ms  {} {}",
        "Temp".bold(),
        snapshot.temperature,
        colored_status(status),
        "Fan".bold(),
        snapshot.fan_speed,
        "CPU".bold(),
        snapshot.system.cpu_usage,
        "GPU".bold(),
        snapshot.gpu.usage_percent,
        "RAM".bold(),
        snapshot.system.memory_usage,
        "Lat".bold(),
        snapshot.network.latency_ms,
        "Up".bold(),
        format_uptime(snapshot.system.uptime_secs),
    );
}

pub fn print_snapshot_details(snapshot: &LiveMetricsSnapshot) {
    section("LIVE METRICS");
    println!("  Mode:        {}", snapshot.performance_mode);
    println!("  Temperature: {:.1}°C", snapshot.temperature);
    println!("  Fan speed:   {:.0}%", snapshot.fan_speed);
    println!(
        "  GPU:         {:.1}% @ {} MHz, {:.1}°C, {:.0}W",
        snapshot.gpu.usage_percent,
        snapshot.gpu.clock_mhz,
        snapshot.gpu.temperature_celsius,
        snapshot.gpu.power_draw_watts
    );
    println!(
        "  Network:     down {} / up {}, {:.0}ms, signal {:.0}%",
        format_rate(snapshot.network.download_bytes_per_sec),
        format_rate(snapshot.network.upload_bytes_per_sec),
        snapshot.network.latency_ms,
        snapshot.network.signal_strength
    );
    println!(
        "  System:      CPU {:.1}%, RAM {:.1}%, {} processes, up {}",
        snapshot.system.cpu_usage,
        snapshot.system.memory_usage,
        snapshot.system.process_count,
        format_uptime(snapshot.system.uptime_secs)
    );
}

pub fn print_alerts(alerts: &[Alert]) {
    for alert in alerts {
        let tag = match alert.severity {
            AlertSeverity::Warning => "WARN".yellow().bold(),
            AlertSeverity::Critical => "CRIT".red().bold(),
        };
        println!("  [{}] {}", tag, alert.message);
    }
}

pub fn print_daily_report(report: &DailyReport) {
    let a = &report.analysis;
    let s = &report.summary;

    println!(
        "\n{} {}",
        "APE SYSTEM DAILY REPORT".bold().bright_cyan(),
        report.date.to_string().dimmed()
    );
    println!("{}", "=".repeat(60));
    println!("  Generated: {}", format_time(report.generated_at));

    section("SUMMARY");
    println!("  Total readings:      {}", s.total_readings);
    println!("  System uptime:       {}", format_uptime(s.system_uptime));
    println!("  Critical events:     {}", s.critical_events);
    println!("  Warning events:      {}", s.warning_events);
    println!("  Average performance: {}", colored_score(s.average_performance));
    println!("  Energy consumption:  {:.1} Wh", s.energy_consumption);
    println!("  Next maintenance:    {}", s.next_maintenance_date);

    section("TEMPERATURE");
    println!(
        "  Average {:.1}°C | Peak {:.1}°C | Min {:.1}°C",
        a.temperature.average, a.temperature.peak, a.temperature.minimum
    );
    println!(
        "  Time at critical {:.1}% | Thermal events {} | Cooling efficiency {:.2}",
        a.temperature.time_at_critical, a.temperature.thermal_events, a.temperature.cooling_efficiency
    );

    section("PERFORMANCE");
    println!(
        "  CPU {:.1}% | GPU {:.1}% | Memory {:.1}%",
        a.performance.avg_cpu_utilization,
        a.performance.avg_gpu_utilization,
        a.performance.avg_memory_pressure
    );
    println!(
        "  Stability {} | Power efficiency {:.1} | Load distribution {:.0}",
        colored_score(a.performance.system_stability),
        a.performance.power_efficiency,
        a.performance.load_distribution
    );

    section("NETWORK");
    println!(
        "  Latency {:.1}ms | Bandwidth {:.1}% | Signal {:.0}%",
        a.network.avg_latency, a.network.bandwidth_utilization, a.network.signal_quality
    );
    println!(
        "  Packet loss {:.2}% | Throughput consistency {:.1}% {}",
        a.network.packet_loss,
        a.network.throughput_consistency,
        "(estimated)".dimmed()
    );

    section("SYSTEM HEALTH");
    println!(
        "  Score {} | Grade {} | Reliability {:.1}",
        colored_score(a.system_health.overall_score),
        colored_grade(a.system_health.performance_grade),
        a.system_health.reliability_index
    );
    for issue in &a.system_health.critical_issues {
        println!("  {} {}", "CRITICAL".red().bold(), issue);
    }
    for alert in &a.system_health.maintenance_alerts {
        println!("  {} {}", "MAINTENANCE".yellow(), alert);
    }

    section("TRENDS");
    println!(
        "  Temperature {} | Performance {} | Network {} | Forecast accuracy {:.1}%",
        colored_trend(a.trends.temperature_trend),
        colored_trend(a.trends.performance_trend),
        colored_trend(a.trends.network_trend),
        a.trends.prediction_accuracy
    );
    for alert in &a.trends.forecast_alerts {
        println!("  {} {}", "!".yellow().bold(), alert);
    }

    section("COMPLIANCE");
    println!(
        "  Thermal {} | Performance {} | Uptime {:.1} | Security {:.1} | Energy {:.1}",
        colored_score(a.compliance.thermal_compliance),
        colored_score(a.compliance.performance_compliance),
        a.compliance.uptime_compliance,
        a.compliance.security_compliance,
        a.compliance.energy_efficiency
    );

    if !s.recommended_actions.is_empty() {
        section("RECOMMENDED ACTIONS");
        for (i, action) in s.recommended_actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action);
        }
    }
    println!();
}

pub fn print_delivery_outcome(outcome: &DeliveryOutcome) {
    match outcome {
        DeliveryOutcome::Sent { destination } => {
            println!("{} Report sent to {}", "✓".green(), destination.bold())
        }
        DeliveryOutcome::Skipped(reason) => {
            println!("{} Report not sent: {}", "!".yellow(), reason)
        }
        DeliveryOutcome::Failed(reason) => {
            println!("{} Report delivery failed: {}", "✗".red(), reason)
        }
    }
}
