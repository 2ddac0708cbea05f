use std::sync::Arc;

use ape_monitor::core::reporting::{
    DeliveryOutcome, OutboxDelivery, PerformanceGrade, Trend,
};
use ape_monitor::core::system_monitor::{
    ActivityLog, FixedEstimator, LiveMetricsSnapshot, MetricKind,
};
use ape_monitor::core::ReportingEngine;
use chrono::{DateTime, Duration, Local, TimeZone};

fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap()
}

fn engine() -> ReportingEngine {
    ReportingEngine::new().with_estimator(FixedEstimator::default())
}

fn snapshot_with_fan(fan_speed: f64) -> LiveMetricsSnapshot {
    LiveMetricsSnapshot {
        fan_speed,
        ..Default::default()
    }
}

#[test]
fn test_sustained_overheating_day() {
    let engine = engine();
    let now = noon();
    for i in 0..10 {
        engine.record_at(now - Duration::minutes(i), MetricKind::Temperature, "core", 90.0);
    }

    let report = engine.generate_daily_report_at(now, &snapshot_with_fan(50.0));
    let temperature = &report.analysis.temperature;

    assert_eq!(report.summary.total_readings, 10);
    assert_eq!(temperature.thermal_events, 10);
    assert_eq!(temperature.time_at_critical, 100.0);
    assert!((temperature.cooling_efficiency - 0.2).abs() < 1e-9);
    assert_eq!(temperature.peak, 90.0);
    assert_eq!(temperature.minimum, 90.0);
    // 10 events at 5 points each
    assert_eq!(report.analysis.performance.system_stability, 50.0);
    assert_eq!(report.analysis.compliance.thermal_compliance, 0.0);
}

#[test]
fn test_empty_buffer_produces_zeroed_report() {
    let engine = engine();
    let report = engine.generate_daily_report_at(noon(), &LiveMetricsSnapshot::default());

    assert_eq!(report.summary.total_readings, 0);
    assert!(report.readings.is_empty());

    let t = &report.analysis.temperature;
    assert_eq!(t.average, 0.0);
    assert_eq!(t.peak, 0.0);
    assert_eq!(t.minimum, 0.0);
    assert_eq!(t.time_at_critical, 0.0);
    assert_eq!(t.cooling_efficiency, 0.0);

    let p = &report.analysis.performance;
    assert_eq!(p.avg_cpu_utilization, 0.0);
    assert_eq!(p.power_efficiency, 0.0);
    assert_eq!(report.analysis.network.avg_latency, 0.0);
    assert_eq!(report.analysis.trends.temperature_trend, Trend::Stable);
}

#[test]
fn test_missing_temperature_readings_give_zero_cooling_efficiency() {
    let engine = engine();
    let now = noon();
    engine.record_at(now, MetricKind::Cpu, "cpu", 35.0);

    let report = engine.generate_daily_report_at(now, &snapshot_with_fan(50.0));
    assert_eq!(report.analysis.temperature.cooling_efficiency, 0.0);
    assert_eq!(report.analysis.temperature.average, 0.0);
}

#[test]
fn test_aggregates_stay_finite() {
    let engine = engine();
    let now = noon();
    engine.record_at(now, MetricKind::Gpu, "gpu0", 75.0);
    engine.record_at(now, MetricKind::Latency, "wan", 40.0);

    let report = engine.generate_daily_report_at(now, &LiveMetricsSnapshot::default());
    let a = &report.analysis;
    for value in [
        a.temperature.cooling_efficiency,
        a.performance.power_efficiency,
        a.network.bandwidth_utilization,
        a.system_health.overall_score,
        a.system_health.reliability_index,
        a.compliance.energy_efficiency,
        report.summary.energy_consumption,
    ] {
        assert!(value.is_finite(), "non-finite aggregate: {}", value);
    }
}

#[test]
fn test_other_days_are_excluded() {
    let engine = engine();
    let now = noon();
    engine.record_at(now - Duration::days(1), MetricKind::Cpu, "cpu", 99.0);
    engine.record_at(now, MetricKind::Cpu, "cpu", 40.0);

    let report = engine.generate_daily_report_at(now, &LiveMetricsSnapshot::default());
    assert_eq!(report.summary.total_readings, 1);
    assert_eq!(report.analysis.performance.avg_cpu_utilization, 40.0);
    assert_eq!(report.date, now.date_naive());
}

#[test]
fn test_report_is_idempotent_with_fixed_estimator() {
    let engine = engine();
    let now = noon();
    for (i, v) in [45.0, 62.0, 88.0, 71.0].into_iter().enumerate() {
        engine.record_at(now - Duration::seconds(i as i64), MetricKind::Temperature, "core", v);
        engine.record_at(now - Duration::seconds(i as i64), MetricKind::Cpu, "cpu", v - 10.0);
    }
    let snapshot = snapshot_with_fan(60.0);

    let first = engine.generate_daily_report_at(now, &snapshot);
    let second = engine.generate_daily_report_at(now, &snapshot);
    assert_eq!(first, second);
}

#[test]
fn test_grade_is_monotonic_in_score() {
    let mut previous = PerformanceGrade::from_score(-10.0);
    let mut score = -10.0;
    while score <= 110.0 {
        let grade = PerformanceGrade::from_score(score);
        assert!(grade >= previous, "grade dropped at score {}", score);
        previous = grade;
        score += 0.5;
    }
    assert_eq!(PerformanceGrade::from_score(90.0), PerformanceGrade::APlus);
    assert_eq!(PerformanceGrade::from_score(59.9), PerformanceGrade::D);
}

#[test]
fn test_summary_lists_at_most_five_actions() {
    let engine = engine();
    let now = noon();
    for _ in 0..5 {
        engine.record_at(now, MetricKind::Temperature, "core", 95.0);
        engine.record_at(now, MetricKind::Cpu, "cpu", 97.0);
        engine.record_at(now, MetricKind::Memory, "ram", 98.0);
        engine.record_at(now, MetricKind::Latency, "wan", 250.0);
    }
    let mut snapshot = snapshot_with_fan(95.0);
    snapshot.gpu.power_draw_watts = 300.0;

    let report = engine.generate_daily_report_at(now, &snapshot);
    assert!(report.summary.recommended_actions.len() <= 5);
    assert!(report.summary.critical_events >= 1);
    assert_eq!(report.summary.energy_consumption, 300.0 * 24.0);
    assert_eq!(
        report.summary.next_maintenance_date,
        now.date_naive() + Duration::days(7)
    );
}

#[test]
fn test_report_serializes_camel_case() {
    let engine = engine();
    let report = engine.generate_daily_report_at(noon(), &snapshot_with_fan(40.0));
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"timeAtCritical\""));
    assert!(json.contains("\"performanceGrade\""));
}

#[test]
fn test_daily_report_delivery_goes_through_transport() {
    let outbox = Arc::new(OutboxDelivery::new());
    let engine = engine().with_delivery(outbox.clone());
    let report = engine.generate_daily_report_at(noon(), &LiveMetricsSnapshot::default());

    let outcome = engine.deliver_daily_report(&report, Some("ops@example.com"));
    assert!(outcome.is_sent());

    let messages = outbox.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].destination, "ops@example.com");
    assert!(messages[0].subject.contains("Daily Report"));
    assert!(messages[0].body.starts_with("APE SYSTEM DAILY REPORT"));
}

#[test]
fn test_delivery_without_destination_is_skipped() {
    let outbox = Arc::new(OutboxDelivery::new());
    let log = Arc::new(ActivityLog::new());
    let engine = engine()
        .with_delivery(outbox.clone())
        .with_log_sink(log.clone());
    let report = engine.generate_daily_report_at(noon(), &LiveMetricsSnapshot::default());

    let outcome = engine.deliver_daily_report(&report, None);
    assert!(matches!(outcome, DeliveryOutcome::Skipped(_)));
    assert!(outbox.is_empty());
    assert!(log.entries().iter().any(|e| e.level == "WARN"));
}
