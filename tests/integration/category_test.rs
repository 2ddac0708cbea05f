use std::sync::Arc;

use ape_monitor::core::reporting::{
    category_report, gpu_status, network_status, system_status, thermal_status, OutboxDelivery,
};
use ape_monitor::core::system_monitor::{FixedEstimator, LiveMetricsSnapshot};
use ape_monitor::core::{ReportCategory, ReportingEngine};

fn with_temperature(temperature: f64) -> LiveMetricsSnapshot {
    LiveMetricsSnapshot {
        temperature,
        fan_speed: 45.0,
        ..Default::default()
    }
}

#[test]
fn test_thermal_report_reflects_temperature() {
    let engine = ReportingEngine::new();

    let cool = engine.generate_category_report(ReportCategory::Thermal, &with_temperature(55.0));
    assert!(cool.contains("OPTIMAL"));

    let hot = engine.generate_category_report(ReportCategory::Thermal, &with_temperature(85.0));
    assert!(hot.contains("CRITICAL"));
}

#[test]
fn test_status_boundaries() {
    assert_eq!(thermal_status(59.9), "OPTIMAL");
    assert_eq!(thermal_status(80.0), "WARNING");
    assert_eq!(thermal_status(80.1), "CRITICAL");

    assert_eq!(gpu_status(69.0), "OPTIMAL");
    assert_eq!(gpu_status(85.0), "WARNING");
    assert_eq!(gpu_status(90.0), "CRITICAL");

    assert_eq!(network_status(20.0), "EXCELLENT");
    assert_eq!(network_status(75.0), "GOOD");
    assert_eq!(network_status(100.0), "DEGRADED");

    assert_eq!(system_status(40.0, 60.0), "HEALTHY");
    assert_eq!(system_status(85.0, 60.0), "STRAINED");
    assert_eq!(system_status(40.0, 97.0), "OVERLOADED");
}

#[test]
fn test_category_names_parse() {
    for category in ReportCategory::ALL {
        let parsed: ReportCategory = category.as_str().parse().unwrap();
        assert_eq!(parsed, category);
    }
    assert!("storage".parse::<ReportCategory>().is_err());
}

#[test]
fn test_all_report_includes_every_section() {
    let text = category_report(ReportCategory::All, &with_temperature(70.0));
    for category in [
        ReportCategory::Thermal,
        ReportCategory::Processing,
        ReportCategory::Network,
        ReportCategory::System,
    ] {
        assert!(text.contains(category.title()), "missing {}", category.title());
    }
}

#[test]
fn test_category_report_is_deterministic() {
    let snapshot = with_temperature(72.5);
    let a = category_report(ReportCategory::System, &snapshot);
    let b = category_report(ReportCategory::System, &snapshot);
    assert_eq!(a, b);
}

#[test]
fn test_category_delivery_uses_title_subject() {
    let outbox = Arc::new(OutboxDelivery::new());
    let engine = ReportingEngine::new()
        .with_estimator(FixedEstimator::default())
        .with_delivery(outbox.clone());

    let outcome = engine.deliver_category_report(
        ReportCategory::Network,
        &with_temperature(50.0),
        Some("noc@example.com"),
    );
    assert!(outcome.is_sent());

    let messages = outbox.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].subject.contains(ReportCategory::Network.title()));
    assert!(messages[0].body.contains("Connection Status"));
}
