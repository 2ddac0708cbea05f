use std::sync::Arc;
use std::time::Duration;

use ape_monitor::core::system_monitor::{
    FixedEstimator, MetricKind, PerformanceMode, SimulationRuntime,
};
use ape_monitor::core::{ReportingEngine, Simulator};
use chrono::{Local, TimeZone};

#[test]
fn test_seeded_runs_produce_identical_reports() {
    let now = Local.with_ymd_and_hms(2026, 6, 10, 18, 0, 0).unwrap();

    let run = || {
        let engine = ReportingEngine::new().with_estimator(FixedEstimator::default());
        let mut simulator = Simulator::new(Duration::from_millis(500), Some(2024));
        let snapshot = simulator.run_into(&engine, 400, now);
        engine.generate_daily_report_at(now, &snapshot)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_simulated_day_feeds_every_metric() {
    let now = Local.with_ymd_and_hms(2026, 6, 10, 18, 0, 0).unwrap();
    let engine = ReportingEngine::new().with_estimator(FixedEstimator::default());
    let mut simulator = Simulator::new(Duration::from_millis(500), Some(5));

    let snapshot = simulator.run_into(&engine, 200, now);
    let buffer = engine.buffer();

    for metric in MetricKind::ALL {
        assert_eq!(
            buffer.values_of(metric).len(),
            200,
            "expected one {} reading per tick",
            metric
        );
    }

    let report = engine.generate_daily_report_at(now, &snapshot);
    assert_eq!(report.summary.total_readings, 200 * MetricKind::ALL.len());
    let t = &report.analysis.temperature;
    assert!(t.minimum <= t.average && t.average <= t.peak);
}

#[test]
fn test_replay_is_bounded_by_buffer() {
    let now = Local.with_ymd_and_hms(2026, 6, 10, 18, 0, 0).unwrap();
    let engine = ReportingEngine::new().with_buffer_capacity(120);
    let mut simulator = Simulator::new(Duration::from_millis(500), Some(1));

    simulator.run_into(&engine, 100, now);
    assert_eq!(engine.buffer().len(), 120);
}

#[test]
fn test_eco_mode_keeps_cpu_low() {
    let mut simulator = Simulator::new(Duration::from_millis(500), Some(11));
    simulator
        .state_mut()
        .set_performance_mode(PerformanceMode::Eco);

    let now = Local::now();
    for _ in 0..300 {
        let (snapshot, _) = simulator.step(now);
        assert!(snapshot.system.cpu_usage <= 70.0);
    }
}

#[test]
fn test_runtime_records_while_running() {
    let engine = Arc::new(ReportingEngine::new().with_estimator(FixedEstimator::default()));
    let runtime =
        SimulationRuntime::start(Arc::clone(&engine), Duration::from_millis(50), Some(3))
            .unwrap();

    std::thread::sleep(Duration::from_millis(400));
    runtime.set_performance_mode(PerformanceMode::Performance);
    std::thread::sleep(Duration::from_millis(200));
    let latest = runtime.latest();
    runtime.shutdown();

    assert!(!engine.buffer().values_of(MetricKind::Temperature).is_empty());
    assert_eq!(latest.performance_mode, PerformanceMode::Performance);
}
