use ape_monitor::core::system_monitor::{MetricKind, ReadingBuffer, DEFAULT_BUFFER_CAPACITY};
use ape_monitor::core::ReportingEngine;
use chrono::{Duration, Local};

#[test]
fn test_default_capacity_covers_a_day_at_two_hertz() {
    let buffer = ReadingBuffer::new();
    assert_eq!(buffer.capacity(), DEFAULT_BUFFER_CAPACITY);
    assert_eq!(DEFAULT_BUFFER_CAPACITY, 24 * 60 * 60 * 2);
}

#[test]
fn test_buffer_never_exceeds_capacity() {
    let buffer = ReadingBuffer::with_capacity(50);
    for i in 0..500 {
        buffer.record(MetricKind::Cpu, "cpu", i as f64);
        assert!(buffer.len() <= 50);
    }
    assert_eq!(buffer.len(), 50);
}

#[test]
fn test_oldest_readings_evicted_first() {
    let buffer = ReadingBuffer::with_capacity(3);
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        buffer.record(MetricKind::Temperature, "core", v);
    }
    assert_eq!(buffer.values_of(MetricKind::Temperature), vec![3.0, 4.0, 5.0]);
}

#[test]
fn test_engine_buffer_capacity_is_respected() {
    let engine = ReportingEngine::new().with_buffer_capacity(10);
    for i in 0..25 {
        engine.record(MetricKind::Latency, "wan", i as f64);
    }
    assert_eq!(engine.buffer().len(), 10);
    assert_eq!(engine.buffer().values_of(MetricKind::Latency)[0], 15.0);
}

#[test]
fn test_readings_on_filters_by_calendar_day() {
    let buffer = ReadingBuffer::with_capacity(100);
    let now = Local::now();
    buffer.record_at(now - Duration::days(1), MetricKind::Cpu, "cpu", 10.0);
    buffer.record_at(now - Duration::days(2), MetricKind::Cpu, "cpu", 20.0);
    buffer.record_at(now, MetricKind::Cpu, "cpu", 30.0);

    let today = buffer.readings_on(now.date_naive());
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].value, 30.0);
    assert_eq!(buffer.len(), 3);
}

#[test]
fn test_record_tagged_rejects_unknown_metric() {
    let engine = ReportingEngine::new();
    assert!(engine.record_tagged("temperature", "core", 40.0));
    assert!(!engine.record_tagged("humidity", "room", 40.0));
    assert_eq!(engine.buffer().len(), 1);
}

#[test]
fn test_concurrent_recording_stays_bounded() {
    use std::sync::Arc;
    use std::thread;

    let engine = Arc::new(ReportingEngine::new().with_buffer_capacity(1_000));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..500 {
                    engine.record(MetricKind::Gpu, &format!("gpu{}", t), i as f64);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(engine.buffer().len(), 1_000);
}
