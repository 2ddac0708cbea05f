use ape_monitor::core::config::CONFIG_KEYS;
use ape_monitor::core::{ApeConfig, ConfigEditor};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = ApeConfig::default();
    assert_eq!(config.monitoring.tick_interval_ms, 500);
    assert_eq!(config.monitoring.buffer_capacity, 172_800);
    assert!(config.monitoring.seed.is_none());
    assert!(config.reporting.email.is_none());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ape").join("config.json");

    let mut config = ApeConfig::default();
    config.set_seed(Some(99));
    config.set_report_email(Some("ops@example.com".to_string())).unwrap();
    config.set_temperature_thresholds(70.0, 82.0).unwrap();
    config.save_to(&path).unwrap();

    let loaded = ApeConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let loaded = ApeConfig::load_from(&temp_dir.path().join("nope.json")).unwrap();
    assert_eq!(loaded, ApeConfig::default());
}

#[test]
fn test_config_empty_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, b"").unwrap();

    assert_eq!(ApeConfig::load_from(&path).unwrap(), ApeConfig::default());
}

#[test]
fn test_config_corrupt_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, b"{ this is not json").unwrap();

    assert_eq!(ApeConfig::load_from(&path).unwrap(), ApeConfig::default());
}

#[test]
fn test_config_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, br#"{ "reporting": { "email": "noc@example.com" } }"#).unwrap();

    let loaded = ApeConfig::load_from(&path).unwrap();
    assert_eq!(loaded.reporting.email.as_deref(), Some("noc@example.com"));
    assert_eq!(loaded.monitoring, ApeConfig::default().monitoring);
}

#[test]
fn test_config_out_of_range_monitoring_values_reset_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        br#"{ "monitoring": { "tick_interval_ms": 0, "buffer_capacity": 0, "seed": 4 } }"#,
    )
    .unwrap();

    let loaded = ApeConfig::load_from(&path).unwrap();
    let defaults = ApeConfig::default();
    assert_eq!(loaded.monitoring.tick_interval_ms, defaults.monitoring.tick_interval_ms);
    assert_eq!(loaded.monitoring.buffer_capacity, defaults.monitoring.buffer_capacity);
    assert_eq!(loaded.monitoring.seed, Some(4));
    assert!(!loaded.tick_interval().is_zero());
}

#[test]
fn test_config_excessive_tick_interval_resets_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, br#"{ "monitoring": { "tick_interval_ms": 9999999 } }"#).unwrap();

    let loaded = ApeConfig::load_from(&path).unwrap();
    assert_eq!(loaded.monitoring.tick_interval_ms, 500);
}

#[test]
fn test_every_known_key_is_settable() {
    let mut config = ApeConfig::default();
    for key in CONFIG_KEYS {
        let value = match *key {
            "monitoring.tick_interval_ms" => "250",
            "monitoring.buffer_capacity" => "1000",
            "monitoring.seed" => "7",
            "reporting.email" => "ops@example.com",
            "alerts.temp_warning" => "70",
            "alerts.temp_critical" => "88",
            "alerts.optimization_latency" => "120",
            _ => "50",
        };
        config
            .set_by_key(key, value)
            .unwrap_or_else(|e| panic!("{} = {}: {}", key, value, e));
    }
    assert_eq!(config.monitoring.seed, Some(7));
    assert_eq!(config.alerts.temp_critical, 88.0);
}

#[test]
fn test_set_by_key_rejects_bad_input() {
    let mut config = ApeConfig::default();
    assert!(config.set_by_key("monitoring.colour", "blue").is_err());
    assert!(config.set_by_key("monitoring.buffer_capacity", "0").is_err());
    assert!(config.set_by_key("compliance.uptime", "140").is_err());
    assert!(config.set_by_key("reporting.email", "nobody").is_err());
    assert!(config.set_by_key("alerts.temp_critical", "not-a-number").is_err());
    assert_eq!(config, ApeConfig::default());
}

#[test]
fn test_optional_values_can_be_cleared() {
    let mut config = ApeConfig::default();
    config.set_by_key("monitoring.seed", "42").unwrap();
    config.set_by_key("monitoring.seed", "none").unwrap();
    assert!(config.monitoring.seed.is_none());
}

#[test]
fn test_editor_tracks_unsaved_changes() {
    let mut editor = ConfigEditor::new(ApeConfig::default());
    assert!(!editor.has_unsaved_changes());

    editor.draft_mut().set_by_key("alerts.critical_memory", "85").unwrap();
    assert!(editor.has_unsaved_changes());

    // Setting the value back removes the difference
    editor.draft_mut().set_by_key("alerts.critical_memory", "90").unwrap();
    assert!(!editor.has_unsaved_changes());

    editor.draft_mut().set_by_key("alerts.critical_memory", "85").unwrap();
    editor.commit();
    assert!(!editor.has_unsaved_changes());
    assert_eq!(editor.saved().alerts.critical_memory, 85.0);

    editor.draft_mut().set_by_key("compliance.security", "80").unwrap();
    editor.discard();
    assert_eq!(editor.draft(), editor.saved());
}
