use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::reporting::{AnalysisPolicy, ComplianceBaseline, TrendThresholds};
use crate::core::system_monitor::{AlertConfig, DEFAULT_BUFFER_CAPACITY};
use crate::error::ApeError;

const MIN_TICK_INTERVAL_MS: u64 = 50;
const MAX_TICK_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub tick_interval_ms: u64,
    pub buffer_capacity: usize,
    /// Fixed seed for reproducible simulations and estimates
    pub seed: Option<u64>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApeConfig {
    pub monitoring: MonitoringConfig,
    pub alerts: AlertConfig,
    pub compliance: ComplianceBaseline,
    pub trends: TrendThresholds,
    pub reporting: ReportingConfig,
}

/// Keys accepted by [`ApeConfig::set_by_key`]
pub const CONFIG_KEYS: &[&str] = &[
    "monitoring.tick_interval_ms",
    "monitoring.buffer_capacity",
    "monitoring.seed",
    "reporting.email",
    "compliance.uptime",
    "compliance.security",
    "alerts.temp_warning",
    "alerts.temp_critical",
    "alerts.maintenance_fan_speed",
    "alerts.critical_memory",
    "alerts.optimization_latency",
];

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> crate::Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ApeError::config(format!("invalid value '{}' for {}", value, key)))
}

fn optional(value: &str) -> Option<&str> {
    match value.trim() {
        "" | "none" | "null" => None,
        v => Some(v),
    }
}

fn check_percent(key: &str, value: f64) -> crate::Result<f64> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ApeError::config(format!(
            "{} must be between 0 and 100 (got {})",
            key, value
        )))
    }
}

impl ApeConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Missing, empty or unreadable content yields the defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(ApeConfig::default());
        }

        let data = fs::read(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.is_empty() {
            return Ok(ApeConfig::default());
        }

        let config: ApeConfig = serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring unreadable config file {:?} ({}); using defaults",
                config_path,
                e
            );
            ApeConfig::default()
        });

        Ok(config.sanitized())
    }

    /// Reset out-of-range monitoring values that a hand-edited file can carry
    fn sanitized(mut self) -> Self {
        let defaults = MonitoringConfig::default();

        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.monitoring.tick_interval_ms) {
            log::warn!(
                "Config tick_interval_ms {} outside {}..={}; using {}",
                self.monitoring.tick_interval_ms,
                MIN_TICK_INTERVAL_MS,
                MAX_TICK_INTERVAL_MS,
                defaults.tick_interval_ms
            );
            self.monitoring.tick_interval_ms = defaults.tick_interval_ms;
        }
        if self.monitoring.buffer_capacity == 0 {
            log::warn!(
                "Config buffer_capacity 0 is invalid; using {}",
                defaults.buffer_capacity
            );
            self.monitoring.buffer_capacity = defaults.buffer_capacity;
        }

        self
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("ape").join("config.json"))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.monitoring.tick_interval_ms)
    }

    pub fn analysis_policy(&self) -> AnalysisPolicy {
        AnalysisPolicy {
            alerts: self.alerts.clone(),
            compliance: self.compliance.clone(),
            trends: self.trends.clone(),
        }
    }

    // Monitoring

    pub fn set_tick_interval_ms(&mut self, ms: u64) -> crate::Result<()> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&ms) {
            return Err(ApeError::config(format!(
                "tick interval must be between {} and {} ms (got {})",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, ms
            )));
        }
        self.monitoring.tick_interval_ms = ms;
        Ok(())
    }

    pub fn set_buffer_capacity(&mut self, capacity: usize) -> crate::Result<()> {
        if capacity == 0 {
            return Err(ApeError::config("buffer capacity must be at least 1"));
        }
        self.monitoring.buffer_capacity = capacity;
        Ok(())
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.monitoring.seed = seed;
    }

    // Reporting

    pub fn set_report_email(&mut self, email: Option<String>) -> crate::Result<()> {
        match email {
            Some(email) => {
                crate::core::reporting::validate_destination(&email)
                    .map_err(|e| ApeError::config(e.to_string()))?;
                self.reporting.email = Some(email.trim().to_string());
            }
            None => self.reporting.email = None,
        }
        Ok(())
    }

    pub fn get_report_email(&self) -> Option<&String> {
        self.reporting.email.as_ref()
    }

    // Compliance

    pub fn set_uptime_baseline(&mut self, value: f64) -> crate::Result<()> {
        self.compliance.uptime = check_percent("compliance.uptime", value)?;
        Ok(())
    }

    pub fn set_security_baseline(&mut self, value: f64) -> crate::Result<()> {
        self.compliance.security = check_percent("compliance.security", value)?;
        Ok(())
    }

    // Alert thresholds

    pub fn set_temperature_thresholds(&mut self, warning: f64, critical: f64) -> crate::Result<()> {
        if warning >= critical {
            return Err(ApeError::config(format!(
                "temperature warning ({}) must be below critical ({})",
                warning, critical
            )));
        }
        self.alerts.temp_warning = warning;
        self.alerts.temp_critical = critical;
        Ok(())
    }

    pub fn set_fan_maintenance_threshold(&mut self, value: f64) -> crate::Result<()> {
        self.alerts.maintenance_fan_speed = check_percent("alerts.maintenance_fan_speed", value)?;
        Ok(())
    }

    pub fn set_memory_critical_threshold(&mut self, value: f64) -> crate::Result<()> {
        self.alerts.critical_memory = check_percent("alerts.critical_memory", value)?;
        Ok(())
    }

    pub fn set_latency_threshold(&mut self, ms: f64) -> crate::Result<()> {
        if ms <= 0.0 {
            return Err(ApeError::config("latency threshold must be positive"));
        }
        self.alerts.optimization_latency = ms;
        Ok(())
    }

    /// Apply a textual `key = value` pair through the typed setters
    pub fn set_by_key(&mut self, key: &str, value: &str) -> crate::Result<()> {
        match key {
            "monitoring.tick_interval_ms" => self.set_tick_interval_ms(parse_value(key, value)?),
            "monitoring.buffer_capacity" => self.set_buffer_capacity(parse_value(key, value)?),
            "monitoring.seed" => {
                let seed: Option<u64> = optional(value).map(|v| parse_value(key, v)).transpose()?;
                self.set_seed(seed);
                Ok(())
            }
            "reporting.email" => self.set_report_email(optional(value).map(str::to_string)),
            "compliance.uptime" => self.set_uptime_baseline(parse_value(key, value)?),
            "compliance.security" => self.set_security_baseline(parse_value(key, value)?),
            "alerts.temp_warning" => {
                let critical = self.alerts.temp_critical;
                self.set_temperature_thresholds(parse_value(key, value)?, critical)
            }
            "alerts.temp_critical" => {
                let warning = self.alerts.temp_warning;
                self.set_temperature_thresholds(warning, parse_value(key, value)?)
            }
            "alerts.maintenance_fan_speed" => {
                self.set_fan_maintenance_threshold(parse_value(key, value)?)
            }
            "alerts.critical_memory" => self.set_memory_critical_threshold(parse_value(key, value)?),
            "alerts.optimization_latency" => self.set_latency_threshold(parse_value(key, value)?),
            other => Err(ApeError::config(format!(
                "unknown key '{}' (known keys: {})",
                other,
                CONFIG_KEYS.join(", ")
            ))),
        }
    }
}

/// Saved configuration plus a working draft.
///
/// Unsaved changes are whatever makes the two snapshots differ.
#[derive(Debug, Clone)]
pub struct ConfigEditor {
    saved: ApeConfig,
    draft: ApeConfig,
}

impl ConfigEditor {
    pub fn new(saved: ApeConfig) -> Self {
        Self {
            draft: saved.clone(),
            saved,
        }
    }

    pub fn saved(&self) -> &ApeConfig {
        &self.saved
    }

    pub fn draft(&self) -> &ApeConfig {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ApeConfig {
        &mut self.draft
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.saved != self.draft
    }

    /// Promote the draft to the saved snapshot
    pub fn commit(&mut self) -> &ApeConfig {
        self.saved = self.draft.clone();
        &self.saved
    }

    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
    }
}
