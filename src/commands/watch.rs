//! Live simulation command.
//!
//! Drives the simulation on the tokio runtime for a fixed number of seconds,
//! printing each published snapshot, then reports on what was buffered.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::system_monitor::{evaluate_alerts, PerformanceMode, SimulationRuntime};
use crate::core::{ApeConfig, ReportingEngine};
use crate::ui::{print_alerts, print_daily_report, print_snapshot};

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = ApeConfig::load().context("Failed to load configuration")?;
    let seconds = matches.get_one::<u64>("seconds").copied().unwrap_or(10);

    let engine = Arc::new(ReportingEngine::from_config(&config));
    let runtime = SimulationRuntime::start(
        Arc::clone(&engine),
        config.tick_interval(),
        config.monitoring.seed,
    )
    .context("Failed to start simulation runtime")?;

    if let Some(mode) = matches.get_one::<String>("mode") {
        let mode: PerformanceMode = mode.parse()?;
        runtime.set_performance_mode(mode);
    }
    if let Some(fan) = matches.get_one::<f64>("fan").copied() {
        runtime.set_manual_fan_speed(Some(fan));
    }

    println!(
        "{} for {}s (tick every {}ms)\n",
        "Watching simulated system".bold().bright_cyan(),
        seconds,
        config.monitoring.tick_interval_ms
    );

    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut shown = runtime.latest();
    while Instant::now() < deadline {
        let snapshot = runtime.latest();
        // Each tick publishes a new Arc
        if !Arc::ptr_eq(&snapshot, &shown) {
            print_snapshot(&snapshot);
            print_alerts(&evaluate_alerts(&snapshot, &engine.policy().alerts));
            shown = snapshot;
        }
        std::thread::sleep(config.tick_interval() / 2);
    }

    let snapshot = runtime.latest();
    runtime.shutdown();

    let report = engine.generate_daily_report(&snapshot);
    print_daily_report(&report);

    Ok(())
}
