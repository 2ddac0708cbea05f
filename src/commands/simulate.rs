//! Synchronous simulation command.
//!
//! Replays a number of simulation ticks into a fresh engine so reports can be
//! produced without waiting on the live runtime.

use anyhow::{Context, Result};
use chrono::Local;
use clap::ArgMatches;
use colored::Colorize;

use crate::core::system_monitor::{evaluate_alerts, LiveMetricsSnapshot};
use crate::core::{ApeConfig, ReportingEngine, Simulator};
use crate::ui::{print_alerts, print_snapshot_details};

pub const DEFAULT_TICKS: usize = 1_000;
/// Upper bound on replayed ticks; older readings are evicted anyway
pub const MAX_TICKS: usize = 1_000_000;

fn clamp_ticks(requested: usize) -> usize {
    if requested > MAX_TICKS {
        log::warn!("Requested {} ticks; replaying the maximum of {}", requested, MAX_TICKS);
    }
    requested.min(MAX_TICKS)
}

/// Load the config, apply the `--seed` override and replay `--ticks` ticks
pub(crate) fn run_simulation(matches: &ArgMatches) -> Result<(ReportingEngine, LiveMetricsSnapshot)> {
    let mut config = ApeConfig::load().context("Failed to load configuration")?;
    if let Some(seed) = matches.get_one::<u64>("seed").copied() {
        config.set_seed(Some(seed));
    }

    let ticks = clamp_ticks(
        matches
            .get_one::<usize>("ticks")
            .copied()
            .unwrap_or(DEFAULT_TICKS),
    );

    let engine = ReportingEngine::from_config(&config);
    let mut simulator = Simulator::new(config.tick_interval(), config.monitoring.seed);
    let snapshot = simulator.run_into(&engine, ticks, Local::now());

    log::info!(
        "Simulated {} ticks, {} readings buffered",
        ticks,
        engine.buffer().len()
    );

    Ok((engine, snapshot))
}

/// Execute the simulate command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let (engine, snapshot) = run_simulation(matches)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_snapshot_details(&snapshot);
    println!(
        "\n  {} readings buffered (capacity {})",
        engine.buffer().len().to_string().bold(),
        engine.buffer().capacity()
    );

    let alerts = evaluate_alerts(&snapshot, &engine.policy().alerts);
    if !alerts.is_empty() {
        println!("\n{}", "ALERTS".bold().yellow());
        print_alerts(&alerts);
    }

    Ok(())
}
