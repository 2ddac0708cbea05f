use crate::core::config::CONFIG_KEYS;
use crate::core::{ApeConfig, ConfigEditor};
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle_config(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("set", sub_matches)) => set(sub_matches),
        Some(("reset", _)) => reset(),
        _ => {
            println!("Use 'ape config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = ApeConfig::load()?;
    let path = ApeConfig::get_config_path()?;

    println!("{} {}", "Config file:".white(), path.display().to_string().cyan());
    println!("{}", serde_json::to_string_pretty(&config)?);

    if config.get_report_email().is_none() {
        println!();
        println!("{}", "No report destination configured.".yellow());
        println!(
            "  {}",
            "ape config set reporting.email ops@example.com".cyan().bold()
        );
    }

    Ok(())
}

fn set(matches: &clap::ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .context("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut editor = ConfigEditor::new(ApeConfig::load()?);
    if let Err(e) = editor.draft_mut().set_by_key(key, value) {
        println!("{}", format!("✗ {}", e).red());
        println!("{}", "Known keys:".dimmed());
        for known in CONFIG_KEYS {
            println!("  {}", known.dimmed());
        }
        return Err(e.into());
    }

    if !editor.has_unsaved_changes() {
        println!("{}", format!("{} already set to {}", key, value).dimmed());
        return Ok(());
    }

    editor.commit().save()?;
    println!("{} {}", format!("✓ {} set to:", key).green(), value.bold());

    Ok(())
}

fn reset() -> Result<()> {
    ApeConfig::default().save()?;
    println!("{}", "✓ Configuration reset to defaults".green());
    Ok(())
}
