use anyhow::{Context, Result};
use clap::ArgMatches;

use super::simulate::run_simulation;
use crate::core::ReportCategory;
use crate::ui::print_delivery_outcome;

/// Execute the category command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let category: ReportCategory = matches
        .get_one::<String>("category")
        .context("Category argument is required")?
        .parse()?;

    let (engine, snapshot) = run_simulation(matches)?;

    if matches.get_flag("send") {
        let to = matches.get_one::<String>("to").map(String::as_str);
        let outcome = engine.deliver_category_report(category, &snapshot, to);
        print_delivery_outcome(&outcome);
    } else {
        println!("{}", engine.generate_category_report(category, &snapshot));
    }

    Ok(())
}
