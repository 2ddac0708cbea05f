use anyhow::Result;
use clap::ArgMatches;

use super::simulate::run_simulation;
use crate::ui::{print_daily_report, print_delivery_outcome};

/// Execute the report command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let (engine, snapshot) = run_simulation(matches)?;
    let report = engine.generate_daily_report(&snapshot);

    if matches.get_flag("json") {
        println!("{}", report.to_json()?);
    } else {
        print_daily_report(&report);
    }

    if matches.get_flag("send") {
        let to = matches.get_one::<String>("to").map(String::as_str);
        let outcome = engine.deliver_daily_report(&report, to);
        print_delivery_outcome(&outcome);
    }

    Ok(())
}
