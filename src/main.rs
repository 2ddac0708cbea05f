use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use ape_monitor::commands;

fn seed_arg() -> Arg {
    Arg::new("seed")
        .short('s')
        .long("seed")
        .value_name("SEED")
        .help("Seed the simulation and estimators for reproducible output")
        .value_parser(clap::value_parser!(u64))
}

fn ticks_arg(default: &'static str) -> Arg {
    Arg::new("ticks")
        .short('t')
        .long("ticks")
        .value_name("N")
        .help("Number of simulation ticks to replay before reporting")
        .value_parser(clap::value_parser!(usize))
        .default_value(default)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output as JSON")
        .action(ArgAction::SetTrue)
}

fn delivery_args() -> [Arg; 2] {
    [
        Arg::new("send")
            .long("send")
            .help("Deliver the report to the configured or given destination")
            .action(ArgAction::SetTrue),
        Arg::new("to")
            .long("to")
            .value_name("ADDR")
            .help("Destination address (overrides reporting.email)")
            .requires("send"),
    ]
}

fn main() -> Result<()> {
    ape_monitor::init_logging();

    let matches = Command::new("ape")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulated hardware monitoring with daily reports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Run the simulation synchronously and print the final snapshot")
                .arg(ticks_arg("1000"))
                .arg(seed_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("report")
                .about("Simulate, then print the daily report")
                .arg(ticks_arg("1000"))
                .arg(seed_arg())
                .arg(json_arg())
                .args(delivery_args()),
        )
        .subcommand(
            Command::new("category")
                .about("Print a single category report")
                .arg(
                    Arg::new("category")
                        .help("Report category")
                        .value_parser(["thermal", "processing", "network", "system", "all"])
                        .required(true)
                        .index(1),
                )
                .arg(ticks_arg("100"))
                .arg(seed_arg())
                .args(delivery_args()),
        )
        .subcommand(
            Command::new("watch")
                .about("Run the live simulation and report when done")
                .arg(
                    Arg::new("seconds")
                        .long("seconds")
                        .value_name("N")
                        .help("How long to watch")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_name("MODE")
                        .help("Performance mode")
                        .value_parser(["eco", "balanced", "performance"]),
                )
                .arg(
                    Arg::new("fan")
                        .long("fan")
                        .value_name("PERCENT")
                        .help("Pin the fan to a manual speed")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'ape config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(
                            Arg::new("key")
                                .help("Dotted key, e.g. alerts.temp_warning")
                                .required(true)
                                .index(1),
                        )
                        .arg(
                            Arg::new("value")
                                .help("New value ('none' clears optional values)")
                                .required(true)
                                .index(2),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore default configuration")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("simulate", sub_matches)) => commands::simulate(sub_matches)?,
        Some(("report", sub_matches)) => commands::report(sub_matches)?,
        Some(("category", sub_matches)) => commands::category(sub_matches)?,
        Some(("watch", sub_matches)) => commands::watch(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::handle_config(sub_matches)?,
        _ => {
            println!("Use 'ape --help' for more information.");
        }
    }

    Ok(())
}
