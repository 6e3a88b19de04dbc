use std::error::Error;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    labels::{self, LabelsArgs},
    run::{self, RunArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "flow-sim", about = "Multi-particle azimuthal correlator toolkit")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and analyse a Monte Carlo sample, writing a JSON report.
    Run(RunArgs),
    /// Cross-check the correlator evaluators on a random event.
    Check(CheckArgs),
    /// Print the bin labels of a configuration.
    Labels(LabelsArgs),
}

fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    builder.filter_level(match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    });
    builder.parse_default_env();
    builder.try_init()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Check(args) => check::run(&args),
        Command::Labels(args) => labels::run(&args),
    }
}
