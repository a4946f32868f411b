use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    derive::{self, DeriveArgs},
    run::{self, RunArgs},
    version::{self, VersionArgs},
};
use logging::{init_logging, LogFormat, LogLevel};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "hhcf-sim",
    about = "Height-height correlation functions of fluctuating interfaces"
)]
struct Cli {
    /// Minimum level of emitted log events; RUST_LOG takes precedence.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    /// Log line layout.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a correlation function from a parameter file and persist it.
    Run(RunArgs),
    /// Print the characteristic scales derived from a parameter file.
    Derive(DeriveArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Derive(args) => derive::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
