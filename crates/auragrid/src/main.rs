use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::forecast::{handle_forecast_command, ForecastArgs};
use commands::inspect::{handle_inspect_command, InspectArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "AuraGrid short-horizon energy forecast", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Forecast load, renewables and carbon intensity for the next 48 hours
    Forecast(ForecastArgs),
    /// Print the first rows of an existing forecast file
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Forecast(args) => handle_forecast_command(args),
        Command::Inspect(args) => handle_inspect_command(args),
    }
}
