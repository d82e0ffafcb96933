use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tenor_calendar::PeriodUnit;

/// Tenor batched calendar arithmetic.
#[derive(Parser)]
#[command(
    name = "tenor",
    version,
    about = "Vectorized proleptic Gregorian date and period arithmetic"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Shift the configured dates by the configured periods.
    Shift(ShiftArgs),
    /// Describe the configured dates.
    Inspect(InspectArgs),
}

/// Arguments for the `shift` subcommand.
#[derive(clap::Args)]
pub struct ShiftArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tenor.toml")]
    pub config: PathBuf,

    /// Override the period unit from config (day, week, month, year).
    #[arg(short, long)]
    pub unit: Option<PeriodUnit>,

    /// Override the period quantities from config with a single quantity.
    #[arg(short, long, allow_hyphen_values = true)]
    pub quantity: Option<i32>,

    /// Subtract the periods instead of adding them.
    #[arg(long)]
    pub subtract: bool,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tenor.toml")]
    pub config: PathBuf,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
