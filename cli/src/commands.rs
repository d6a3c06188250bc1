pub mod check;
pub mod decide;
pub mod resolve;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::terminal::logging::Verbosity;

#[derive(Parser)]
#[command(name = "pricecut")]
#[command(about = "Decides whether and by how much to cut listing prices.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a pricing config and show its bands
    #[command(alias = "c")]
    Check { config: PathBuf },
    /// Show which band governs a price
    #[command(alias = "r")]
    Resolve { config: PathBuf, price: Decimal },
    /// Evaluate price cuts for a set of items
    #[command(alias = "d")]
    Decide(decide::DecideArgs),
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> Verbosity {
        match (self.quiet, self.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Debug,
            (false, _) => Verbosity::Trace,
        }
    }
}
