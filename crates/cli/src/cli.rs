use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ampline", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log directive for the requested verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the steady-state conductor temperature for a load current
    Steady {
        /// Scenario file (TOML); the reference case is used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Load current in A (defaults to the scenario's steady current)
        #[arg(long)]
        current: Option<f64>,
        /// Convergence tolerance on the balancing current in A
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Run the fault-and-reclosure transient and print a summary
    Simulate {
        /// Scenario file (TOML); the reference case is used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the trajectory as CSV (time_s, temperature_c, current_a)
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Show the temperature over log time in a window
        #[arg(long)]
        plot: bool,
    },
    /// Print the default scenario file
    Config,
}
