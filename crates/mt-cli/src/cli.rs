//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Timeboxed meeting runner.
///
/// Builds an agenda of timeboxed topics, runs a per-topic countdown with a
/// live cost figure, and keeps a parking lot for topics set aside mid-meeting.
#[derive(Debug, Parser)]
#[command(name = "mt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run an interactive meeting session.
    Run {
        /// Load an initial agenda from a JSON file.
        #[arg(long)]
        agenda: Option<PathBuf>,
    },

    /// Print the computed schedule for an agenda at a given elapsed time.
    Preview {
        /// Agenda JSON file.
        #[arg(long)]
        agenda: PathBuf,

        /// Elapsed meeting time: seconds, MM:SS, or HH:MM:SS.
        #[arg(long)]
        at: String,

        /// Participant count for the cost figure (falls back to config).
        #[arg(long)]
        participants: Option<u32>,

        /// Hourly rate per participant for the cost figure (falls back to config).
        #[arg(long)]
        rate: Option<f64>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
