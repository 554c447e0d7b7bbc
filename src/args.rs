//! Command-line arguments for the timeline viewer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Interactive scenario timeline viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Scenario JSON file to open; a built-in sample is shown when omitted
    #[arg(help = "Path to a scenario file")]
    pub scenario: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Date of the "today" marker (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
