//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extract OpenAI billing usage as tap messages
#[derive(Parser, Debug)]
#[command(name = "tap-openai")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON, takes precedence over --config
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show the configuration schema
    Spec,

    /// Validate the config and fetch the first page
    Check,

    /// Print the stream catalog
    Discover,

    /// Extract billing usage records
    Read {
        /// Stop after this many records
        #[arg(long)]
        max_records: Option<usize>,
    },
}
