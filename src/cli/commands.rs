//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Facebook friend-list aggregator
#[derive(Parser, Debug)]
#[command(name = "graph-friends")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Access token (overrides config and environment)
    #[arg(short = 't', long, global = true)]
    pub access_token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output (same as `--log-level debug`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level; overrides `--verbose`
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Level for the tracing subscriber
    pub fn log_level(&self) -> LogLevel {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => LogLevel::Debug,
            (None, false) => LogLevel::Info,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch direct and invitable friends
    Friends {
        /// Emit a progress message after each invitable page
        #[arg(long)]
        incremental: bool,
    },

    /// Show the signed-in user's profile
    Profile,

    /// Show or download the profile picture
    Picture {
        /// Write the image bytes to this path
        #[arg(long)]
        download: Option<PathBuf>,
    },

    /// Print the resolved configuration (token redacted)
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
