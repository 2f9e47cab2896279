//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rule engine for flagging unreleased cloud-client resources
#[derive(Parser)]
#[command(
    name = "cleanup-rules",
    version,
    about = "Manage cleanup rules and path exceptions for cloud-client release checks",
    long_about = "Loads, validates, edits, diffs, backs up and restores the rule file that \
                  tells the analyzer which cloud clients must be closed and where that \
                  requirement is waived."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to rules file (defaults to ~/.config/cleanup-rules/rules.yaml, then the bundled rules)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write logs to this directory (daily rotation)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON, one document per command
    Json,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate the rules file
    Validate,
    /// Print the loaded services and exceptions
    Show,
    /// Check whether a package or file path is exempt
    Check {
        /// Package import path or file path
        path: String,
        /// Treat the path as a file path
        #[arg(long)]
        file: bool,
    },
    /// Enable or disable the test_files exception
    SetTestException {
        /// New enabled value
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
        /// Write the result here instead of back to the rules file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Write a backup of the rules file
    Backup {
        /// Backup destination
        path: PathBuf,
    },
    /// Replace the rules file with a backup
    Restore {
        /// Backup to restore from
        path: PathBuf,
        /// Write the restored rules here instead of the rules file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// List differences between the rules file and another file
    Compare {
        /// File to compare against
        other: PathBuf,
    },
    /// Check that a rules file loads and validates
    Verify {
        /// File to verify
        path: PathBuf,
    },
    /// Write the bundled rules to a file
    Init {
        /// Path where to create the rules file
        #[arg(long, short = 'p')]
        path: Option<PathBuf>,
    },
    /// Display version information
    Version,
}
