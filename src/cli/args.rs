//! CLI argument definitions using Clap

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::domain::config::{MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS};

/// launchdeck - interactive project launcher with auto-committing file watches
#[derive(Parser, Debug)]
#[command(name = "launchdeck")]
#[command(version)]
#[command(about = "Interactive launcher for projects, commands and categorized files")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory holding the project, command and category files
    #[arg(short = 'b', long, value_name = "DIR", env = "LAUNCHDECK_HOME")]
    pub base_dir: Option<String>,

    /// Poll interval for watched files, in milliseconds
    #[arg(
        long,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS)
    )]
    pub poll_interval: Option<u64>,

    /// Report detected changes without committing them
    #[arg(long)]
    pub no_auto_commit: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Resolved options for the interactive session
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub base_dir: PathBuf,
    pub poll_interval: Duration,
    pub auto_commit: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["base_dir", "poll_interval_ms", "auto_commit"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
