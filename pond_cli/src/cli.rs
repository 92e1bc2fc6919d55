//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "pond", version, about = "Pond monitor CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/pond_config.toml")]
    pub config: PathBuf,

    /// Acting user id, checked against the configured allow-list
    #[arg(long, value_name = "ID")]
    pub user: i64,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Use simulated device and source instead of the network
    #[arg(long, action = ArgAction::SetTrue)]
    pub sim: bool,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the latest reading and print it against the user's thresholds
    Status,
    /// Set the temperature alert bounds
    SetTemp {
        /// Lower bound in degrees C
        #[arg(long)]
        min: f32,
        /// Upper bound in degrees C
        #[arg(long)]
        max: f32,
    },
    /// Set the humidity alert bounds
    SetHumid {
        /// Lower bound in percent
        #[arg(long)]
        min: f32,
        /// Upper bound in percent
        #[arg(long)]
        max: f32,
    },
    /// Enable alert notifications
    NotifOn,
    /// Disable alert notifications
    NotifOff,
    /// Print the dashboard deep link carrying the current settings
    Settings,
    /// Poll the reading source and print status lines until interrupted
    Watch {
        /// Poll interval in seconds (default: source.poll_secs from config)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },
}
