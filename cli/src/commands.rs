pub mod clear_logs;
pub mod scan;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scanport_common::config::DEFAULT_CONFIG_PATH;

pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Parser)]
#[command(name = "scanport")]
#[command(about = "A TCP port scanning service.", version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the TOML config file, created with defaults when missing
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Also write log lines to a timestamped file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP scan endpoint
    #[command(alias = "s")]
    Serve,
    /// Scan one host once and print the report as JSON
    #[command(alias = "x")]
    Scan {
        host: String,
        #[arg(allow_negative_numbers = true)]
        begin_port: String,
        #[arg(allow_negative_numbers = true)]
        end_port: String,
    },
    /// Delete `logfile_*.log` files from a log directory
    ClearLogs {
        /// Directory holding the log files [default: --log-dir or `logs`]
        dir: Option<PathBuf>,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
