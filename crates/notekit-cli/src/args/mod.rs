mod commands;

pub use commands::*;

use crate::types::{LogLevel, OutputFormat};
use clap::Parser;

#[derive(Parser)]
#[command(name = "notekit")]
#[command(about = "Browse, react to and publish notes from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Defaults to $NOTEKIT_PATH, then the platform data directory
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
