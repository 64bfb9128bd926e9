use std::time::Duration;

use battinfo::{Backend, TempUnit, TimeFormat};
use clap::{Args, Parser, Subcommand};

use crate::config::LogLevel;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one battery in a readable layout (default)
    Show,

    /// List every battery the backend can see
    #[command(alias = "ls")]
    List,

    /// Stream battery readings as JSON (suitable for piping)
    #[command(alias = "raw")]
    Pipe {
        /// Number of samples (0 = infinite)
        #[arg(short, long, default_value_t = 0)]
        samples: u32,

        /// Time between samples, e.g. 500ms, 2s, 1m
        #[arg(short, long, default_value = "1s", value_parser = humantime::parse_duration)]
        interval: Duration,

        /// Compact JSON output (one object per line)
        #[arg(short, long)]
        compact: bool,

        /// Write logs to a rolling file instead of stderr
        #[arg(long)]
        log_file: bool,
    },

    /// Print backend and raw battery data for troubleshooting
    Debug,

    /// Show or reset the configuration file
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,

        /// Reset the config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Options that shape how the battery is read and rendered.
///
/// Each one overrides the matching config file value.
#[derive(Debug, Clone, Default, Args)]
pub struct BatteryArgs {
    /// Battery index
    #[arg(long, global = true)]
    pub index: Option<usize>,

    /// Time estimate format (seconds, minutes, human)
    #[arg(long, global = true)]
    pub time_format: Option<TimeFormat>,

    /// Temperature unit (celsius, fahrenheit)
    #[arg(long, global = true)]
    pub temp_unit: Option<TempUnit>,

    /// Minimum time between hardware reads in milliseconds
    #[arg(long, global = true)]
    pub refresh_ms: Option<u32>,

    /// Decimal places for measurements
    #[arg(long, global = true)]
    pub decimals: Option<usize>,

    /// Battery backend (auto, native, system)
    #[arg(long, global = true)]
    pub backend: Option<Backend>,
}

/// Battery telemetry with normalized units.
///
/// Reads charge, health, energy, power draw and time estimates from sysfs,
/// ioreg or the cross-platform backend.
#[derive(Debug, Parser)]
#[command(name = "battinfo", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub battery: BatteryArgs,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
}
