mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::UserConfig;
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: {}; using defaults", e);
        UserConfig::default()
    });
    config.merge_with_args(&cli.battery);
    let log_level = cli.log_level.unwrap_or(config.log_level);

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            let _guard = logging::init(log_level, LogMode::Stderr);
            commands::show::run(&config)
        }
        Commands::List => {
            let _guard = logging::init(log_level, LogMode::Stderr);
            commands::list::run(&config)
        }
        Commands::Pipe {
            samples,
            interval,
            compact,
            log_file,
        } => {
            let mode = if log_file {
                LogMode::File
            } else {
                LogMode::Stderr
            };
            let _guard = logging::init(log_level, mode);
            commands::pipe::run(&config, samples, interval, compact)
        }
        Commands::Debug => {
            let _guard = logging::init(log_level, LogMode::Stderr);
            commands::debug::run(&config)
        }
        Commands::Config { path, reset } => {
            let _guard = logging::init(log_level, LogMode::Stderr);
            commands::config::run(path, reset)
        }
    }
}
