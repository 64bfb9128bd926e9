use color_eyre::eyre::Result;

use battinfo::BatteryProvider;

use super::provider;
use crate::config::{config_path, UserConfig};
use crate::logging;

pub fn run(config: &UserConfig) -> Result<()> {
    println!("battinfo debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- System Info ---");
    println!("OS: {} ({})", std::env::consts::OS, std::env::consts::ARCH);
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    println!("\n--- Backend ---");
    let provider = provider(config);
    println!("Requested: {}", config.backend);
    println!("Provider: {}", provider.name());
    match config.read_timeout() {
        Some(limit) => println!("Read timeout: {}", humantime::format_duration(limit)),
        None => println!("Read timeout: none"),
    }

    let indices = provider.enumerate();
    println!("Batteries: {:?}", indices);

    for index in indices {
        println!("\n--- Battery {} (raw) ---", index);
        match provider.snapshot(index) {
            Ok(raw) => println!("{:#?}", raw),
            Err(e) => println!("Error: {}", e),
        }
    }

    println!("\n--- Config Paths ---");
    println!("Config: {}", config_path().display());
    println!("Logs: {}", logging::log_dir().display());

    println!("\n--- Effective Config ---");
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
