use std::fmt::Write;

use battinfo::{BatteryProvider, Measurement, Unit};
use color_eyre::eyre::Result;

use super::provider;
use crate::config::UserConfig;

pub fn run(config: &UserConfig) -> Result<()> {
    print!("{}", render(&provider(config), config.decimals));
    Ok(())
}

fn render(provider: &impl BatteryProvider, decimals: usize) -> String {
    let indices = provider.enumerate();
    if indices.is_empty() {
        return format!("No batteries found ({} backend)\n", provider.name());
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6}{:<12}{:<20}{:>9}  {}",
        "INDEX", "VENDOR", "MODEL", "CHARGE", "STATE"
    );

    for index in indices {
        match provider.snapshot(index) {
            Ok(raw) => {
                let percent = Measurement::new(raw.percent, Unit::Percent);
                let _ = writeln!(
                    out,
                    "{:<6}{:<12}{:<20}{:>9}  {}",
                    index,
                    raw.vendor.as_deref().unwrap_or("-"),
                    raw.model.as_deref().unwrap_or("-"),
                    percent.format_with(decimals),
                    raw.state
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{:<6}error: {}", index, e);
            }
        }
    }

    out
}
