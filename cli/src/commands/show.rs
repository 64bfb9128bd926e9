use std::fmt::Write;

use battinfo::BatteryRecord;
use color_eyre::eyre::Result;

use super::open_battery;
use crate::config::UserConfig;

pub fn run(config: &UserConfig) -> Result<()> {
    let battery = open_battery(config)?;
    print!("{}", render(&battery.read(), config.decimals));
    Ok(())
}

fn render(record: &BatteryRecord, decimals: usize) -> String {
    let mut out = String::new();
    let d = decimals;

    let name = [record.vendor.as_deref(), record.model.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        let _ = writeln!(out, "Battery {}", record.battery_index);
    } else {
        let _ = writeln!(out, "Battery {} ({})", record.battery_index, name);
    }

    let mut line = |label: &str, value: String| {
        let _ = writeln!(out, "  {:<16}{}", format!("{}:", label), value);
    };

    line("State", record.state.to_string());
    line("Charge", format!("{:.*}", d, record.percent));
    line("Health", format!("{:.*}", d, record.capacity));
    line(
        "Energy",
        format!(
            "{:.*} / {:.*} (design {:.*})",
            d, record.energy, d, record.energy_full, d, record.energy_full_design
        ),
    );
    line("Rate", format!("{:.*}", d, record.energy_rate));
    line("Voltage", format!("{:.*}", d, record.voltage));
    if let Some(temperature) = record.temperature {
        line("Temperature", format!("{:.*}", d, temperature));
    }
    if let Some(cycles) = record.cycle_count {
        line("Cycles", cycles.to_string());
    }
    line("Technology", record.technology.clone());
    if let Some(serial) = &record.serial_number {
        line("Serial", serial.clone());
    }
    if let Some(time) = &record.time_to_empty {
        line("Time to empty", time.clone());
    }
    if let Some(time) = &record.time_to_full {
        line("Time to full", time.clone());
    }

    out
}
