use std::collections::HashMap;
use std::io;
use std::process::Command;

use tracing::debug;

use crate::provider::{check_index, BatteryError, BatteryProvider, Result};
use crate::snapshot::{health_percent, RawSnapshot};
use crate::types::{BatteryTechnology, ChargeState};

/// IOKit reports "no estimate" as 0xFFFF minutes.
const TIME_UNAVAILABLE: i64 = 65535;

/// Provider parsing `ioreg -rn AppleSmartBattery`.
///
/// Capacities are mAh, voltage mV, amperage signed mA, temperature
/// hundredths of a degree Celsius and time estimates minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IoregProvider;

impl IoregProvider {
    pub fn new() -> Self {
        Self
    }

    fn query(&self) -> Result<String> {
        let output = Command::new("ioreg")
            .args(["-rn", "AppleSmartBattery"])
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => BatteryError::unsupported("ioreg is not available"),
                _ => BatteryError::read(e),
            })?;

        if !output.status.success() {
            return Err(BatteryError::ReadError(format!(
                "ioreg exited with {}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl BatteryProvider for IoregProvider {
    fn name(&self) -> &'static str {
        "ioreg"
    }

    fn enumerate(&self) -> Vec<usize> {
        match self.query() {
            Ok(output) => (0..parse_ioreg_output(&output).len()).collect(),
            Err(e) => {
                debug!(error = %e, "ioreg query failed");
                Vec::new()
            }
        }
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        let output = self.query()?;
        let mut entries = parse_ioreg_output(&output);
        check_index(entries.len(), index)?;
        Ok(entries.swap_remove(index).into_snapshot().normalized())
    }
}

/// Top-level properties of one `AppleSmartBattery` registry entry.
#[derive(Debug, Default)]
struct IoregEntry {
    values: HashMap<String, String>,
}

impl IoregEntry {
    fn number(&self, key: &str) -> Option<i64> {
        let raw = self.values.get(key)?;
        // Negative amperage is printed as its unsigned 64-bit representation.
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<u64>().ok().map(|v| v as i64))
    }

    fn text(&self, key: &str) -> Option<String> {
        let raw = self.values.get(key)?;
        let unquoted = raw.strip_prefix('"')?.strip_suffix('"')?;
        Some(unquoted.to_string())
    }

    fn flag(&self, key: &str) -> bool {
        self.values.get(key).map(String::as_str) == Some("Yes")
    }

    fn into_snapshot(self) -> RawSnapshot {
        let voltage_v = self.number("Voltage").unwrap_or(0) as f64 / 1000.0;
        let mah_to_wh = |mah: i64| mah as f64 * voltage_v / 1000.0;

        let raw_current = self
            .number("AppleRawCurrentCapacity")
            .or_else(|| self.number("CurrentCapacity"))
            .unwrap_or(0);
        let raw_max = self
            .number("AppleRawMaxCapacity")
            .or_else(|| self.number("MaxCapacity"))
            .unwrap_or(0);
        let design = self.number("DesignCapacity").unwrap_or(0);

        let percent = match (self.number("CurrentCapacity"), self.number("MaxCapacity")) {
            (Some(current), Some(max)) if max > 0 => current as f64 / max as f64 * 100.0,
            _ if raw_max > 0 => raw_current as f64 / raw_max as f64 * 100.0,
            _ => 0.0,
        };

        let amperage_a = self.number("Amperage").unwrap_or(0) as f64 / 1000.0;
        let energy_full_wh = mah_to_wh(raw_max);
        let energy_full_design_wh = mah_to_wh(design);

        let external = self.flag("ExternalConnected");
        let state = if self.flag("IsCharging") {
            ChargeState::Charging
        } else if self.flag("FullyCharged") || (external && percent >= 99.0) {
            ChargeState::Full
        } else if !external && percent <= 0.0 {
            ChargeState::Empty
        } else if !external {
            ChargeState::Discharging
        } else {
            ChargeState::Unknown
        };

        let minutes = |key: &str| {
            self.number(key)
                .filter(|m| *m >= 0 && *m != TIME_UNAVAILABLE)
                .map(|m| m as f64 * 60.0)
        };
        let time_to_empty_secs = if state.is_discharging() {
            minutes("AvgTimeToEmpty").or_else(|| minutes("TimeRemaining"))
        } else {
            None
        };
        let time_to_full_secs = if state.is_charging() {
            minutes("AvgTimeToFull").or_else(|| minutes("TimeRemaining"))
        } else {
            None
        };

        RawSnapshot {
            vendor: self.text("Manufacturer"),
            model: self.text("DeviceName"),
            serial_number: self
                .text("BatterySerialNumber")
                .or_else(|| self.text("Serial")),
            // Apple does not publish the chemistry; every AppleSmartBattery is Li-ion.
            technology: BatteryTechnology::LithiumIon,
            percent,
            state,
            capacity_percent: health_percent(energy_full_wh, energy_full_design_wh),
            temperature_c: self.number("Temperature").map(|t| t as f64 / 100.0),
            cycle_count: self
                .number("CycleCount")
                .and_then(|c| u32::try_from(c).ok()),
            energy_wh: mah_to_wh(raw_current),
            energy_full_wh,
            energy_full_design_wh,
            energy_rate_w: (amperage_a * voltage_v).abs(),
            voltage_v,
            time_to_empty_secs,
            time_to_full_secs,
        }
    }
}

/// Split `ioreg` output into one entry per `+-o AppleSmartBattery` node.
fn parse_ioreg_output(output: &str) -> Vec<IoregEntry> {
    let mut entries = Vec::new();
    let mut current: Option<IoregEntry> = None;

    for line in output.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("+-o") {
            entries.extend(current.take());
            if trimmed.contains("AppleSmartBattery") {
                current = Some(IoregEntry::default());
            }
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };
        if let Some((key, value)) = parse_property(trimmed) {
            entry.values.insert(key, value);
        }
    }

    entries.extend(current);
    entries
}

fn parse_property(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix('"')?;
    let (key, rest) = rest.split_once('"')?;
    let value = rest.trim_start().strip_prefix('=')?.trim();
    Some((key.to_string(), value.to_string()))
}
