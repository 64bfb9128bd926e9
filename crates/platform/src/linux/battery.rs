use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::provider::{check_index, BatteryError, BatteryProvider, Result};
use crate::snapshot::{health_percent, seconds_at_rate, RawSnapshot};
use crate::types::{BatteryTechnology, ChargeState};

pub const POWER_SUPPLY_PATH: &str = "/sys/class/power_supply";

/// Provider reading the Linux power supply class directly.
///
/// Values in sysfs are integers in micro-units (µWh, µAh, µW, µA, µV) and
/// tenths of a degree Celsius.
#[derive(Debug, Clone)]
pub struct SysfsProvider {
    root: PathBuf,
}

impl Default for SysfsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsProvider {
    pub fn new() -> Self {
        Self::with_root(POWER_SUPPLY_PATH)
    }

    /// Use a different power supply directory. Intended for tests.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn is_supported(&self) -> bool {
        self.root.exists()
    }

    /// System batteries sorted by supply name (BAT0, BAT1, ...).
    ///
    /// Peripheral batteries (`scope` = `Device`, e.g. wireless mice) are
    /// skipped.
    fn battery_paths(&self) -> io::Result<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.root)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                read_attr(path, "type").as_deref() == Some("Battery")
                    && read_attr(path, "scope").as_deref() != Some("Device")
            })
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl BatteryProvider for SysfsProvider {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn enumerate(&self) -> Vec<usize> {
        match self.battery_paths() {
            Ok(paths) => (0..paths.len()).collect(),
            Err(e) => {
                debug!(root = %self.root.display(), error = %e, "no power supplies");
                Vec::new()
            }
        }
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        if !self.is_supported() {
            return Err(BatteryError::Unsupported(format!(
                "{} does not exist",
                self.root.display()
            )));
        }

        let paths = self.battery_paths().map_err(BatteryError::read)?;
        check_index(paths.len(), index)?;

        let path = &paths[index];
        trace!(path = %path.display(), "reading power supply");
        let mut snapshot = read_supply(path)?;

        if snapshot.state == ChargeState::Unknown
            && snapshot.percent >= 99.0
            && is_ac_connected(&self.root)
        {
            snapshot.state = ChargeState::Full;
        }

        Ok(snapshot.normalized())
    }
}

fn read_supply(path: &Path) -> Result<RawSnapshot> {
    let status = fs::read_to_string(path.join("status"))
        .map_err(|e| BatteryError::ReadError(format!("{}/status: {}", path.display(), e)))?;
    let state = ChargeState::from_sysfs(&status);

    let voltage_v = read_micro(path, "voltage_now").map(f64::abs).unwrap_or(0.0);
    let design_voltage = read_micro(path, "voltage_min_design").unwrap_or(voltage_v);

    let energy = |energy_attr: &str, charge_attr: &str| {
        read_micro(path, energy_attr)
            .or_else(|| read_micro(path, charge_attr).map(|ah| ah * design_voltage))
            .unwrap_or(0.0)
    };
    let energy_wh = energy("energy_now", "charge_now");
    let energy_full_wh = energy("energy_full", "charge_full");
    let energy_full_design_wh = energy("energy_full_design", "charge_full_design");

    let energy_rate_w = read_micro(path, "power_now")
        .or_else(|| read_micro(path, "current_now").map(|a| a * voltage_v))
        .map(f64::abs)
        .unwrap_or(0.0);

    let percent = read_attr(path, "capacity")
        .and_then(|v| v.parse::<f64>().ok())
        .or_else(|| {
            (energy_full_wh > 0.0).then(|| energy_wh / energy_full_wh * 100.0)
        })
        .unwrap_or(0.0);

    let time_to_empty_secs = read_attr(path, "time_to_empty_now")
        .and_then(|v| v.parse::<f64>().ok())
        .or_else(|| {
            state
                .is_discharging()
                .then(|| seconds_at_rate(energy_wh, energy_rate_w))
                .flatten()
        });
    let time_to_full_secs = read_attr(path, "time_to_full_now")
        .and_then(|v| v.parse::<f64>().ok())
        .or_else(|| {
            state
                .is_charging()
                .then(|| seconds_at_rate((energy_full_wh - energy_wh).max(0.0), energy_rate_w))
                .flatten()
        });

    Ok(RawSnapshot {
        vendor: read_attr(path, "manufacturer"),
        model: read_attr(path, "model_name"),
        serial_number: read_attr(path, "serial_number"),
        technology: read_attr(path, "technology")
            .map(|t| BatteryTechnology::from_sysfs(&t))
            .unwrap_or_default(),
        percent,
        state,
        capacity_percent: health_percent(energy_full_wh, energy_full_design_wh),
        temperature_c: read_attr(path, "temp")
            .and_then(|v| v.parse::<f64>().ok())
            .map(|tenths| tenths / 10.0),
        cycle_count: read_attr(path, "cycle_count").and_then(|v| v.parse::<u32>().ok()),
        energy_wh,
        energy_full_wh,
        energy_full_design_wh,
        energy_rate_w,
        voltage_v,
        time_to_empty_secs,
        time_to_full_secs,
    })
}

fn read_attr(path: &Path, name: &str) -> Option<String> {
    fs::read_to_string(path.join(name))
        .ok()
        .map(|content| content.trim().to_string())
}

fn read_micro(path: &Path, name: &str) -> Option<f64> {
    read_attr(path, name)
        .and_then(|v| v.parse::<i64>().ok())
        .map(|micro| micro as f64 / 1_000_000.0)
}

fn is_ac_connected(root: &Path) -> bool {
    let Ok(entries) = fs::read_dir(root) else {
        return false;
    };

    entries.flatten().any(|entry| {
        let path = entry.path();
        read_attr(&path, "type").as_deref() == Some("Mains")
            && read_attr(&path, "online").as_deref() == Some("1")
    })
}
