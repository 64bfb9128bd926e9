//! Cross-platform provider built on the `starship-battery` crate.
//!
//! Covers Linux, macOS, Windows, FreeBSD and DragonFlyBSD. This is the
//! provider used on hosts without a dedicated native backend.

use starship_battery::units::electric_potential::volt;
use starship_battery::units::energy::watt_hour;
use starship_battery::units::power::watt;
use starship_battery::units::ratio::percent;
use starship_battery::units::thermodynamic_temperature::degree_celsius;
use starship_battery::units::time::second;
use starship_battery::{Battery, Manager};
use tracing::debug;

use crate::provider::{check_index, BatteryError, BatteryProvider, Result};
use crate::snapshot::RawSnapshot;
use crate::types::{BatteryTechnology, ChargeState};

/// Provider backed by the OS power APIs through `starship-battery`.
///
/// A fresh `Manager` is created for every call so the provider holds no
/// platform handles between reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProvider;

impl SystemProvider {
    pub fn new() -> Self {
        Self
    }

    fn batteries(&self) -> Result<(Manager, Vec<std::result::Result<Battery, String>>)> {
        let manager = Manager::new().map_err(BatteryError::unsupported)?;
        let batteries = manager
            .batteries()
            .map_err(BatteryError::unsupported)?
            .map(|b| b.map_err(|e| e.to_string()))
            .collect();
        Ok((manager, batteries))
    }
}

impl BatteryProvider for SystemProvider {
    fn name(&self) -> &'static str {
        "system"
    }

    fn enumerate(&self) -> Vec<usize> {
        match self.batteries() {
            Ok((_, batteries)) => (0..batteries.len()).collect(),
            Err(e) => {
                debug!(error = %e, "battery enumeration unavailable");
                Vec::new()
            }
        }
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        let (manager, mut batteries) = self.batteries()?;
        check_index(batteries.len(), index)?;

        let mut battery = batteries.swap_remove(index).map_err(BatteryError::ReadError)?;
        manager
            .refresh(&mut battery)
            .map_err(BatteryError::read)?;

        Ok(snapshot_from_battery(&battery).normalized())
    }
}

fn snapshot_from_battery(battery: &Battery) -> RawSnapshot {
    RawSnapshot {
        vendor: battery.vendor().map(str::to_string),
        model: battery.model().map(str::to_string),
        serial_number: battery.serial_number().map(str::to_string),
        technology: BatteryTechnology::from(battery.technology()),
        percent: f64::from(battery.state_of_charge().get::<percent>()),
        state: ChargeState::from(battery.state()),
        capacity_percent: f64::from(battery.state_of_health().get::<percent>()),
        temperature_c: battery
            .temperature()
            .map(|t| f64::from(t.get::<degree_celsius>())),
        cycle_count: battery.cycle_count(),
        energy_wh: f64::from(battery.energy().get::<watt_hour>()),
        energy_full_wh: f64::from(battery.energy_full().get::<watt_hour>()),
        energy_full_design_wh: f64::from(battery.energy_full_design().get::<watt_hour>()),
        energy_rate_w: f64::from(battery.energy_rate().get::<watt>()),
        voltage_v: f64::from(battery.voltage().get::<volt>()),
        time_to_empty_secs: battery
            .time_to_empty()
            .map(|t| f64::from(t.get::<second>())),
        time_to_full_secs: battery
            .time_to_full()
            .map(|t| f64::from(t.get::<second>())),
    }
}
