//! Canonical battery snapshot produced by every provider.

use crate::types::{BatteryTechnology, ChargeState};

/// One point-in-time read of a battery.
///
/// Every provider maps its native fields and units into this shape. Optional
/// fields are `None` only when the OS does not report the attribute at all; a
/// reported zero stays `Some(0)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSnapshot {
    /// Battery vendor/manufacturer name (e.g., "SMP", "Samsung SDI").
    pub vendor: Option<String>,

    /// Battery model identifier (e.g., "bq20z451").
    pub model: Option<String>,

    /// Battery serial number.
    pub serial_number: Option<String>,

    /// Battery technology/chemistry type.
    pub technology: BatteryTechnology,

    /// Current charge level as a percentage (0-100).
    pub percent: f64,

    /// Current charging state.
    pub state: ChargeState,

    /// Battery health as a percentage of design capacity.
    pub capacity_percent: f64,

    /// Battery temperature in degrees Celsius.
    pub temperature_c: Option<f64>,

    /// Number of charge cycles.
    pub cycle_count: Option<u32>,

    /// Current energy remaining in watt-hours.
    pub energy_wh: f64,

    /// Energy at full charge in watt-hours.
    pub energy_full_wh: f64,

    /// Factory design energy in watt-hours.
    pub energy_full_design_wh: f64,

    /// Magnitude of the instantaneous power flow in watts.
    pub energy_rate_w: f64,

    /// Current voltage in volts.
    pub voltage_v: f64,

    /// Estimated seconds until empty.
    pub time_to_empty_secs: Option<f64>,

    /// Estimated seconds until fully charged.
    pub time_to_full_secs: Option<f64>,
}

impl RawSnapshot {
    /// Trims vendor strings and drops the ones left empty.
    ///
    /// Firmware routinely pads these attributes with whitespace or reports
    /// them as blank.
    pub fn normalized(mut self) -> Self {
        self.vendor = clean(self.vendor);
        self.model = clean(self.model);
        self.serial_number = clean(self.serial_number);
        self.percent = self.percent.clamp(0.0, 100.0);
        self.energy_rate_w = self.energy_rate_w.abs();
        self
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Health as `full / design * 100`, or 100 when the design value is unknown.
pub fn health_percent(energy_full: f64, energy_full_design: f64) -> f64 {
    if energy_full_design > 0.0 {
        energy_full / energy_full_design * 100.0
    } else {
        100.0
    }
}

/// Seconds to drain `energy_wh` at `rate_w`, if the rate is meaningful.
pub fn seconds_at_rate(energy_wh: f64, rate_w: f64) -> Option<f64> {
    if rate_w > 0.0 && energy_wh >= 0.0 {
        Some(energy_wh / rate_w * 3600.0)
    } else {
        None
    }
}
