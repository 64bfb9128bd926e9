//! Normalized, serializable battery view.

use battinfo_platform::{ChargeState, RawSnapshot};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::DisplayConfig;
use crate::measurement::{Measurement, Unit};
use crate::units;

/// Every public field of a battery, normalized per a [`DisplayConfig`].
///
/// Serializes to the same mapping [`BatteryRecord::to_map`] returns:
/// measurements as `[value, "unit"]`, the state by name and absent optional
/// fields as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryRecord {
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub technology: String,
    pub percent: Measurement,
    pub state: ChargeState,
    pub capacity: Measurement,
    pub temperature: Option<Measurement>,
    pub cycle_count: Option<u32>,
    pub energy: Measurement,
    pub energy_full: Measurement,
    pub energy_full_design: Measurement,
    pub energy_rate: Measurement,
    pub voltage: Measurement,
    pub time_to_empty: Option<String>,
    pub time_to_full: Option<String>,
    pub battery_index: usize,
}

impl BatteryRecord {
    /// Field names in declaration order.
    pub const FIELDS: [&'static str; 17] = [
        "vendor",
        "model",
        "serial_number",
        "technology",
        "percent",
        "state",
        "capacity",
        "temperature",
        "cycle_count",
        "energy",
        "energy_full",
        "energy_full_design",
        "energy_rate",
        "voltage",
        "time_to_empty",
        "time_to_full",
        "battery_index",
    ];

    pub fn derive(raw: &RawSnapshot, display: DisplayConfig, battery_index: usize) -> Self {
        let time = |secs: Option<f64>| secs.map(|s| units::format_duration(s, display.time_format));

        Self {
            vendor: raw.vendor.clone(),
            model: raw.model.clone(),
            serial_number: raw.serial_number.clone(),
            technology: raw.technology.label().to_string(),
            percent: Measurement::new(raw.percent, Unit::Percent),
            state: raw.state,
            capacity: Measurement::new(raw.capacity_percent, Unit::Percent),
            temperature: raw
                .temperature_c
                .map(|c| units::temperature(c, display.temp_unit)),
            cycle_count: raw.cycle_count,
            energy: Measurement::new(raw.energy_wh, Unit::WattHours),
            energy_full: Measurement::new(raw.energy_full_wh, Unit::WattHours),
            energy_full_design: Measurement::new(raw.energy_full_design_wh, Unit::WattHours),
            energy_rate: Measurement::new(raw.energy_rate_w, Unit::Watts),
            voltage: Measurement::new(raw.voltage_v, Unit::Volts),
            time_to_empty: time(raw.time_to_empty_secs),
            time_to_full: time(raw.time_to_full_secs),
            battery_index,
        }
    }

    /// The record as a JSON object keyed by field name.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
