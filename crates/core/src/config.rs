//! Construction options and display preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How time-to-empty/full estimates are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// Whole seconds, e.g. `5400s`
    Seconds,
    /// Whole minutes, e.g. `90m`
    Minutes,
    /// Hours, minutes and seconds, e.g. `1h,30m`
    #[default]
    Human,
}

impl TimeFormat {
    pub fn label(&self) -> &'static str {
        match self {
            TimeFormat::Seconds => "seconds",
            TimeFormat::Minutes => "minutes",
            TimeFormat::Human => "human",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seconds" | "secs" | "s" => Ok(TimeFormat::Seconds),
            "minutes" | "mins" | "m" => Ok(TimeFormat::Minutes),
            "human" | "h" => Ok(TimeFormat::Human),
            other => Err(format!(
                "unknown time format '{}', expected seconds, minutes or human",
                other
            )),
        }
    }
}

/// Temperature scale used for the `temperature` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TempUnit {
    #[serde(rename = "celsius", alias = "degc", alias = "c")]
    DegC,
    #[default]
    #[serde(rename = "fahrenheit", alias = "degf", alias = "f")]
    DegF,
}

impl TempUnit {
    pub fn label(&self) -> &'static str {
        match self {
            TempUnit::DegC => "celsius",
            TempUnit::DegF => "fahrenheit",
        }
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TempUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "celsius" | "degc" | "c" => Ok(TempUnit::DegC),
            "fahrenheit" | "degf" | "f" => Ok(TempUnit::DegF),
            other => Err(format!(
                "unknown temperature unit '{}', expected celsius or fahrenheit",
                other
            )),
        }
    }
}

/// Rendering preferences applied when a snapshot is normalized.
///
/// The refresh interval is held by the
/// [`RefreshController`](crate::RefreshController), not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub time_format: TimeFormat,
    pub temp_unit: TempUnit,
}

pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 500;

/// Everything needed to open a [`Battery`](crate::Battery).
///
/// Defaults: battery `0`, human-readable times, Fahrenheit, 500 ms refresh
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryOptions {
    pub index: usize,
    pub time_format: TimeFormat,
    pub temp_unit: TempUnit,
    pub refresh_interval_ms: u32,
}

impl Default for BatteryOptions {
    fn default() -> Self {
        Self {
            index: 0,
            time_format: TimeFormat::Human,
            temp_unit: TempUnit::DegF,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl BatteryOptions {
    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn temp_unit(mut self, temp_unit: TempUnit) -> Self {
        self.temp_unit = temp_unit;
        self
    }

    pub fn refresh_interval_ms(mut self, refresh_interval_ms: u32) -> Self {
        self.refresh_interval_ms = refresh_interval_ms;
        self
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            time_format: self.time_format,
            temp_unit: self.temp_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BatteryOptions::default();
        assert_eq!(options.index, 0);
        assert_eq!(options.time_format, TimeFormat::Human);
        assert_eq!(options.temp_unit, TempUnit::DegF);
        assert_eq!(options.refresh_interval_ms, 500);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Minutes".parse::<TimeFormat>(), Ok(TimeFormat::Minutes));
        assert_eq!("s".parse::<TimeFormat>(), Ok(TimeFormat::Seconds));
        assert!("hours".parse::<TimeFormat>().is_err());
        assert_eq!("C".parse::<TempUnit>(), Ok(TempUnit::DegC));
        assert_eq!("fahrenheit".parse::<TempUnit>(), Ok(TempUnit::DegF));
        assert!("kelvin".parse::<TempUnit>().is_err());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: BatteryOptions =
            serde_json::from_str(r#"{"index": 1, "temp_unit": "degc"}"#).unwrap();
        assert_eq!(
            options,
            BatteryOptions::default().index(1).temp_unit(TempUnit::DegC)
        );
    }
}
