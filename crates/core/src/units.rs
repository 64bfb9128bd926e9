//! Pure unit conversions.
//!
//! Raw durations are always seconds as `f64`. Rendering truncates, never
//! rounds, so a remaining-time estimate is never overstated.

use crate::config::{TempUnit, TimeFormat};
use crate::measurement::{Measurement, Unit};

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Express a Celsius reading in `unit`.
pub fn temperature(celsius: f64, unit: TempUnit) -> Measurement {
    match unit {
        TempUnit::DegC => Measurement::new(celsius, Unit::Celsius),
        TempUnit::DegF => Measurement::new(celsius_to_fahrenheit(celsius), Unit::Fahrenheit),
    }
}

/// Whole seconds in `secs`. Negative and NaN inputs count as zero.
pub fn whole_seconds(secs: f64) -> u64 {
    if secs.is_nan() || secs <= 0.0 {
        0
    } else {
        secs.trunc() as u64
    }
}

pub fn whole_minutes(secs: f64) -> u64 {
    whole_seconds(secs) / 60
}

/// Render as `{h}h,{m}m,{s}s`, leaving out every zero component.
///
/// A zero duration renders as `0s`.
pub fn human_duration(secs: f64) -> String {
    let total = whole_seconds(secs);
    if total == 0 {
        return "0s".to_string();
    }

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    [(hours, "h"), (minutes, "m"), (seconds, "s")]
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, suffix)| format!("{}{}", value, suffix))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn format_duration(secs: f64, format: TimeFormat) -> String {
    match format {
        TimeFormat::Seconds => format!("{}s", whole_seconds(secs)),
        TimeFormat::Minutes => format!("{}m", whole_minutes(secs)),
        TimeFormat::Human => human_duration(secs),
    }
}
