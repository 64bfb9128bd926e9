//! Values paired with their unit of measure.

use std::fmt;

use serde::ser::{Serialize, Serializer};

/// Unit attached to a [`Measurement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Percent,
    Celsius,
    Fahrenheit,
    WattHours,
    Watts,
    Volts,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::WattHours => "Wh",
            Unit::Watts => "W",
            Unit::Volts => "V",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// A numeric reading and its unit.
///
/// Measurements are immutable; a refresh produces new ones. `Display`
/// renders `"{value}{unit}"` with one decimal place unless the formatter
/// carries an explicit precision (`format!("{:.2}", m)`).
///
/// Serializes as a `[value, "unit"]` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    value: f64,
    units: Unit,
}

impl Measurement {
    pub const DEFAULT_DECIMALS: usize = 1;

    pub fn new(value: f64, units: Unit) -> Self {
        Self { value, units }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> Unit {
        self.units
    }

    /// Render with [`Self::DEFAULT_DECIMALS`], e.g. `88.2%`.
    pub fn format(&self) -> String {
        self.format_with(Self::DEFAULT_DECIMALS)
    }

    pub fn format_with(&self, decimals: usize) -> String {
        format!("{:.*}{}", decimals, self.value, self.units)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = f.precision().unwrap_or(Self::DEFAULT_DECIMALS);
        write!(f, "{:.*}{}", decimals, self.value, self.units)
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.value, self.units).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rounds_to_one_decimal() {
        assert_eq!(Measurement::new(88.24, Unit::Percent).format(), "88.2%");
        assert_eq!(Measurement::new(12.06, Unit::Volts).format(), "12.1V");
        assert_eq!(Measurement::new(30.0, Unit::Celsius).format(), "30.0°C");
    }

    #[test]
    fn test_display_honours_precision() {
        let m = Measurement::new(45.678, Unit::WattHours);
        assert_eq!(format!("{}", m), "45.7Wh");
        assert_eq!(format!("{:.2}", m), "45.68Wh");
        assert_eq!(format!("{:.0}", m), "46Wh");
        assert_eq!(m.format_with(3), "45.678Wh");
    }

    #[test]
    fn test_serializes_as_pair() {
        let m = Measurement::new(71.5, Unit::Percent);
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"[71.5,"%"]"#);
        let w = Measurement::new(8.25, Unit::Watts);
        assert_eq!(serde_json::to_value(w).unwrap(), serde_json::json!([8.25, "W"]));
    }
}
