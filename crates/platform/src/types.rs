//! Shared types for battery providers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Battery charging state as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChargeState {
    /// Battery is actively charging
    Charging,
    /// Battery is discharging (on battery power)
    Discharging,
    /// Battery is full
    Full,
    /// Battery is fully drained
    Empty,
    /// State cannot be determined
    #[default]
    Unknown,
}

impl ChargeState {
    /// Returns the canonical name of the state.
    pub fn label(&self) -> &'static str {
        match self {
            ChargeState::Charging => "Charging",
            ChargeState::Discharging => "Discharging",
            ChargeState::Full => "Full",
            ChargeState::Empty => "Empty",
            ChargeState::Unknown => "Unknown",
        }
    }

    /// Parses the `status` attribute of a Linux power supply.
    ///
    /// Unrecognised values (including "Not charging") map to `Unknown`.
    pub fn from_sysfs(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "charging" => ChargeState::Charging,
            "discharging" => ChargeState::Discharging,
            "full" => ChargeState::Full,
            "empty" => ChargeState::Empty,
            _ => ChargeState::Unknown,
        }
    }

    /// Returns true if the battery is currently charging.
    pub fn is_charging(&self) -> bool {
        matches!(self, ChargeState::Charging)
    }

    /// Returns true if the battery is draining.
    pub fn is_discharging(&self) -> bool {
        matches!(self, ChargeState::Discharging | ChargeState::Empty)
    }
}

impl fmt::Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<starship_battery::State> for ChargeState {
    fn from(state: starship_battery::State) -> Self {
        match state {
            starship_battery::State::Charging => ChargeState::Charging,
            starship_battery::State::Discharging => ChargeState::Discharging,
            starship_battery::State::Empty => ChargeState::Empty,
            starship_battery::State::Full => ChargeState::Full,
            starship_battery::State::Unknown => ChargeState::Unknown,
        }
    }
}

/// Battery technology/chemistry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatteryTechnology {
    /// Lithium-ion
    LithiumIon,
    /// Lithium-polymer
    LithiumPolymer,
    /// Lithium iron phosphate
    LithiumIronPhosphate,
    /// Nickel-metal hydride
    NickelMetalHydride,
    /// Nickel-cadmium
    NickelCadmium,
    /// Lead-acid
    LeadAcid,
    /// Unknown or unsupported technology
    #[default]
    Unknown,
}

impl BatteryTechnology {
    /// Returns a short label for the battery technology.
    pub fn label(&self) -> &'static str {
        match self {
            BatteryTechnology::LithiumIon => "Li-ion",
            BatteryTechnology::LithiumPolymer => "Li-poly",
            BatteryTechnology::LithiumIronPhosphate => "LiFePO4",
            BatteryTechnology::NickelMetalHydride => "NiMH",
            BatteryTechnology::NickelCadmium => "NiCd",
            BatteryTechnology::LeadAcid => "Lead-acid",
            BatteryTechnology::Unknown => "Unknown",
        }
    }

    /// Returns a longer description of the battery technology.
    pub fn description(&self) -> &'static str {
        match self {
            BatteryTechnology::LithiumIon => "Lithium-ion",
            BatteryTechnology::LithiumPolymer => "Lithium-polymer",
            BatteryTechnology::LithiumIronPhosphate => "Lithium iron phosphate",
            BatteryTechnology::NickelMetalHydride => "Nickel-metal hydride",
            BatteryTechnology::NickelCadmium => "Nickel-cadmium",
            BatteryTechnology::LeadAcid => "Lead-acid",
            BatteryTechnology::Unknown => "Unknown",
        }
    }

    /// Parses the `technology` attribute of a Linux power supply.
    pub fn from_sysfs(value: &str) -> Self {
        match value.trim() {
            "Li-ion" | "Li-Ion" | "LION" | "LiIon" => BatteryTechnology::LithiumIon,
            "Li-poly" | "LiP" => BatteryTechnology::LithiumPolymer,
            "LiFe" | "LiFePO4" => BatteryTechnology::LithiumIronPhosphate,
            "NiMH" => BatteryTechnology::NickelMetalHydride,
            "NiCd" => BatteryTechnology::NickelCadmium,
            "Pb" | "PbAc" => BatteryTechnology::LeadAcid,
            _ => BatteryTechnology::Unknown,
        }
    }
}

impl fmt::Display for BatteryTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<starship_battery::Technology> for BatteryTechnology {
    fn from(tech: starship_battery::Technology) -> Self {
        match tech {
            starship_battery::Technology::LithiumIon => BatteryTechnology::LithiumIon,
            starship_battery::Technology::LithiumPolymer => BatteryTechnology::LithiumPolymer,
            starship_battery::Technology::LithiumIronPhosphate => {
                BatteryTechnology::LithiumIronPhosphate
            }
            starship_battery::Technology::NickelMetalHydride => {
                BatteryTechnology::NickelMetalHydride
            }
            starship_battery::Technology::NickelCadmium => BatteryTechnology::NickelCadmium,
            starship_battery::Technology::LeadAcid => BatteryTechnology::LeadAcid,
            starship_battery::Technology::Unknown => BatteryTechnology::Unknown,
            _ => BatteryTechnology::Unknown,
        }
    }
}
