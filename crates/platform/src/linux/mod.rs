//! Linux provider reading `/sys/class/power_supply`.

mod battery;

pub use battery::{SysfsProvider, POWER_SUPPLY_PATH};
