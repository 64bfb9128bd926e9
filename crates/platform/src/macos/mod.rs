//! macOS provider parsing the `AppleSmartBattery` IOKit registry entry.

mod battery;

pub use battery::IoregProvider;
