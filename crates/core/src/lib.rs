//! Cross-platform battery telemetry with unit normalization and refresh
//! caching.
//!
//! A [`Battery`] binds one battery index to a
//! [`BatteryProvider`](battinfo_platform::BatteryProvider), caches the last
//! snapshot and re-reads the hardware only once the configured refresh
//! interval has passed. Readings come back as [`Measurement`]s in fixed units
//! (`%`, `Wh`, `W`, `V`, `°C`/`°F`) whatever the OS reports natively.
//!
//! # Example
//!
//! ```ignore
//! use battinfo::{Battery, BatteryOptions, TempUnit};
//!
//! let battery = Battery::open(BatteryOptions::default().temp_unit(TempUnit::DegC))?;
//! println!("{} ({})", battery.percent(), battery.state());
//! if let Some(remaining) = battery.time_to_empty() {
//!     println!("{} remaining", remaining);
//! }
//! ```
//!
//! # Testing
//!
//! [`ManualClock`] is a testing aid: hand it to [`Battery::with_clock`] to
//! step time explicitly instead of sleeping. Together with
//! `battinfo_platform::FakeProvider` (feature `fake`) it makes caching
//! behaviour deterministic. Production code uses [`SystemClock`].

mod battery;
mod cache;
mod config;
mod measurement;
mod record;
pub mod units;

pub use battery::Battery;
pub use cache::{Clock, ManualClock, RefreshController, SystemClock};
pub use config::{
    BatteryOptions, DisplayConfig, TempUnit, TimeFormat, DEFAULT_REFRESH_INTERVAL_MS,
};
pub use measurement::{Measurement, Unit};
pub use record::BatteryRecord;

pub use battinfo_platform::{
    open_backend, Backend, BatteryError, BatteryProvider, BatteryTechnology, ChargeState,
    DynProvider, RawSnapshot, Result, DEFAULT_READ_TIMEOUT,
};

/// Provider backends and building blocks.
pub mod platform {
    pub use battinfo_platform::*;
}
