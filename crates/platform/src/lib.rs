//! Cross-platform battery providers for battinfo.
//!
//! This crate defines the [`BatteryProvider`] capability set (enumerate
//! batteries, snapshot one of them) and the canonical [`RawSnapshot`] every
//! platform backend maps its native units into.
//!
//! # Backends
//!
//! - [`linux::SysfsProvider`] - `/sys/class/power_supply`
//! - [`macos::IoregProvider`] - `ioreg -rn AppleSmartBattery`
//! - [`SystemProvider`] - `starship-battery`, used on Windows and the BSDs
//! - `FakeProvider` - scripted snapshots, behind the `fake` feature
//!
//! # Example
//!
//! ```ignore
//! use battinfo_platform::{open_backend, Backend, BatteryProvider};
//!
//! let provider = open_backend(Backend::Auto, None);
//! for index in provider.enumerate() {
//!     let snapshot = provider.snapshot(index)?;
//!     println!("Battery {}: {:.1}%", index, snapshot.percent);
//! }
//! ```

mod backend;
mod provider;
mod snapshot;
mod system;
mod timeout;
mod types;

#[cfg(any(test, feature = "fake"))]
mod fake;

pub use backend::{open_backend, Backend, DynProvider, PlatformProvider};
pub use provider::{BatteryError, BatteryProvider, Result};
pub use snapshot::RawSnapshot;
pub use system::SystemProvider;
pub use timeout::{TimeLimited, DEFAULT_READ_TIMEOUT};
pub use types::{BatteryTechnology, ChargeState};

#[cfg(any(test, feature = "fake"))]
pub use fake::FakeProvider;

#[cfg(any(target_os = "linux", test))]
pub mod linux;

#[cfg(any(target_os = "macos", test))]
pub mod macos;
