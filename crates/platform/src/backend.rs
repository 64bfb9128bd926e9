//! Runtime backend selection.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::BatteryProvider;
use crate::system::SystemProvider;
use crate::timeout::TimeLimited;

/// Native provider for the target OS.
#[cfg(target_os = "linux")]
pub type PlatformProvider = crate::linux::SysfsProvider;

#[cfg(target_os = "macos")]
pub type PlatformProvider = crate::macos::IoregProvider;

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub type PlatformProvider = SystemProvider;

pub type DynProvider = Box<dyn BatteryProvider>;

/// Which provider implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Native backend when it is usable, `System` otherwise
    #[default]
    Auto,
    /// sysfs on Linux, ioreg on macOS
    Native,
    /// The cross-platform `starship-battery` backend
    System,
}

impl Backend {
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Auto => "auto",
            Backend::Native => "native",
            Backend::System => "system",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Backend::Auto),
            "native" => Ok(Backend::Native),
            "system" => Ok(Backend::System),
            other => Err(format!(
                "unknown backend '{}', expected auto, native or system",
                other
            )),
        }
    }
}

/// Build the provider for `backend`, optionally bounded by a read deadline.
pub fn open_backend(backend: Backend, read_timeout: Option<Duration>) -> DynProvider {
    let provider: DynProvider = match backend {
        Backend::System => Box::new(SystemProvider::new()),
        Backend::Native => Box::new(PlatformProvider::default()),
        Backend::Auto => auto_provider(),
    };
    debug!(backend = %backend, provider = provider.name(), "selected battery provider");

    match read_timeout {
        Some(limit) => Box::new(TimeLimited::new(provider, limit)),
        None => provider,
    }
}

#[cfg(target_os = "linux")]
fn auto_provider() -> DynProvider {
    let native = PlatformProvider::default();
    if native.is_supported() {
        Box::new(native)
    } else {
        Box::new(SystemProvider::new())
    }
}

#[cfg(not(target_os = "linux"))]
fn auto_provider() -> DynProvider {
    Box::new(PlatformProvider::default())
}
