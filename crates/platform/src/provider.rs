//! Battery provider trait and error taxonomy.

use std::sync::Arc;

use crate::snapshot::RawSnapshot;

/// Failures a provider can report from [`BatteryProvider::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatteryError {
    /// The requested index has no corresponding battery.
    #[error("No battery at index {index}")]
    DeviceNotFound { index: usize },

    /// The host has no battery subsystem at all.
    #[error("Battery information is unsupported on this system: {0}")]
    Unsupported(String),

    /// The OS interface exists but a read failed.
    #[error("Failed to read battery: {0}")]
    ReadError(String),
}

impl BatteryError {
    pub fn read(err: impl std::fmt::Display) -> Self {
        BatteryError::ReadError(err.to_string())
    }

    pub fn unsupported(err: impl std::fmt::Display) -> Self {
        BatteryError::Unsupported(err.to_string())
    }

    /// Returns true for failures that may clear up on a later read.
    pub fn is_transient(&self) -> bool {
        matches!(self, BatteryError::ReadError(_))
    }
}

pub type Result<T> = std::result::Result<T, BatteryError>;

/// Trait for platform-specific battery providers.
///
/// Providers are stateless with respect to caching: every call goes to the
/// OS and returns the freshest data it can.
pub trait BatteryProvider: Send + Sync {
    /// Short name of the backend, used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Ordered indices of the batteries currently present.
    ///
    /// Returns an empty list on hosts without a battery; never fails.
    fn enumerate(&self) -> Vec<usize>;

    /// Read every attribute of the battery at `index`.
    fn snapshot(&self, index: usize) -> Result<RawSnapshot>;
}

impl<P: BatteryProvider + ?Sized> BatteryProvider for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn enumerate(&self) -> Vec<usize> {
        (**self).enumerate()
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        (**self).snapshot(index)
    }
}

impl<P: BatteryProvider + ?Sized> BatteryProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn enumerate(&self) -> Vec<usize> {
        (**self).enumerate()
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        (**self).snapshot(index)
    }
}

impl<P: BatteryProvider + ?Sized> BatteryProvider for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn enumerate(&self) -> Vec<usize> {
        (**self).enumerate()
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        (**self).snapshot(index)
    }
}

/// Resolve `index` against an enumeration, mapping a miss to `DeviceNotFound`.
pub(crate) fn check_index(available: usize, index: usize) -> Result<()> {
    if index < available {
        Ok(())
    } else {
        Err(BatteryError::DeviceNotFound { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BatteryError::DeviceNotFound { index: 2 }.to_string(),
            "No battery at index 2"
        );
        assert_eq!(
            BatteryError::read("permission denied").to_string(),
            "Failed to read battery: permission denied"
        );
    }

    #[test]
    fn test_is_transient() {
        assert!(BatteryError::read("busy").is_transient());
        assert!(!BatteryError::DeviceNotFound { index: 0 }.is_transient());
        assert!(!BatteryError::unsupported("no power_supply").is_transient());
    }

    #[test]
    fn test_check_index() {
        assert!(check_index(2, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(BatteryError::DeviceNotFound { index: 1 })
        );
    }
}
