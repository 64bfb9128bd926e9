//! The caller-facing battery handle.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use battinfo_platform::{
    open_backend, Backend, BatteryError, BatteryProvider, ChargeState, DynProvider, RawSnapshot,
    DEFAULT_READ_TIMEOUT,
};
use tracing::{debug, warn};

use crate::cache::{Clock, RefreshController, SystemClock};
use crate::config::{BatteryOptions, DisplayConfig, TempUnit, TimeFormat};
use crate::measurement::Measurement;
use crate::record::BatteryRecord;
use crate::Result;

/// A cached, self-refreshing view of one battery.
///
/// Opening a `Battery` reads the hardware once; after that, every field
/// getter first runs an implicit refresh step: if the cached data is older
/// than the refresh interval the provider is queried again. An implicit
/// refresh that fails keeps the previous data, logs the failure and records
/// it for [`Battery::last_error`]; getters always return a value.
/// [`Battery::refresh`] queries the provider unconditionally and returns
/// its error.
///
/// The staleness check, the provider call and the field read happen under
/// one lock, so a `Battery` shared between threads never runs two provider
/// calls at once.
pub struct Battery<P = DynProvider> {
    provider: P,
    index: usize,
    clock: Box<dyn Clock>,
    inner: Mutex<Inner>,
}

struct Inner {
    raw: RawSnapshot,
    record: BatteryRecord,
    display: DisplayConfig,
    refresh: RefreshController,
    last_error: Option<BatteryError>,
}

impl Battery<DynProvider> {
    /// Open a battery with the best provider for this host.
    pub fn open(options: BatteryOptions) -> Result<Self> {
        Self::open_backend(Backend::Auto, Some(DEFAULT_READ_TIMEOUT), options)
    }

    pub fn open_backend(
        backend: Backend,
        read_timeout: Option<Duration>,
        options: BatteryOptions,
    ) -> Result<Self> {
        Self::with_provider(open_backend(backend, read_timeout), options)
    }
}

impl<P: BatteryProvider> Battery<P> {
    pub fn with_provider(provider: P, options: BatteryOptions) -> Result<Self> {
        Self::with_clock(provider, options, SystemClock)
    }

    /// Open with an explicit time source.
    ///
    /// Fails if the first read fails; nothing is cached in that case.
    pub fn with_clock(
        provider: P,
        options: BatteryOptions,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        let raw = provider.snapshot(options.index)?;
        debug!(
            provider = provider.name(),
            index = options.index,
            "opened battery"
        );

        let display = options.display();
        let mut refresh = RefreshController::new(options.refresh_interval_ms);
        refresh.record_refresh(clock.now());
        let record = BatteryRecord::derive(&raw, display, options.index);

        Ok(Self {
            provider,
            index: options.index,
            clock: Box::new(clock),
            inner: Mutex::new(Inner {
                raw,
                record,
                display,
                refresh,
                last_error: None,
            }),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn refresh_interval(&self) -> u32 {
        self.lock().refresh.interval_ms()
    }

    /// Change the refresh interval.
    ///
    /// Does not read the hardware; the next access re-checks staleness
    /// against the new interval.
    pub fn set_refresh_interval(&self, interval_ms: u32) {
        self.lock().refresh.set_interval(interval_ms);
    }

    pub fn display_config(&self) -> DisplayConfig {
        self.lock().display
    }

    pub fn time_format(&self) -> TimeFormat {
        self.lock().display.time_format
    }

    /// Change the time format and re-render the cached data with it.
    pub fn set_time_format(&self, time_format: TimeFormat) {
        let mut inner = self.lock();
        inner.display.time_format = time_format;
        self.rederive(&mut inner);
    }

    pub fn temp_unit(&self) -> TempUnit {
        self.lock().display.temp_unit
    }

    /// Change the temperature unit and re-render the cached data with it.
    pub fn set_temp_unit(&self, temp_unit: TempUnit) {
        let mut inner = self.lock();
        inner.display.temp_unit = temp_unit;
        self.rederive(&mut inner);
    }

    /// Read the hardware now, regardless of staleness.
    ///
    /// On failure the cached data is kept and the error is returned.
    pub fn refresh(&self) -> Result<()> {
        let mut inner = self.lock();
        self.refresh_locked(&mut inner)
    }

    /// All fields, refreshed first if stale.
    pub fn read(&self) -> BatteryRecord {
        self.with_fresh(|record| record.clone())
    }

    /// All fields as currently cached. Never reads the hardware.
    pub fn as_dict(&self) -> BatteryRecord {
        self.lock().record.clone()
    }

    /// The raw provider data behind the cached record.
    pub fn raw_snapshot(&self) -> RawSnapshot {
        self.lock().raw.clone()
    }

    /// The most recent refresh failure, cleared by the next successful
    /// refresh.
    pub fn last_error(&self) -> Option<BatteryError> {
        self.lock().last_error.clone()
    }

    /// Time since the cached data was read.
    pub fn age(&self) -> Duration {
        let inner = self.lock();
        inner
            .refresh
            .age(self.clock.now())
            .unwrap_or(Duration::ZERO)
    }

    pub fn vendor(&self) -> Option<String> {
        self.with_fresh(|r| r.vendor.clone())
    }

    pub fn model(&self) -> Option<String> {
        self.with_fresh(|r| r.model.clone())
    }

    pub fn serial_number(&self) -> Option<String> {
        self.with_fresh(|r| r.serial_number.clone())
    }

    pub fn technology(&self) -> String {
        self.with_fresh(|r| r.technology.clone())
    }

    pub fn percent(&self) -> Measurement {
        self.with_fresh(|r| r.percent)
    }

    pub fn state(&self) -> ChargeState {
        self.with_fresh(|r| r.state)
    }

    pub fn capacity(&self) -> Measurement {
        self.with_fresh(|r| r.capacity)
    }

    pub fn temperature(&self) -> Option<Measurement> {
        self.with_fresh(|r| r.temperature)
    }

    pub fn cycle_count(&self) -> Option<u32> {
        self.with_fresh(|r| r.cycle_count)
    }

    pub fn energy(&self) -> Measurement {
        self.with_fresh(|r| r.energy)
    }

    pub fn energy_full(&self) -> Measurement {
        self.with_fresh(|r| r.energy_full)
    }

    pub fn energy_full_design(&self) -> Measurement {
        self.with_fresh(|r| r.energy_full_design)
    }

    pub fn energy_rate(&self) -> Measurement {
        self.with_fresh(|r| r.energy_rate)
    }

    pub fn voltage(&self) -> Measurement {
        self.with_fresh(|r| r.voltage)
    }

    pub fn time_to_empty(&self) -> Option<String> {
        self.with_fresh(|r| r.time_to_empty.clone())
    }

    pub fn time_to_full(&self) -> Option<String> {
        self.with_fresh(|r| r.time_to_full.clone())
    }

    /// Run `f` against the cached record after the implicit refresh step.
    fn with_fresh<T>(&self, f: impl FnOnce(&BatteryRecord) -> T) -> T {
        let mut inner = self.lock();
        self.refresh_if_stale(&mut inner);
        f(&inner.record)
    }

    /// The implicit refresh step run before every field read.
    fn refresh_if_stale(&self, inner: &mut Inner) {
        if !inner.refresh.should_refresh(self.clock.now()) {
            return;
        }

        if let Err(e) = self.refresh_locked(inner) {
            warn!(
                provider = self.provider.name(),
                index = self.index,
                error = %e,
                "battery refresh failed, serving cached data"
            );
        }
    }

    fn refresh_locked(&self, inner: &mut Inner) -> Result<()> {
        match self.provider.snapshot(self.index) {
            Ok(raw) => {
                inner.raw = raw;
                self.rederive(inner);
                inner.refresh.record_refresh(self.clock.now());
                inner.last_error = None;
                debug!(
                    provider = self.provider.name(),
                    index = self.index,
                    percent = inner.raw.percent,
                    "battery refreshed"
                );
                Ok(())
            }
            Err(e) => {
                inner.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn rederive(&self, inner: &mut Inner) {
        inner.record = BatteryRecord::derive(&inner.raw, inner.display, self.index);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Inner is never left half-updated, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: BatteryProvider> fmt::Debug for Battery<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battery")
            .field("provider", &self.provider.name())
            .field("index", &self.index)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
