//! Scripted provider for tests and hosts without battery hardware.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::provider::{check_index, BatteryError, BatteryProvider, Result};
use crate::snapshot::RawSnapshot;

/// In-memory provider returning configured snapshots.
///
/// Counts calls and tracks how many `snapshot` calls ran at the same time,
/// so callers can assert on caching and serialization.
#[derive(Debug, Default)]
pub struct FakeProvider {
    state: Mutex<FakeState>,
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

#[derive(Debug, Default)]
struct FakeState {
    batteries: Vec<RawSnapshot>,
    failure: Option<BatteryError>,
    unsupported: bool,
    delay: Option<Duration>,
}

impl FakeProvider {
    pub fn new(batteries: Vec<RawSnapshot>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                batteries,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn single(snapshot: RawSnapshot) -> Self {
        Self::new(vec![snapshot])
    }

    /// A host with no battery subsystem at all.
    pub fn unsupported() -> Self {
        let provider = Self::default();
        provider.lock().unsupported = true;
        provider
    }

    /// Sleep this long inside every `snapshot` call.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.set_delay(Some(delay));
        self
    }

    /// Change the delay for calls that start from now on.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.lock().delay = delay;
    }

    /// Replace the snapshot served for `index`.
    pub fn set_snapshot(&self, index: usize, snapshot: RawSnapshot) {
        let mut state = self.lock();
        if index < state.batteries.len() {
            state.batteries[index] = snapshot;
        } else {
            state.batteries.push(snapshot);
        }
    }

    /// Remove every battery, as if they were all unplugged.
    pub fn remove_all(&self) {
        self.lock().batteries.clear();
    }

    /// Fail every `snapshot` call with `error` until [`Self::clear_failure`].
    pub fn fail_with(&self, error: BatteryError) {
        self.lock().failure = Some(error);
    }

    pub fn clear_failure(&self) {
        self.lock().failure = None;
    }

    /// Number of `snapshot` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of `snapshot` calls observed running at once.
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BatteryProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn enumerate(&self) -> Vec<usize> {
        (0..self.lock().batteries.len()).collect()
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        let delay = self.lock().delay;
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        let result = {
            let state = self.lock();
            if state.unsupported {
                Err(BatteryError::unsupported("no battery subsystem"))
            } else if let Some(err) = state.failure.clone() {
                Err(err)
            } else {
                check_index(state.batteries.len(), index).map(|_| state.batteries[index].clone())
            }
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
