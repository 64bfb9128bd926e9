//! Deadline for provider reads.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::provider::{BatteryError, BatteryProvider, Result};
use crate::snapshot::RawSnapshot;

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);

type Pending = Receiver<Result<RawSnapshot>>;

/// Wraps a provider so `snapshot` returns `ReadError` instead of blocking
/// past a deadline.
///
/// Each read runs on a worker thread. A read that overruns is left to finish
/// on its own and is remembered; until it returns, further `snapshot` calls
/// fail fast instead of starting another worker, so at most one inner read
/// is ever in flight. The late result is discarded once it arrives.
#[derive(Debug)]
pub struct TimeLimited<P> {
    inner: Arc<P>,
    limit: Duration,
    pending: Mutex<Option<Pending>>,
}

impl<P> TimeLimited<P> {
    pub fn new(inner: P, limit: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            limit,
            pending: Mutex::new(None),
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// True while an overrun read is still running.
    pub fn is_pending(&self) -> bool {
        let mut pending = self.lock_pending();
        Self::settle(&mut pending);
        pending.is_some()
    }

    /// Drop the remembered read once its worker has finished.
    fn settle(pending: &mut Option<Pending>) {
        let finished = match pending.as_ref() {
            Some(rx) => !matches!(rx.try_recv(), Err(TryRecvError::Empty)),
            None => false,
        };
        if finished {
            debug!("overrun battery read finished, discarding its result");
            *pending = None;
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: BatteryProvider + 'static> BatteryProvider for TimeLimited<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn enumerate(&self) -> Vec<usize> {
        self.inner.enumerate()
    }

    fn snapshot(&self, index: usize) -> Result<RawSnapshot> {
        // Held for the whole call so two callers never both start a worker.
        let mut pending = self.lock_pending();
        Self::settle(&mut pending);
        if pending.is_some() {
            return Err(BatteryError::read("previous read still pending"));
        }

        let (tx, rx) = mpsc::sync_channel(1);
        let inner = Arc::clone(&self.inner);

        thread::Builder::new()
            .name("battinfo-read".to_string())
            .spawn(move || {
                let _ = tx.send(inner.snapshot(index));
            })
            .map_err(BatteryError::read)?;

        match rx.recv_timeout(self.limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    provider = self.inner.name(),
                    index,
                    limit_ms = self.limit.as_millis() as u64,
                    "battery read timed out"
                );
                *pending = Some(rx);
                Err(BatteryError::ReadError(format!(
                    "timed out after {}ms",
                    self.limit.as_millis()
                )))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(BatteryError::read("read worker exited without a result"))
            }
        }
    }
}
