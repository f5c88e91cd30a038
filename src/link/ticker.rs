//! Control-loop cadence with a cooperative stop signal.
//!
//! Splitting the cadence into a [`Ticker`] plus a cloneable
//! [`StopHandle`] lets the loop be cancelled from another thread and
//! lets tests drive single ticks without real time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// How finely a tick period is sliced while watching for a stop request.
const STOP_POLL_SLICE: Duration = Duration::from_millis(50);

/// Fixed best-effort tick cadence. Period drift is tolerated; the only
/// guarantee is at least one period of sleep between ticks unless stopped.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    stopped: Arc<AtomicBool>,
}

impl Ticker {
    /// Create a ticker with the given inter-tick period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle that can stop this ticker from another thread.
    #[must_use]
    pub fn handle(&self) -> StopHandle {
        StopHandle {
            stopped: Arc::clone(&self.stopped),
        }
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Sleep through one tick period.
    ///
    /// Returns `false` if a stop was requested before or during the
    /// sleep. The period is slept in slices so shutdown latency is
    /// bounded by the poll slice, not by the period.
    pub fn wait(&self) -> bool {
        let mut remaining = self.period;
        while !remaining.is_zero() {
            if self.is_stopped() {
                return false;
            }
            let slice = remaining.min(STOP_POLL_SLICE);
            thread::sleep(slice);
            remaining -= slice;
        }
        !self.is_stopped()
    }
}

/// Cloneable stop signal for a [`Ticker`].
#[derive(Debug, Clone)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request that the ticker's loop exit after the current tick.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }
}
