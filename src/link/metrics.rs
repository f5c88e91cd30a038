//! Link activity counters without external dependencies.

use std::sync::atomic::{AtomicU64, Ordering};

static TICKS: AtomicU64 = AtomicU64::new(0);
static STATUS_SENT: AtomicU64 = AtomicU64::new(0);
static CONFIGS_APPLIED: AtomicU64 = AtomicU64::new(0);
static DECODE_ERRORS: AtomicU64 = AtomicU64::new(0);
static IO_ERRORS: AtomicU64 = AtomicU64::new(0);

/// Track control-loop activity across the process.
pub struct LinkMetrics;

impl LinkMetrics {
    pub(crate) fn record_tick() {
        TICKS.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_status_sent() {
        STATUS_SENT.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_config_applied() {
        CONFIGS_APPLIED.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decode_error() {
        DECODE_ERRORS.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_io_error() {
        IO_ERRORS.fetch_add(1, Ordering::Relaxed);
    }

    /// Capture the current counter values.
    #[must_use]
    pub fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            ticks: TICKS.load(Ordering::Relaxed),
            status_sent: STATUS_SENT.load(Ordering::Relaxed),
            configs_applied: CONFIGS_APPLIED.load(Ordering::Relaxed),
            decode_errors: DECODE_ERRORS.load(Ordering::Relaxed),
            io_errors: IO_ERRORS.load(Ordering::Relaxed),
        }
    }

}

/// Point-in-time view of the link counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Control-loop iterations completed
    pub ticks: u64,
    /// Status frames written to the link
    pub status_sent: u64,
    /// Configuration frames decoded and applied
    pub configs_applied: u64,
    /// Inbound frames rejected by the codec
    pub decode_errors: u64,
    /// Transport read/write failures absorbed mid-loop
    pub io_errors: u64,
}
