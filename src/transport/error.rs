//! Transport-level error types for the serial control link.

use std::io;
use thiserror::Error;

/// Unified error type for serial link operations.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Device could not be opened. Fatal at startup: there is no link to
    /// serve without it.
    #[error("failed to open {device}: {source}")]
    Connect {
        /// Path of the device that failed to open
        device: String,
        /// Underlying open failure
        source: io::Error,
    },

    /// Read or write failure on an open link. Absorbed by the control
    /// loop; the tick continues with stale state.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TransportError {
    /// Whether this error occurred while opening the device.
    #[must_use]
    pub const fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}
