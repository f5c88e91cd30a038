//! CastLink protocol error types

use thiserror::Error;

/// CastLink decode errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Frame length does not match the fixed packet size
    #[error("wrong frame length: expected {expected} bytes, got {got}")]
    WrongLength {
        /// Fixed size of the packet kind being decoded
        expected: usize,
        /// Actual length of the supplied buffer
        got: usize,
    },

    /// A framing byte does not carry its sentinel value
    #[error("bad framing at offset {offset}: expected {expected:#04x}, got {found:#04x}")]
    BadFraming {
        /// Byte offset of the mismatched sentinel
        offset: usize,
        /// Sentinel value the offset must carry
        expected: u8,
        /// Value actually found
        found: u8,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
