//! Serial transport adapter
//!
//! The protocol layer only ever sees whole frames: this layer owns the
//! exact-transfer discipline, so partial reads and writes never leak
//! upward. Implementations wrap the real character device or, in tests,
//! a scripted peer.

mod error;
mod serial;

pub use error::TransportError;
pub use serial::CharDevice;

use bytes::Bytes;

/// Byte-stream device carrying the control link.
///
/// The contract is strict: `write_exact` either writes the entire buffer
/// or fails, and `read_exact` either produces exactly `len` bytes or
/// fails. Blocking and internal retry are implementation concerns.
pub trait SerialLink {
    /// Write the entire buffer to the link.
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Read exactly `len` bytes from the link, blocking until they arrive.
    fn read_exact(&mut self, len: usize) -> Result<Bytes, TransportError>;

    /// Release the link. Best-effort: callers log a failure and move on.
    fn close(&mut self) -> Result<(), TransportError>;
}
