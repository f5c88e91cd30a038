//! Blocking character-device implementation of the serial link.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};

use bytes::{Bytes, BytesMut};
use tracing::debug;

use super::{SerialLink, TransportError};

/// Serial control link over a character device (e.g. `/dev/ttyS0`).
///
/// The device node is opened read/write in blocking mode. The baud rate
/// is carried for diagnostics; line-discipline programming is the host's
/// responsibility and happens before this process starts.
#[derive(Debug)]
pub struct CharDevice {
    file: File,
    device: String,
    baud_rate: u32,
}

impl CharDevice {
    /// Open the device node for exclusive use by this link.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connect`] if the node cannot be opened;
    /// callers must treat this as fatal before entering the control loop.
    pub fn open(device: &str, baud_rate: u32) -> Result<Self, TransportError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(device)
            .map_err(|source| TransportError::Connect {
                device: device.to_string(),
                source,
            })?;

        debug!(device, baud_rate, "serial link opened");
        Ok(Self {
            file,
            device: device.to_string(),
            baud_rate,
        })
    }

    /// Path of the underlying device node.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Configured baud rate.
    #[must_use]
    pub const fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl SerialLink for CharDevice {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        // write_all loops over short writes and retries EINTR; a failure
        // means the frame may be torn, which the peer's framing check
        // catches on its side.
        self.file.write_all(bytes)?;
        Ok(())
    }

    fn read_exact(&mut self, len: usize) -> Result<Bytes, TransportError> {
        let mut buf = BytesMut::zeroed(len);
        self.file.read_exact(&mut buf)?;
        Ok(buf.freeze())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.file.flush()?;
        debug!(device = %self.device, "serial link closed");
        Ok(())
    }
}
