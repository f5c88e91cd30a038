//! CastLink packet records
//!
//! Both frames are serialized field by field; the wire layout is never
//! derived from in-memory struct layout.

use super::{CONFIG_PACKET_SIZE, END_BYTE, Error, HEADER_BYTE, STATUS_PACKET_SIZE};

/// Status frame, module to screen (6 bytes)
///
/// # Wire Format
///
/// ```text
/// +--------+-----------+----------+----------+---------+------+
/// | header | connected | reserved | reserved | casting | end  |
/// | 0x55   | 0..255    | 0x00     | 0x00     | 0 or 1  | 0xAA |
/// +--------+-----------+----------+----------+---------+------+
/// ```
///
/// The reserved field is a 16-bit placeholder: always zero on encode,
/// ignored on decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusPacket {
    /// Number of peer devices currently connected
    pub connected: u8,
    /// Whether a peer device is actively casting to the screen
    pub casting: bool,
}

impl StatusPacket {
    /// Create a new status packet
    #[must_use]
    pub const fn new(connected: u8, casting: bool) -> Self {
        Self { connected, casting }
    }

    /// Serialize to the 6-byte wire representation
    #[must_use]
    pub fn to_bytes(&self) -> [u8; STATUS_PACKET_SIZE] {
        let mut bytes = [0u8; STATUS_PACKET_SIZE];
        bytes[0] = HEADER_BYTE;
        bytes[1] = self.connected;
        // bytes 2..4 stay zero (reserved)
        bytes[4] = u8::from(self.casting);
        bytes[5] = END_BYTE;
        bytes
    }

    /// Parse from the 6-byte wire representation
    ///
    /// Any nonzero casting byte decodes as active; encode only ever emits
    /// 0 or 1. Reserved bytes are not inspected.
    pub fn from_bytes(bytes: &[u8]) -> super::Result<Self> {
        validate_frame(bytes, STATUS_PACKET_SIZE)?;
        Ok(Self {
            connected: bytes[1],
            casting: bytes[4] != 0,
        })
    }
}

/// Configuration frame, screen to module (4 bytes)
///
/// # Wire Format
///
/// ```text
/// +--------+------------+----------+------+
/// | header | brightness | contrast | end  |
/// | 0x55   | 0..255     | 0..255   | 0xAA |
/// +--------+------------+----------+------+
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPacket {
    /// Requested screen brightness
    pub brightness: u8,
    /// Requested screen contrast
    pub contrast: u8,
}

impl ConfigPacket {
    /// Create a new configuration packet
    #[must_use]
    pub const fn new(brightness: u8, contrast: u8) -> Self {
        Self {
            brightness,
            contrast,
        }
    }

    /// Serialize to the 4-byte wire representation
    #[must_use]
    pub fn to_bytes(&self) -> [u8; CONFIG_PACKET_SIZE] {
        [HEADER_BYTE, self.brightness, self.contrast, END_BYTE]
    }

    /// Parse from the 4-byte wire representation
    ///
    /// Brightness and contrast pass through unchanged; a byte's natural
    /// 0..255 range is the only bound.
    pub fn from_bytes(bytes: &[u8]) -> super::Result<Self> {
        validate_frame(bytes, CONFIG_PACKET_SIZE)?;
        Ok(Self {
            brightness: bytes[1],
            contrast: bytes[2],
        })
    }
}

/// Check length and both framing sentinels for a fixed-size frame.
fn validate_frame(bytes: &[u8], expected_len: usize) -> super::Result<()> {
    if bytes.len() != expected_len {
        return Err(Error::WrongLength {
            expected: expected_len,
            got: bytes.len(),
        });
    }

    if bytes[0] != HEADER_BYTE {
        return Err(Error::BadFraming {
            offset: 0,
            expected: HEADER_BYTE,
            found: bytes[0],
        });
    }

    let last = expected_len - 1;
    if bytes[last] != END_BYTE {
        return Err(Error::BadFraming {
            offset: last,
            expected: END_BYTE,
            found: bytes[last],
        });
    }

    Ok(())
}
