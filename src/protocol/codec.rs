//! CastLink frame codec (encode/decode)
//!
//! Thin entry points over the packet records. Encoding is infallible:
//! every (connected, casting) pair is representable once narrowed to its
//! field width, so narrowing happens in the caller's types, never as a
//! runtime failure.

use super::{ConfigPacket, Result, STATUS_PACKET_SIZE, StatusPacket};

/// Encode a status frame
///
/// Framing bytes and the reserved field are stamped internally; the
/// caller supplies only the two payload fields.
#[must_use]
pub fn encode_status(connected: u8, casting: bool) -> [u8; STATUS_PACKET_SIZE] {
    StatusPacket::new(connected, casting).to_bytes()
}

/// Decode a configuration frame
///
/// # Errors
///
/// Returns an error if:
/// - Buffer is not exactly [`CONFIG_PACKET_SIZE`](super::CONFIG_PACKET_SIZE) bytes
/// - The first byte is not [`HEADER_BYTE`](super::HEADER_BYTE)
/// - The last byte is not [`END_BYTE`](super::END_BYTE)
pub fn decode_config(bytes: &[u8]) -> Result<ConfigPacket> {
    ConfigPacket::from_bytes(bytes)
}

/// Decode a status frame
///
/// The module only ever encodes this direction on the real link; the
/// decoder exists for loopback tooling and tests.
///
/// # Errors
///
/// Same framing and length discipline as [`decode_config`], against the
/// 6-byte status layout.
pub fn decode_status(bytes: &[u8]) -> Result<StatusPacket> {
    StatusPacket::from_bytes(bytes)
}
