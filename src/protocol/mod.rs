//! CastLink wire format and codec
//!
//! Two fixed-size packet kinds travel over the control link: a 6-byte
//! status frame (module to screen) and a 4-byte configuration frame
//! (screen to module). Framing bytes are the only integrity check: the
//! byte stream below is trusted for corruption; the codec only detects
//! structural desync.

mod codec;
mod error;
mod packet;

pub use codec::{decode_config, decode_status, encode_status};
pub use error::{Error, Result};
pub use packet::{ConfigPacket, StatusPacket};

/// Start-of-frame marker stamped on every packet.
pub const HEADER_BYTE: u8 = 0x55;

/// End-of-frame marker stamped on every packet.
pub const END_BYTE: u8 = 0xAA;

/// Status frame size in bytes (module to screen).
pub const STATUS_PACKET_SIZE: usize = 6;

/// Configuration frame size in bytes (screen to module).
pub const CONFIG_PACKET_SIZE: usize = 4;
