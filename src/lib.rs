//! CastLink - serial control-link bridge for display casting modules
//!
//! A casting module reports its connectivity/casting status to an
//! attached screen once per second over a byte-oriented serial link and
//! accepts brightness/contrast configuration in reply. While no peer is
//! casting, a locally generated preview of that configuration is
//! composited into the bottom-left corner of the frame buffer.
//!
//! # Quick Start
//!
//! ```rust
//! use castlink::protocol::{decode_config, encode_status};
//!
//! // Status frame, module to screen: 2 peers connected, nobody casting.
//! let frame = encode_status(2, false);
//! assert_eq!(frame, [0x55, 2, 0, 0, 0, 0xAA]);
//!
//! // Configuration frame, screen to module.
//! let config = decode_config(&[0x55, 0x50, 0x40, 0xAA])?;
//! assert_eq!((config.brightness, config.contrast), (0x50, 0x40));
//! # Ok::<(), castlink::protocol::Error>(())
//! ```
//!
//! # Architecture
//!
//! - [`protocol`] - fixed-layout frame codec; framing bytes are the only
//!   integrity check
//! - [`transport`] - exact-transfer contract over the serial device;
//!   partial I/O never reaches the protocol layer
//! - [`link`] - the tick-driven protocol engine owning [`link::LinkState`]
//! - [`display`] - preview compositing into the external frame buffer
//!
//! The control loop is single-threaded and nothing inside it is fatal:
//! only failing to open the device at startup aborts the process.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod display;
pub mod link;
pub mod protocol;
pub mod transport;

pub use display::{Compositor, FlatFieldGenerator, FrameRegion, FrameSurface, PreviewGenerator};
pub use link::{Link, LinkConfig, LinkState, StatusSource, StopHandle, Ticker};
pub use protocol::{ConfigPacket, StatusPacket, decode_config, decode_status, encode_status};
pub use transport::{CharDevice, SerialLink, TransportError};

use std::time::Duration;

/// Device node the control link lives on.
pub const DEFAULT_DEVICE: &str = "/dev/ttyS0";

/// Baud rate the control link is configured for.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Nominal delay between control-loop ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);
