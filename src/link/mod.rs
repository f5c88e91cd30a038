//! Link protocol engine
//!
//! Owns the link state and drives one tick of the protocol: sample the
//! status source, push a status frame outward, and, while no peer is
//! casting, pull a configuration frame back and hand it to the
//! compositor. Nothing inside a tick is fatal; every failure is logged,
//! counted, and absorbed so the loop keeps serving status.

mod metrics;
mod ticker;

pub use metrics::{LinkMetrics, MetricsSnapshot};
pub use ticker::{StopHandle, Ticker};

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::display::{Compositor, FrameSurface, PreviewGenerator};
use crate::protocol::{CONFIG_PACKET_SIZE, decode_config, encode_status};
use crate::transport::{CharDevice, SerialLink, TransportError};
use crate::{DEFAULT_BAUD, DEFAULT_DEVICE, TICK_INTERVAL};

/// Link configuration options.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Path of the serial device node carrying the control link.
    pub device: String,
    /// Baud rate the line is configured for.
    pub baud_rate: u32,
    /// Nominal delay between control-loop ticks.
    pub tick_interval: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            baud_rate: DEFAULT_BAUD,
            tick_interval: TICK_INTERVAL,
        }
    }
}

/// Single source of truth for connectivity, casting, and display
/// configuration values. Owned by the [`Link`]; one control-loop thread
/// mutates it, once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkState {
    /// Number of peer devices currently connected.
    pub connected: u8,
    /// Whether a peer device is actively casting.
    pub casting: bool,
    /// Screen brightness from the last accepted configuration frame.
    pub brightness: u8,
    /// Screen contrast from the last accepted configuration frame.
    pub contrast: u8,
}

/// Injected capability yielding (connected count, casting flag) once per
/// tick, before the report phase. Any `FnMut` closure qualifies; no
/// registration table is involved.
pub trait StatusSource {
    /// Sample the current peer status.
    fn sample(&mut self) -> (u8, bool);
}

impl<F> StatusSource for F
where
    F: FnMut() -> (u8, bool),
{
    fn sample(&mut self) -> (u8, bool) {
        self()
    }
}

/// Protocol engine for the serial control link.
#[derive(Debug)]
pub struct Link<T: SerialLink, S: StatusSource> {
    transport: T,
    source: S,
    state: LinkState,
}

impl<S: StatusSource> Link<CharDevice, S> {
    /// Open the configured serial device and build a link over it.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connect`] if the device cannot be
    /// opened. This is the one fatal error in the system: callers must
    /// abort before entering the control loop.
    pub fn connect(config: &LinkConfig, source: S) -> Result<Self, TransportError> {
        let transport = CharDevice::open(&config.device, config.baud_rate)?;
        Ok(Self::new(transport, source))
    }
}

impl<T: SerialLink, S: StatusSource> Link<T, S> {
    /// Build a link over an already-open transport.
    pub fn new(transport: T, source: S) -> Self {
        Self {
            transport,
            source,
            state: LinkState::default(),
        }
    }

    /// Current link state.
    #[must_use]
    pub fn state(&self) -> &LinkState {
        &self.state
    }

    /// Consume the link and hand back the transport.
    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run one control-loop iteration.
    ///
    /// Report phase first, then (only while not casting) the configure
    /// phase and one composite. A failed write does not block the
    /// configure phase; a failed read or a malformed frame keeps the
    /// previous brightness/contrast until the next tick, and the
    /// compositor runs with those retained values.
    pub fn tick<F, G>(&mut self, compositor: &mut Compositor<F, G>)
    where
        F: FrameSurface,
        G: PreviewGenerator,
    {
        LinkMetrics::record_tick();

        let (connected, casting) = self.source.sample();
        self.state.connected = connected;
        self.state.casting = casting;

        self.report(connected, casting);

        // A casting peer owns the display: no configure, no composite.
        if casting {
            trace!("peer casting, configure phase skipped");
            return;
        }

        self.configure();
        compositor.render_and_composite(self.state.brightness, self.state.contrast);
    }

    /// Run ticks until the ticker's stop handle fires.
    pub fn run<F, G>(&mut self, compositor: &mut Compositor<F, G>, ticker: &Ticker)
    where
        F: FrameSurface,
        G: PreviewGenerator,
    {
        debug!("control loop started");
        loop {
            self.tick(compositor);
            if !ticker.wait() {
                break;
            }
        }
        debug!("control loop stopped");
    }

    /// Release the transport. Best-effort: a failure is logged only.
    pub fn close(&mut self) {
        if let Err(err) = self.transport.close() {
            warn!(%err, "link close failed");
        }
    }

    fn report(&mut self, connected: u8, casting: bool) {
        let frame = encode_status(connected, casting);
        match self.transport.write_exact(&frame) {
            Ok(()) => {
                LinkMetrics::record_status_sent();
                trace!(connected, casting, "status frame sent");
            }
            Err(err) => {
                LinkMetrics::record_io_error();
                warn!(%err, "status write failed, continuing");
            }
        }
    }

    fn configure(&mut self) {
        let bytes = match self.transport.read_exact(CONFIG_PACKET_SIZE) {
            Ok(bytes) => bytes,
            Err(err) => {
                LinkMetrics::record_io_error();
                warn!(%err, "configuration read failed, keeping previous values");
                return;
            }
        };

        match decode_config(&bytes) {
            Ok(config) => {
                self.state.brightness = config.brightness;
                self.state.contrast = config.contrast;
                LinkMetrics::record_config_applied();
                debug!(
                    brightness = config.brightness,
                    contrast = config.contrast,
                    "configuration applied"
                );
            }
            Err(err) => {
                LinkMetrics::record_decode_error();
                warn!(%err, "malformed configuration frame discarded");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{END_BYTE, HEADER_BYTE, STATUS_PACKET_SIZE};
    use bytes::Bytes;
    use std::collections::VecDeque;
    use std::io;

    /// Transport double replaying scripted read results and recording
    /// every write.
    struct ScriptedLink {
        reads: VecDeque<Result<Bytes, TransportError>>,
        writes: Vec<Vec<u8>>,
        fail_writes: bool,
    }

    impl ScriptedLink {
        fn new() -> Self {
            Self {
                reads: VecDeque::new(),
                writes: Vec::new(),
                fail_writes: false,
            }
        }

        fn push_read(&mut self, bytes: &[u8]) {
            self.reads.push_back(Ok(Bytes::copy_from_slice(bytes)));
        }

        fn push_read_error(&mut self) {
            self.reads.push_back(Err(TransportError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "no frame",
            ))));
        }
    }

    impl SerialLink for ScriptedLink {
        fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
            if self.fail_writes {
                return Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "line down",
                )));
            }
            self.writes.push(bytes.to_vec());
            Ok(())
        }

        fn read_exact(&mut self, len: usize) -> Result<Bytes, TransportError> {
            let result = self.reads.pop_front().expect("unscripted read");
            if let Ok(bytes) = &result {
                assert_eq!(bytes.len(), len, "engine must read whole frames");
            }
            result
        }

        fn close(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    struct NullSurface {
        pixels: Vec<u8>,
    }

    impl NullSurface {
        fn new() -> Self {
            Self {
                pixels: vec![0; crate::display::SURFACE_WIDTH * crate::display::SURFACE_HEIGHT],
            }
        }
    }

    impl FrameSurface for NullSurface {
        fn surface(&mut self) -> &mut [u8] {
            &mut self.pixels
        }

        fn commit(&mut self) {}
    }

    struct CountingGenerator {
        calls: Vec<(u8, u8)>,
    }

    impl PreviewGenerator for CountingGenerator {
        fn generate(&mut self, brightness: u8, contrast: u8) -> Vec<u8> {
            self.calls.push((brightness, contrast));
            vec![brightness; crate::display::PREVIEW_WIDTH * crate::display::PREVIEW_HEIGHT]
        }
    }

    fn test_compositor() -> Compositor<NullSurface, CountingGenerator> {
        Compositor::new(NullSurface::new(), CountingGenerator { calls: Vec::new() })
    }

    fn config_frame(brightness: u8, contrast: u8) -> [u8; 4] {
        [HEADER_BYTE, brightness, contrast, END_BYTE]
    }

    #[test]
    fn test_tick_reports_then_applies_config() {
        let mut transport = ScriptedLink::new();
        transport.push_read(&config_frame(0x50, 0x40));

        let mut link = Link::new(transport, || (2, false));
        let mut compositor = test_compositor();
        link.tick(&mut compositor);

        assert_eq!(
            link.state(),
            &LinkState {
                connected: 2,
                casting: false,
                brightness: 0x50,
                contrast: 0x40,
            }
        );
        assert_eq!(compositor.generator().calls, vec![(0x50, 0x40)]);
    }

    #[test]
    fn test_tick_writes_wire_exact_status_frame() {
        let mut transport = ScriptedLink::new();
        transport.push_read(&config_frame(0, 0));

        let mut link = Link::new(transport, || (5, false));
        link.tick(&mut test_compositor());

        // One status frame, byte-exact.
        // (The transport was moved into the link; read it back out.)
        let written = &link.transport.writes;
        assert_eq!(written.len(), 1);
        assert_eq!(written[0], vec![0x55, 5, 0, 0, 0, 0xAA]);
        assert_eq!(written[0].len(), STATUS_PACKET_SIZE);
    }

    #[test]
    fn test_casting_tick_skips_configure_and_composite() {
        // No scripted read: a read attempt would panic.
        let transport = ScriptedLink::new();
        let mut link = Link::new(transport, || (1, true));
        let mut compositor = test_compositor();

        link.tick(&mut compositor);

        assert!(link.state().casting);
        assert_eq!(link.state().brightness, 0);
        assert_eq!(link.state().contrast, 0);
        assert!(compositor.generator().calls.is_empty());
    }

    #[test]
    fn test_read_failure_keeps_previous_config() {
        let mut transport = ScriptedLink::new();
        transport.push_read(&config_frame(0x90, 0x10));
        transport.push_read_error();

        let mut link = Link::new(transport, || (1, false));
        let mut compositor = test_compositor();

        link.tick(&mut compositor);
        link.tick(&mut compositor);

        assert_eq!(link.state().brightness, 0x90);
        assert_eq!(link.state().contrast, 0x10);
        // The compositor still ran both ticks, with retained values.
        assert_eq!(compositor.generator().calls, vec![(0x90, 0x10); 2]);
    }

    #[test]
    fn test_malformed_frame_keeps_previous_config() {
        let mut transport = ScriptedLink::new();
        transport.push_read(&config_frame(0x22, 0x33));
        transport.push_read(&[0x00, 0xFF, 0xFF, 0x00]);

        let mut link = Link::new(transport, || (0, false));
        let mut compositor = test_compositor();

        link.tick(&mut compositor);
        link.tick(&mut compositor);

        assert_eq!(link.state().brightness, 0x22);
        assert_eq!(link.state().contrast, 0x33);
    }

    #[test]
    fn test_write_failure_does_not_block_configure() {
        let mut transport = ScriptedLink::new();
        transport.fail_writes = true;
        transport.push_read(&config_frame(0x11, 0x12));

        let mut link = Link::new(transport, || (3, false));
        link.tick(&mut test_compositor());

        assert_eq!(link.state().brightness, 0x11);
        assert_eq!(link.state().contrast, 0x12);
    }

    #[test]
    fn test_metrics_count_ticks() {
        let before = LinkMetrics::snapshot();

        let mut transport = ScriptedLink::new();
        transport.push_read(&config_frame(1, 1));
        let mut link = Link::new(transport, || (0, false));
        link.tick(&mut test_compositor());

        let after = LinkMetrics::snapshot();
        assert!(after.ticks >= before.ticks + 1);
        assert!(after.status_sent >= before.status_sent + 1);
        assert!(after.configs_applied >= before.configs_applied + 1);
    }
}
