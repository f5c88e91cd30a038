//! Preview-loop walkthrough using an in-memory screen
//!
//! The real system opens `/dev/ttyS0` via `CharDevice::open` and aborts
//! on failure; here a simulated screen stands in so the example runs
//! anywhere.

use bytes::Bytes;
use castlink::display::{
    Compositor, FlatFieldGenerator, FrameSurface, PREVIEW_WIDTH, SURFACE_HEIGHT, SURFACE_WIDTH,
};
use castlink::link::{Link, LinkConfig, LinkMetrics};
use castlink::protocol::{END_BYTE, HEADER_BYTE};
use castlink::transport::{SerialLink, TransportError};

/// Screen that always answers with the same configuration.
struct SimulatedScreen {
    brightness: u8,
    contrast: u8,
}

impl SerialLink for SimulatedScreen {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        println!("screen <- status {bytes:02x?}");
        Ok(())
    }

    fn read_exact(&mut self, _len: usize) -> Result<Bytes, TransportError> {
        Ok(Bytes::copy_from_slice(&[
            HEADER_BYTE,
            self.brightness,
            self.contrast,
            END_BYTE,
        ]))
    }

    fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

struct MemoryFrameBuffer {
    pixels: Vec<u8>,
}

impl FrameSurface for MemoryFrameBuffer {
    fn surface(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn commit(&mut self) {
        println!("framebuffer committed");
    }
}

fn main() {
    println!("CastLink preview-loop example");
    println!("=============================\n");

    // The production entry point stops here if the device is missing;
    // the example falls back to a simulated screen instead.
    let config = LinkConfig::default();
    match Link::connect(&config, || (0, false)) {
        Ok(mut real) => {
            println!("control link available on {}", config.device);
            real.close();
        }
        Err(err) => println!("{err}; using a simulated screen\n"),
    }

    let screen = SimulatedScreen {
        brightness: 0x50,
        contrast: 0x40,
    };
    let framebuffer = MemoryFrameBuffer {
        pixels: vec![0; SURFACE_WIDTH * SURFACE_HEIGHT],
    };

    let mut connected = 0u8;
    let mut link = Link::new(screen, move || {
        connected = connected.saturating_add(1);
        // The third tick simulates a peer starting to cast.
        (connected, connected >= 3)
    });
    let mut compositor = Compositor::new(framebuffer, FlatFieldGenerator);

    for _ in 0..3 {
        link.tick(&mut compositor);
        let state = link.state();
        println!(
            "tick: connected={} casting={} brightness={:#04x} contrast={:#04x}",
            state.connected, state.casting, state.brightness, state.contrast
        );
    }

    // The preview region now carries the flat field at the brightness level.
    let anchor = (SURFACE_HEIGHT - 480) * SURFACE_WIDTH;
    let row = &compositor.surface().pixels[anchor..anchor + PREVIEW_WIDTH];
    println!("\npreview row 0 starts with {:#04x}", row[0]);

    link.close();
    println!("metrics: {:?}", LinkMetrics::snapshot());
}
