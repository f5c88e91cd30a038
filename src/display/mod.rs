//! Display compositor bridge
//!
//! While no peer is casting, the module shows a locally generated
//! preview of the current display configuration. This module owns the
//! raster copy into the frame buffer; the buffer itself and the image
//! generation belong to external collaborators modeled by the two
//! traits below.

use tracing::warn;

/// Frame buffer width in pixels (one byte per pixel intensity).
pub const SURFACE_WIDTH: usize = 1920;

/// Frame buffer height in pixels.
pub const SURFACE_HEIGHT: usize = 1080;

/// Preview image width in pixels.
pub const PREVIEW_WIDTH: usize = 640;

/// Preview image height in pixels.
pub const PREVIEW_HEIGHT: usize = 480;

/// Sub-rectangle of the frame buffer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRegion {
    /// Column of the left edge.
    pub x: usize,
    /// Row of the top edge.
    pub y: usize,
    /// Region width in pixels.
    pub width: usize,
    /// Region height in pixels.
    pub height: usize,
}

impl FrameRegion {
    /// Where the preview lands: the bottom-left corner of the surface.
    pub const PREVIEW: Self = Self {
        x: 0,
        y: SURFACE_HEIGHT - PREVIEW_HEIGHT,
        width: PREVIEW_WIDTH,
        height: PREVIEW_HEIGHT,
    };
}

/// Externally-owned frame buffer surface.
///
/// The surface slice is `SURFACE_WIDTH * SURFACE_HEIGHT` bytes, row
/// major, one byte per pixel. It is borrowed only for the duration of
/// one composite; `commit` pushes the buffer to the screen.
pub trait FrameSurface {
    /// Borrow the raw pixel buffer.
    fn surface(&mut self) -> &mut [u8];

    /// Push the current buffer contents to the screen.
    fn commit(&mut self);
}

/// External preview-image generator.
pub trait PreviewGenerator {
    /// Produce a `PREVIEW_WIDTH * PREVIEW_HEIGHT` intensity buffer for
    /// the given brightness/contrast pair.
    fn generate(&mut self, brightness: u8, contrast: u8) -> Vec<u8>;
}

/// Stand-in generator filling the preview uniformly at the brightness
/// level. Real image generation lives outside the crate; this keeps
/// demos and loopback setups self-contained.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatFieldGenerator;

impl PreviewGenerator for FlatFieldGenerator {
    fn generate(&mut self, brightness: u8, _contrast: u8) -> Vec<u8> {
        vec![brightness; PREVIEW_WIDTH * PREVIEW_HEIGHT]
    }
}

/// Bridges decoded display configuration to the frame buffer.
#[derive(Debug)]
pub struct Compositor<F: FrameSurface, G: PreviewGenerator> {
    surface: F,
    generator: G,
}

impl<F: FrameSurface, G: PreviewGenerator> Compositor<F, G> {
    /// Build a compositor over a surface and a generator.
    pub fn new(surface: F, generator: G) -> Self {
        Self { surface, generator }
    }

    /// Access the surface collaborator.
    pub fn surface(&mut self) -> &mut F {
        &mut self.surface
    }

    /// Access the generator collaborator.
    pub fn generator(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Render a preview for the given configuration and composite it
    /// into [`FrameRegion::PREVIEW`], then commit the surface.
    ///
    /// The preview buffer lives only for the duration of this call. A
    /// generator returning fewer bytes than a full preview violates its
    /// contract; the copy stops at the last whole row available and the
    /// shortfall is logged rather than panicking.
    pub fn render_and_composite(&mut self, brightness: u8, contrast: u8) {
        let preview = self.generator.generate(brightness, contrast);

        let region = FrameRegion::PREVIEW;
        let rows = preview.len() / region.width;
        if rows < region.height {
            warn!(
                got = preview.len(),
                expected = region.width * region.height,
                "short preview buffer, compositing partial rows"
            );
        }

        let framebuffer = self.surface.surface();
        for row in 0..rows.min(region.height) {
            let dst = (region.y + row) * SURFACE_WIDTH + region.x;
            let src = row * region.width;
            framebuffer[dst..dst + region.width]
                .copy_from_slice(&preview[src..src + region.width]);
        }

        self.surface.commit();
    }
}
