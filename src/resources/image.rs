//! Source image data.

use crate::errors::{Result, ViewerError};

/// Bytes per pixel for the only supported pixel layout.
pub const RGBA_BYTES_PER_PIXEL: usize = 4;

/// An RGBA8 pixel buffer with its dimensions, immutable after construction.
///
/// This is the CPU-side source a tiled-image node uploads once at
/// initialization. Validation happens here so downstream code can rely on
/// `pixels.len() == width * height * 4`.
#[derive(Debug, Clone)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageData {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ViewerError::InvalidGeometry(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * RGBA_BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(ViewerError::InvalidGeometry(format!(
                "pixel buffer holds {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Generates a black-and-white checkerboard image.
    ///
    /// Useful for demos and tests that need a recognizable texture without
    /// decoding anything. A `check_size` of zero is treated as one.
    pub fn checkerboard(width: u32, height: u32, check_size: u32) -> Result<Self> {
        let check_size = check_size.max(1);
        let mut pixels =
            Vec::with_capacity(width as usize * height as usize * RGBA_BYTES_PER_PIXEL);

        let color_a = [255, 255, 255, 255];
        let color_b = [0, 0, 0, 255];

        for y in 0..height {
            for x in 0..width {
                let is_a = (x / check_size + y / check_size) % 2 == 0;
                pixels.extend_from_slice(if is_a { &color_a } else { &color_b });
            }
        }

        Self::new(width, height, pixels)
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 bytes, row-major, top row first.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
