//! Core pixel types.

use crate::brightness::Brightness;
use crate::pipeline::ConvertError;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA pixel buffer holding rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Buffer width in pixels.
    pub width: u32,
    /// Buffer height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check that the data length matches the dimensions and that the
    /// buffer holds at least one pixel.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let expected = expected_len(self.width, self.height);
        if self.is_empty() || self.pixels.len() != expected {
            return Err(ConvertError::InvalidBuffer {
                width: self.width,
                height: self.height,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// RGBA bytes of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = self.offset(x, y);
        &self.pixels[i..i + BYTES_PER_PIXEL]
    }

    /// Overwrite the pixel at (x, y).
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Brightness of the pixel at (x, y).
    #[inline]
    pub fn brightness_at(&self, x: u32, y: u32) -> Brightness {
        Brightness::from_pixel(self.pixel(x, y))
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid buffer.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

/// Tight inclusive rectangle around the text pixels of a buffer.
///
/// A box always contains at least one pixel. A buffer without text pixels
/// has no box at all (see [`crate::bounds::detect_bounds`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl BoundingBox {
    /// Box containing a single pixel.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    /// Grow the box to include (x, y).
    #[inline]
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Inclusive width (`max_x - min_x + 1`).
    ///
    /// Zero only for a malformed box with `min_x > max_x`.
    pub fn width(&self) -> u32 {
        inclusive_extent(self.min_x, self.max_x)
    }

    /// Inclusive height (`max_y - min_y + 1`).
    pub fn height(&self) -> u32 {
        inclusive_extent(self.min_y, self.max_y)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }
}

/// `max - min + 1`, zero when `min > max`, saturating at `u32::MAX`.
#[inline]
fn inclusive_extent(min: u32, max: u32) -> u32 {
    max.checked_sub(min).map_or(0, |d| d.saturating_add(1))
}
