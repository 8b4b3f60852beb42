//! Canvas geometry for rendered text.

use image::Rgba;

use crate::pixel::PixelBuffer;

/// Total horizontal padding in pixels (half on each side).
pub const HORIZONTAL_PADDING: f64 = 40.0;

/// Vertical padding above and below the text, as a fraction of font size.
pub const VERTICAL_PADDING_RATIO: f64 = 0.5;

/// Size of the canvas a rasterizer draws into, and where the text goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Left edge of the text
    pub text_x: f64,
    /// Vertical middle of the text (middle baseline)
    pub text_y: f64,
}

impl CanvasLayout {
    /// Lay out a canvas around text of the measured size.
    ///
    /// * width = `text_width + 40`
    /// * height = `text_height + 2 * font_size * 0.5`
    ///
    /// Fractional sizes are truncated, with a minimum of 1×1.
    pub fn for_text(text_width: f64, text_height: f64, font_size: f64) -> Self {
        let vertical_padding = font_size * VERTICAL_PADDING_RATIO;
        let width = to_pixels(text_width + HORIZONTAL_PADDING);
        let height = to_pixels(text_height + vertical_padding * 2.0);
        Self {
            width,
            height,
            text_x: HORIZONTAL_PADDING / 2.0,
            text_y: height as f64 / 2.0,
        }
    }

    /// A buffer of this size filled with `background`.
    pub fn blank_buffer(&self, background: Rgba<u8>) -> PixelBuffer {
        PixelBuffer::filled(self.width, self.height, background.0)
    }
}

#[inline]
fn to_pixels(size: f64) -> u32 {
    // NaN and negative sizes end up at the 1 px minimum
    size.max(1.0) as u32
}
