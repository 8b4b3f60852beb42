//! Text bounds detection.
//!
//! Finds the tight inclusive rectangle around every pixel classified as
//! text by [`Brightness::is_dark`](crate::brightness::Brightness::is_dark).
//! The scan visits each pixel exactly once in row-major order.

use tracing::debug;

use crate::brightness::Brightness;
use crate::pixel::{BoundingBox, PixelBuffer, BYTES_PER_PIXEL};
use crate::BrightnessThreshold;

/// Detect the bounding box of the text pixels in `buffer`.
///
/// Returns `None` when no pixel is classified as text.
pub fn detect_bounds(
    buffer: &PixelBuffer,
    threshold: BrightnessThreshold,
    invert: bool,
) -> Option<BoundingBox> {
    let width = buffer.width as usize;
    if width == 0 {
        return None;
    }

    let mut bounds: Option<BoundingBox> = None;
    for (i, pixel) in buffer.pixels.chunks_exact(BYTES_PER_PIXEL).enumerate() {
        if !Brightness::from_pixel(pixel).is_dark(threshold, invert) {
            continue;
        }
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        match bounds.as_mut() {
            Some(b) => b.include(x, y),
            None => bounds = Some(BoundingBox::at(x, y)),
        }
    }

    match &bounds {
        Some(b) => debug!(
            min_x = b.min_x,
            max_x = b.max_x,
            min_y = b.min_y,
            max_y = b.max_y,
            "Detected text bounds"
        ),
        None => debug!(
            width = buffer.width,
            height = buffer.height,
            "No text pixels found"
        ),
    }
    bounds
}
