//! Contrast enhancement by linear brightness stretch.
//!
//! The darkest pixel (by brightness) maps to 0 and the brightest to 255.
//! Each of R, G and B is stretched independently with the same mapping:
//!
//! `channel' = (channel - min) / (max - min) * 255`
//!
//! Results are rounded half away from zero and clamped to 0..=255
//! (a channel can sit below the minimum brightness of its pixel's mean).
//! Alpha is left untouched. A uniform buffer (`max == min`) is returned
//! unchanged.
//!
//! The caller's buffer is never modified; enhancement yields a new buffer.

use std::borrow::Cow;

use tracing::debug;

use crate::brightness::Brightness;
use crate::pixel::{PixelBuffer, BYTES_PER_PIXEL};

/// Run the enhancement stage.
///
/// Borrows the input untouched when `enabled` is false.
pub fn apply_contrast(buffer: &PixelBuffer, enabled: bool) -> Cow<'_, PixelBuffer> {
    if enabled {
        Cow::Owned(enhance_contrast(buffer))
    } else {
        Cow::Borrowed(buffer)
    }
}

/// Return a contrast-stretched copy of `buffer`.
pub fn enhance_contrast(buffer: &PixelBuffer) -> PixelBuffer {
    let mut output = buffer.clone();
    stretch_pixels(&mut output.pixels);
    output
}

/// Minimum and maximum brightness over RGBA pixel data.
///
/// Returns `None` for empty data.
pub fn brightness_range(pixels: &[u8]) -> Option<(Brightness, Brightness)> {
    pixels
        .chunks_exact(BYTES_PER_PIXEL)
        .map(Brightness::from_pixel)
        .fold(None, |range, b| match range {
            None => Some((b, b)),
            Some((min, max)) => Some((min.min(b), max.max(b))),
        })
}

fn stretch_pixels(pixels: &mut [u8]) {
    let Some((min, max)) = brightness_range(pixels) else {
        return;
    };
    if min == max {
        debug!("Uniform brightness, contrast stretch skipped");
        return;
    }

    let low = min.value();
    let range = max.value() - low;
    debug!(min = low, max = max.value(), "Stretching contrast");

    for chunk in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
        for channel in &mut chunk[..3] {
            *channel = stretch_channel(*channel, low, range);
        }
    }
}

#[inline]
fn stretch_channel(channel: u8, low: f64, range: f64) -> u8 {
    ((channel as f64 - low) / range * 255.0)
        .round()
        .clamp(0.0, 255.0) as u8
}
