//! Pixel brightness and the dark/light classification rule.
//!
//! Brightness is the unweighted mean of the red, green and blue channels;
//! alpha is ignored. Internally the channel sum (0 to 765) is kept so that
//! threshold comparisons are exact integer arithmetic instead of comparing
//! thirds in floating point.
//!
//! Both bounds detection and thresholding classify pixels through
//! [`Brightness::is_dark`], so "text pixel" means the same thing in
//! every stage.

use crate::BrightnessThreshold;

/// Brightness of one pixel, stored as the sum of its RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Brightness(u16);

impl Brightness {
    /// Brightness of pure black.
    pub const MIN: Brightness = Brightness(0);

    /// Brightness of pure white.
    pub const MAX: Brightness = Brightness(3 * 255);

    /// Brightness of an RGB triple.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r as u16 + g as u16 + b as u16)
    }

    /// Brightness of an RGBA pixel slice (at least 3 bytes, alpha ignored).
    #[inline]
    pub fn from_pixel(pixel: &[u8]) -> Self {
        Self::from_rgb(pixel[0], pixel[1], pixel[2])
    }

    /// Raw channel sum (0 to 765).
    #[inline]
    pub fn channel_sum(self) -> u16 {
        self.0
    }

    /// Mean channel value (0.0 to 255.0).
    #[inline]
    pub fn value(self) -> f64 {
        self.0 as f64 / 3.0
    }

    /// Classify a pixel as dark (text) or light (background).
    ///
    /// * `invert == false`: dark iff `brightness < 255 - threshold`
    /// * `invert == true`: dark iff `brightness >= threshold`
    #[inline]
    pub fn is_dark(self, threshold: BrightnessThreshold, invert: bool) -> bool {
        let t = threshold.value() as u16;
        if invert {
            self.0 >= 3 * t
        } else {
            self.0 < 3 * (255 - t)
        }
    }
}
