//! LED Matrix Core - text-to-LED-matrix conversion library
//!
//! This crate turns an RGBA buffer holding rendered text into a low-resolution
//! binary grid suitable for driving LED panels, and serializes that grid as
//! plain text and as C, Python and Arduino array literals.
//!
//! # Pipeline
//!
//! 1. Contrast enhancement (optional linear stretch)
//! 2. Bounds detection (tight box around text pixels)
//! 3. Nearest-neighbor resampling to `led_rows` rows
//! 4. Thresholding into dark/light cells
//! 5. Format encoding
//!
//! Text rasterization is not done here. Callers supply a [`PixelBuffer`],
//! either directly or through a [`raster::Rasterizer`] implementation.

pub mod bounds;
pub mod brightness;
pub mod contrast;
pub mod encode;
pub mod matrix;
pub mod pipeline;
pub mod pixel;
pub mod raster;
pub mod request;
pub mod threshold;
pub mod transform;

pub use bounds::detect_bounds;
pub use contrast::enhance_contrast;
pub use encode::{EncodeError, IntegerWidth, MatrixFormats, OutputFormat};
pub use matrix::BinaryMatrix;
pub use pipeline::{convert, convert_text, ConvertError, ConvertResponse, ErrorResponse, LedMatrix};
pub use pixel::{BoundingBox, PixelBuffer};
pub use request::{ConfigError, ConvertRequest};
pub use transform::{resample, target_width, MAX_GRID_CELLS};

use serde::{Deserialize, Serialize};

/// Default number of LED rows.
pub const DEFAULT_LED_ROWS: u32 = 16;

/// Largest accepted number of LED rows.
pub const MAX_LED_ROWS: u32 = 256;

/// Brightness threshold (0 to 255 inclusive).
///
/// Without invert a pixel is dark when its brightness is below
/// `255 - threshold`; with invert it is dark when its brightness is at
/// least `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrightnessThreshold(pub u8);

impl BrightnessThreshold {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for BrightnessThreshold {
    fn default() -> Self {
        Self(128)
    }
}

/// Characters used for dark and light cells in the text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixChars {
    /// Character for a lit (dark/text) cell
    pub dark: char,
    /// Character for an unlit (light/background) cell
    pub light: char,
}

impl Default for MatrixChars {
    fn default() -> Self {
        Self {
            dark: '#',
            light: '.',
        }
    }
}

impl MatrixChars {
    pub fn new(dark: char, light: char) -> Self {
        Self { dark, light }
    }

    /// Character for a cell.
    #[inline]
    pub fn for_cell(&self, is_dark: bool) -> char {
        if is_dark {
            self.dark
        } else {
            self.light
        }
    }
}

/// Settings for a single conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionConfig {
    /// Number of rows in the output grid (1 to `MAX_LED_ROWS`)
    pub led_rows: u32,
    /// Dark/light cutoff
    pub brightness_threshold: BrightnessThreshold,
    /// Output characters for the text representation
    pub matrix_chars: MatrixChars,
    /// Stretch the buffer to the full brightness range before detection
    pub contrast_enhanced: bool,
    /// Treat bright pixels as text (light text on dark background)
    pub invert: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            led_rows: DEFAULT_LED_ROWS,
            brightness_threshold: BrightnessThreshold::default(),
            matrix_chars: MatrixChars::default(),
            contrast_enhanced: false,
            invert: false,
        }
    }
}

impl ConversionConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ConversionConfig::new();
        assert_eq!(config.led_rows, 16);
        assert_eq!(config.brightness_threshold.value(), 128);
        assert_eq!(config.matrix_chars, MatrixChars::new('#', '.'));
        assert!(!config.contrast_enhanced);
        assert!(!config.invert);
    }

    #[test]
    fn test_matrix_chars_for_cell() {
        let chars = MatrixChars::new('X', ' ');
        assert_eq!(chars.for_cell(true), 'X');
        assert_eq!(chars.for_cell(false), ' ');
    }

    #[test]
    fn test_config_serde_camel_case() {
        let mut config = ConversionConfig::new();
        config.invert = true;
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["ledRows"], 16);
        assert_eq!(json["brightnessThreshold"], 128);
        assert_eq!(json["matrixChars"]["dark"], "#");
        assert_eq!(json["invert"], true);

        let back: ConversionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
