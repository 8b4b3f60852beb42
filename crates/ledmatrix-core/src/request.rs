//! Conversion requests as received from the web layer.
//!
//! Every field is optional; missing fields take the defaults below.
//!
//! | Field                 | Default                  |
//! |-----------------------|--------------------------|
//! | `text`                | `"Enter your text here"` |
//! | `fontSize`            | `24`                     |
//! | `fontWeight`          | `"normal"`               |
//! | `fontFamily`          | `"Arial"`                |
//! | `textColor`           | `"#000000"`              |
//! | `backgroundColor`     | `"#FFFFFF"`              |
//! | `ledRows`             | `16`                     |
//! | `brightnessThreshold` | `128`                    |
//! | `matrixChars`         | `{ dark: "#", light: "." }` |
//! | `contrastEnhanced`    | `false`                  |
//! | `invert`              | `false`                  |
//!
//! [`ConvertRequest::validate`] checks the raw values and splits them into a
//! [`ConversionConfig`] for the pipeline and a [`TextStyle`] for the
//! rasterizer.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BrightnessThreshold, ConversionConfig, MatrixChars, DEFAULT_LED_ROWS, MAX_LED_ROWS};

/// Errors from request validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Brightness threshold must be between 0 and 255, got {0}")]
    ThresholdOutOfRange(i64),

    #[error("LED rows must be between 1 and 256, got {0}")]
    InvalidLedRows(i64),

    #[error("Matrix character '{which}' must be a single printable character, got {value:?}")]
    InvalidMatrixChar { which: &'static str, value: String },

    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),

    #[error("Unknown font weight: {0:?}")]
    InvalidFontWeight(String),

    #[error("Font size must be positive, got {0}")]
    InvalidFontSize(f64),
}

/// CSS font weight accepted by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Lighter,
}

impl FontWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::Lighter => "lighter",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontWeight {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FontWeight::Normal),
            "bold" => Ok(FontWeight::Bold),
            "lighter" => Ok(FontWeight::Lighter),
            _ => Err(ConfigError::InvalidFontWeight(s.to_string())),
        }
    }
}

/// Matrix characters as sent by the client (strings, checked later).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestChars {
    pub dark: String,
    pub light: String,
}

impl Default for RequestChars {
    fn default() -> Self {
        Self {
            dark: "#".to_string(),
            light: ".".to_string(),
        }
    }
}

/// A conversion request with unvalidated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertRequest {
    pub text: String,
    pub font_size: f64,
    pub font_weight: String,
    pub font_family: String,
    pub text_color: String,
    pub background_color: String,
    pub led_rows: i64,
    pub brightness_threshold: i64,
    pub matrix_chars: RequestChars,
    pub contrast_enhanced: bool,
    pub invert: bool,
}

impl Default for ConvertRequest {
    fn default() -> Self {
        Self {
            text: "Enter your text here".to_string(),
            font_size: 24.0,
            font_weight: "normal".to_string(),
            font_family: "Arial".to_string(),
            text_color: "#000000".to_string(),
            background_color: "#FFFFFF".to_string(),
            led_rows: DEFAULT_LED_ROWS as i64,
            brightness_threshold: 128,
            matrix_chars: RequestChars::default(),
            contrast_enhanced: false,
            invert: false,
        }
    }
}

/// Everything the rasterizer needs to draw the text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub text: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_family: String,
    pub text_color: Rgba<u8>,
    pub background_color: Rgba<u8>,
}

impl TextStyle {
    /// CSS font shorthand, e.g. `"bold 24px Arial"`.
    pub fn css_font(&self) -> String {
        format!("{} {}px {}", self.font_weight, self.font_size, self.font_family)
    }
}

impl ConvertRequest {
    /// Validate the request and split it into pipeline and rasterizer settings.
    pub fn validate(&self) -> Result<(ConversionConfig, TextStyle), ConfigError> {
        Ok((self.conversion_config()?, self.text_style()?))
    }

    /// Validate only the pipeline settings.
    ///
    /// Used when the caller already has a rendered buffer.
    pub fn conversion_config(&self) -> Result<ConversionConfig, ConfigError> {
        let threshold = u8::try_from(self.brightness_threshold)
            .map_err(|_| ConfigError::ThresholdOutOfRange(self.brightness_threshold))?;
        let led_rows = u32::try_from(self.led_rows)
            .ok()
            .filter(|rows| (1..=MAX_LED_ROWS).contains(rows))
            .ok_or(ConfigError::InvalidLedRows(self.led_rows))?;

        let config = ConversionConfig {
            led_rows,
            brightness_threshold: BrightnessThreshold::new(threshold),
            matrix_chars: MatrixChars {
                dark: parse_matrix_char("dark", &self.matrix_chars.dark)?,
                light: parse_matrix_char("light", &self.matrix_chars.light)?,
            },
            contrast_enhanced: self.contrast_enhanced,
            invert: self.invert,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate only the rasterizer settings.
    pub fn text_style(&self) -> Result<TextStyle, ConfigError> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::InvalidFontSize(self.font_size));
        }
        Ok(TextStyle {
            text: self.text.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight.parse()?,
            font_family: self.font_family.clone(),
            text_color: parse_hex_color(&self.text_color)?,
            background_color: parse_hex_color(&self.background_color)?,
        })
    }
}

impl ConversionConfig {
    /// Check the invariants a config built by hand might break.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LED_ROWS).contains(&self.led_rows) {
            return Err(ConfigError::InvalidLedRows(self.led_rows as i64));
        }
        for (which, c) in [
            ("dark", self.matrix_chars.dark),
            ("light", self.matrix_chars.light),
        ] {
            if c.is_control() {
                return Err(ConfigError::InvalidMatrixChar {
                    which,
                    value: c.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_matrix_char(which: &'static str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok(c),
        _ => Err(ConfigError::InvalidMatrixChar {
            which,
            value: value.to_string(),
        }),
    }
}

/// Parse `#RRGGBB` or `#RGB` (case-insensitive) into an opaque colour.
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, ConfigError> {
    let invalid = || ConfigError::InvalidColor(value.to_string());
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    let (r, g, b) = match hex.len() {
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        3 => (
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        ),
        _ => return Err(invalid()),
    };
    Ok(Rgba([r, g, b, 255]))
}
