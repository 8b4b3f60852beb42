//! Boundary to the external text rasterizer.
//!
//! The core never draws glyphs. A [`Rasterizer`] implementation (a canvas
//! binding, a font engine, a test double) paints the background and then the
//! text into a [`PixelBuffer`] sized by [`CanvasLayout`], and the pipeline
//! takes it from there.
//!
//! Fonts are registered once per process through [`register_fonts`] before
//! the first conversion, and are read-only afterwards.

mod fonts;
mod layout;

pub use fonts::{font_registry, register_fonts, FontRegistry, FontRegistryError, FontSource};
pub use layout::{CanvasLayout, HORIZONTAL_PADDING, VERTICAL_PADDING_RATIO};

use thiserror::Error;

use crate::pixel::PixelBuffer;
use crate::request::TextStyle;

/// Errors reported by a rasterizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RasterizeError {
    /// The requested font family is not available
    #[error("Font not available: {0}")]
    FontUnavailable(String),

    /// There is no text to draw
    #[error("No text to render")]
    EmptyText,

    /// Any other rasterizer failure
    #[error("Rasterization failed: {0}")]
    Failed(String),
}

/// Renders styled text into an RGBA buffer.
///
/// Implementations must return a buffer laid out by
/// [`CanvasLayout::for_text`], filled with the background colour and with
/// the text drawn on top.
pub trait Rasterizer {
    fn rasterize(&self, style: &TextStyle, fonts: &FontRegistry)
        -> Result<PixelBuffer, RasterizeError>;
}
