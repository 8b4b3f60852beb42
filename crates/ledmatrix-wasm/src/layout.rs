//! Canvas sizing bindings.
//!
//! The browser measures the text with `CanvasRenderingContext2D.measureText`
//! and asks for the canvas size before drawing, so the pixels handed to
//! [`convert_pixels`](crate::convert_pixels) have the padding the converter
//! expects.

use ledmatrix_core::raster::CanvasLayout;
use wasm_bindgen::prelude::*;

/// Canvas size and text anchor for JavaScript.
#[wasm_bindgen]
pub struct JsCanvasLayout {
    inner: CanvasLayout,
}

#[wasm_bindgen]
impl JsCanvasLayout {
    /// Canvas width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Canvas height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// X coordinate for `fillText` (left aligned)
    #[wasm_bindgen(getter)]
    pub fn text_x(&self) -> f64 {
        self.inner.text_x
    }

    /// Y coordinate for `fillText` (`textBaseline = "middle"`)
    #[wasm_bindgen(getter)]
    pub fn text_y(&self) -> f64 {
        self.inner.text_y
    }
}

/// Compute the canvas layout for measured text.
///
/// # Arguments
/// * `text_width` - Measured text width in pixels
/// * `text_height` - Text height in pixels (usually the font size)
/// * `font_size` - Font size in pixels
#[wasm_bindgen]
pub fn canvas_layout(text_width: f64, text_height: f64, font_size: f64) -> JsCanvasLayout {
    JsCanvasLayout {
        inner: CanvasLayout::for_text(text_width, text_height, font_size),
    }
}
