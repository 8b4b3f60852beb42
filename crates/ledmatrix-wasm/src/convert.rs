//! Conversion bindings.
//!
//! # Example
//!
//! ```typescript
//! import { convert_pixels } from '@ledmatrix/wasm';
//!
//! try {
//!   const led = convert_pixels(imageData.data, canvas.width, canvas.height, {
//!     ledRows: 16,
//!     brightnessThreshold: 128,
//!     matrixChars: { dark: '#', light: '.' },
//!     contrastEnhanced: false,
//!     invert: false,
//!   });
//!   output.textContent = led.text;
//! } catch (e) {
//!   // e is { error: "No text found in canvas." }
//!   showError(e.error);
//! }
//! ```

use ledmatrix_core::{convert, ConvertError, ConvertRequest, ErrorResponse, LedMatrix, PixelBuffer};
use wasm_bindgen::prelude::*;

use crate::console_warn;
use crate::types::JsLedMatrix;

/// Convert canvas pixels to an LED matrix.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major), as returned
///   by `getImageData().data`
/// * `width` - Canvas width in pixels
/// * `height` - Canvas height in pixels
/// * `options` - Request object with camelCase fields; `undefined`, `null`
///   and missing fields take the defaults
///
/// # Errors
///
/// Throws `{ error: string }` when the options are invalid, the buffer does
/// not match the dimensions, or no text is found.
#[wasm_bindgen]
pub fn convert_pixels(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    options: JsValue,
) -> Result<JsLedMatrix, JsValue> {
    let request: ConvertRequest = if options.is_undefined() || options.is_null() {
        ConvertRequest::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| error_value(&format!("Invalid options: {}", e)))?
    };

    convert_request(PixelBuffer { width, height, pixels }, &request)
        .map(JsLedMatrix::from_core)
        .map_err(|e| {
            console_warn(&e.to_string());
            error_value(&e.to_string())
        })
}

/// Validate `request` and convert `buffer` with its settings.
///
/// The text style fields are checked but unused; the browser has already
/// drawn the text.
pub(crate) fn convert_request(
    buffer: PixelBuffer,
    request: &ConvertRequest,
) -> Result<LedMatrix, ConvertError> {
    let (config, _style) = request.validate()?;
    convert(&buffer, &config)
}

/// `{ error: message }` as a JS object.
fn error_value(message: &str) -> JsValue {
    let response = ErrorResponse {
        error: message.to_string(),
    };
    serde_wasm_bindgen::to_value(&response).unwrap_or_else(|_| JsValue::from_str(message))
}
