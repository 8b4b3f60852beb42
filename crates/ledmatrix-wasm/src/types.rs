//! WASM-compatible wrapper types for conversion results.

use ledmatrix_core::{ConvertResponse, LedMatrix, OutputFormat};
use wasm_bindgen::prelude::*;

/// A converted LED matrix for JavaScript.
///
/// Holds the matrix together with its pre-rendered formats. Array formats
/// (`c_array`, `python`, `arduino`) are `undefined` when the matrix is wider
/// than 32 columns.
#[wasm_bindgen]
pub struct JsLedMatrix {
    inner: LedMatrix,
    response: ConvertResponse,
}

#[wasm_bindgen]
impl JsLedMatrix {
    /// Number of LED rows
    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.response.dimensions.rows
    }

    /// Number of LED columns
    #[wasm_bindgen(getter)]
    pub fn columns(&self) -> u32 {
        self.response.dimensions.columns
    }

    /// Rows joined by newlines
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.response.formats.text.clone()
    }

    /// C array with `PROGMEM`
    #[wasm_bindgen(getter)]
    pub fn c_array(&self) -> Option<String> {
        self.response.formats.c.clone()
    }

    /// Python list
    #[wasm_bindgen(getter)]
    pub fn python(&self) -> Option<String> {
        self.response.formats.python.clone()
    }

    /// Arduino header
    #[wasm_bindgen(getter)]
    pub fn arduino(&self) -> Option<String> {
        self.response.formats.arduino.clone()
    }

    /// Character rows as a JS array of strings.
    pub fn matrix_rows(&self) -> js_sys::Array {
        self.response
            .matrix
            .iter()
            .map(|row| JsValue::from_str(row))
            .collect()
    }

    /// PNG preview as Uint8Array.
    pub fn preview_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .preview_png()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Download content for `"text"`, `"c"`, `"python"` or `"arduino"`.
    pub fn download(&self, format: &str) -> Result<String, JsValue> {
        let format: OutputFormat = format.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.inner
            .format(format)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Serialize to `{ matrix, dimensions, formats }`
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.response).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsLedMatrix {
    /// Wrap a core conversion result.
    pub(crate) fn from_core(inner: LedMatrix) -> Self {
        let response = inner.to_response();
        Self { inner, response }
    }

    /// The wrapped core result.
    #[cfg(test)]
    pub(crate) fn inner(&self) -> &LedMatrix {
        &self.inner
    }
}

/// Suggested file name for a download format.
///
/// Unknown formats fall back to the text file name.
#[wasm_bindgen]
pub fn download_file_name(format: &str) -> String {
    format
        .parse::<OutputFormat>()
        .unwrap_or(OutputFormat::Text)
        .file_name()
        .to_string()
}
