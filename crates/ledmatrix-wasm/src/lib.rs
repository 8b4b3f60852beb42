//! LED Matrix WASM - WebAssembly bindings for the LED matrix converter
//!
//! The browser renders the text onto a canvas; this crate takes the canvas
//! pixels and turns them into the LED grid and its output formats.
//!
//! # Module Structure
//!
//! - `convert` - Pixel buffer to LED matrix conversion
//! - `layout` - Canvas sizing for the text renderer
//! - `types` - WASM-compatible wrapper types for conversion results
//!
//! # Usage
//!
//! ```typescript
//! import init, { canvas_layout, convert_pixels } from '@ledmatrix/wasm';
//!
//! await init();
//!
//! const metrics = ctx.measureText(text);
//! const layout = canvas_layout(metrics.width, fontSize, fontSize);
//! // ... draw text at (layout.text_x, layout.text_y) ...
//!
//! const data = ctx.getImageData(0, 0, layout.width, layout.height).data;
//! const led = convert_pixels(data, layout.width, layout.height, { ledRows: 16 });
//! console.log(led.text);
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod layout;
mod types;

// Re-export public types
pub use convert::convert_pixels;
pub use layout::{canvas_layout, JsCanvasLayout};
pub use types::{download_file_name, JsLedMatrix};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Write a warning to the browser console.
///
/// A no-op off wasm32 so the bindings stay testable natively.
pub(crate) fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
