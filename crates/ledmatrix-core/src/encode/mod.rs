//! Output encodings for a finished LED matrix.
//!
//! This module provides:
//! - Plain text rows (`dark`/`light` characters joined by newlines)
//! - Array literals for C, Python and Arduino headers, one binary literal
//!   per row with column 0 as the most significant bit
//! - A PNG preview image of the matrix
//!
//! Array literals use the smallest of `uint8_t`, `uint16_t` and `uint32_t`
//! that holds a row. Matrices wider than 32 columns cannot be written as
//! array literals and fail with [`EncodeError::UnsupportedWidth`]; the text
//! format and the preview have no width limit.

mod formats;
mod preview;

pub use formats::{
    binary_literal, encode_arduino_header, encode_c_array, encode_python_list, encode_text,
    row_values, EncodeError, IntegerWidth, MatrixFormats, OutputFormat, MAX_LITERAL_COLUMNS,
};
pub use preview::{
    encode_preview_png, preview_dimensions, render_preview, LED_OFF, LED_ON, MAX_PREVIEW_PIXELS,
    PREVIEW_CELL_SIZE,
};
