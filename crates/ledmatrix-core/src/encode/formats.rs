//! Text and array-literal encodings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matrix::BinaryMatrix;
use crate::MatrixChars;

/// Widest row that fits an array literal.
pub const MAX_LITERAL_COLUMNS: u32 = 32;

/// Errors that can occur while encoding a matrix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Row is wider than the largest supported integer literal
    #[error("Matrix has {columns} columns; array formats support at most 32")]
    UnsupportedWidth { columns: u32 },

    /// Matrix has no rows or no columns
    #[error("Matrix is empty")]
    EmptyMatrix,

    /// Preview image would exceed the pixel budget
    #[error("Preview of a {columns}x{rows} matrix is too large")]
    PreviewTooLarge { columns: u32, rows: u32 },

    /// Image encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Unsigned integer type used for one matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntegerWidth {
    U8,
    U16,
    U32,
}

impl IntegerWidth {
    /// Smallest width that holds `columns` bits.
    pub fn for_columns(columns: u32) -> Result<Self, EncodeError> {
        match columns {
            0 => Err(EncodeError::EmptyMatrix),
            1..=8 => Ok(IntegerWidth::U8),
            9..=16 => Ok(IntegerWidth::U16),
            17..=MAX_LITERAL_COLUMNS => Ok(IntegerWidth::U32),
            _ => Err(EncodeError::UnsupportedWidth { columns }),
        }
    }

    /// Bit count of the type.
    pub fn bits(self) -> u32 {
        match self {
            IntegerWidth::U8 => 8,
            IntegerWidth::U16 => 16,
            IntegerWidth::U32 => 32,
        }
    }

    /// C type name (`uint8_t`, `uint16_t`, `uint32_t`).
    pub fn c_type(self) -> &'static str {
        match self {
            IntegerWidth::U8 => "uint8_t",
            IntegerWidth::U16 => "uint16_t",
            IntegerWidth::U32 => "uint32_t",
        }
    }
}

/// Downloadable output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    C,
    Python,
    Arduino,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Text,
        OutputFormat::C,
        OutputFormat::Python,
        OutputFormat::Arduino,
    ];

    /// Identifier used by the front end (`"text"`, `"c"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::C => "c",
            OutputFormat::Python => "python",
            OutputFormat::Arduino => "arduino",
        }
    }

    /// Suggested download file name.
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Text => "led_matrix.txt",
            OutputFormat::C => "matrix.c",
            OutputFormat::Python => "matrix.py",
            OutputFormat::Arduino => "matrix.h",
        }
    }

    /// MIME type of the download.
    pub fn mime_type(self) -> &'static str {
        "text/plain"
    }

    /// Whether the format is an array literal (limited to 32 columns).
    pub fn is_array_literal(self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown output format: {}", s))
    }
}

/// All four encodings of one matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixFormats {
    pub text: String,
    pub c: String,
    pub python: String,
    pub arduino: String,
}

impl MatrixFormats {
    /// Encode `matrix` in every format.
    ///
    /// # Errors
    ///
    /// Fails with [`EncodeError::UnsupportedWidth`] for more than 32 columns.
    pub fn encode(matrix: &BinaryMatrix, chars: &MatrixChars) -> Result<Self, EncodeError> {
        Ok(Self {
            text: encode_text(matrix, chars),
            c: encode_c_array(matrix)?,
            python: encode_python_list(matrix)?,
            arduino: encode_arduino_header(matrix)?,
        })
    }

    /// Content for a download format.
    pub fn get(&self, format: OutputFormat) -> &str {
        match format {
            OutputFormat::Text => &self.text,
            OutputFormat::C => &self.c,
            OutputFormat::Python => &self.python,
            OutputFormat::Arduino => &self.arduino,
        }
    }
}

/// Rows of characters joined by `\n`, no trailing newline.
pub fn encode_text(matrix: &BinaryMatrix, chars: &MatrixChars) -> String {
    matrix.to_char_rows(chars).join("\n")
}

/// `0b` followed by one digit per column, column 0 first.
pub fn binary_literal(row: &[bool]) -> String {
    let mut literal = String::with_capacity(row.len() + 2);
    literal.push_str("0b");
    literal.extend(row.iter().map(|&dark| if dark { '1' } else { '0' }));
    literal
}

/// Each row as an unsigned integer (column 0 = most significant bit),
/// together with the integer width that holds it.
pub fn row_values(matrix: &BinaryMatrix) -> Result<(IntegerWidth, Vec<u32>), EncodeError> {
    let width = literal_width(matrix)?;
    let values = matrix
        .iter_rows()
        .map(|row| row.iter().fold(0u32, |acc, &dark| (acc << 1) | dark as u32))
        .collect();
    Ok((width, values))
}

/// `const uintN_t PROGMEM matrix[rows] = { ... };`
pub fn encode_c_array(matrix: &BinaryMatrix) -> Result<String, EncodeError> {
    let width = literal_width(matrix)?;
    Ok(format!(
        "const {} PROGMEM matrix[{}] = {{\n{}\n}};",
        width.c_type(),
        matrix.rows(),
        literal_rows(matrix)
    ))
}

/// `matrix = [ ... ]`
pub fn encode_python_list(matrix: &BinaryMatrix) -> Result<String, EncodeError> {
    literal_width(matrix)?;
    Ok(format!("matrix = [\n{}\n]", literal_rows(matrix)))
}

/// Arduino header with include guard and row/column constants.
pub fn encode_arduino_header(matrix: &BinaryMatrix) -> Result<String, EncodeError> {
    let width = literal_width(matrix)?;
    Ok(format!(
        "#ifndef MATRIX_H\n#define MATRIX_H\n\n#include <Arduino.h>\n\n\
         #define MATRIX_ROWS {}\n#define MATRIX_COLS {}\n\n\
         const {} PROGMEM matrix[MATRIX_ROWS] = {{\n{}\n}};\n\n#endif // MATRIX_H",
        matrix.rows(),
        matrix.columns(),
        width.c_type(),
        literal_rows(matrix)
    ))
}

fn literal_width(matrix: &BinaryMatrix) -> Result<IntegerWidth, EncodeError> {
    if matrix.rows() == 0 {
        return Err(EncodeError::EmptyMatrix);
    }
    IntegerWidth::for_columns(matrix.columns())
}

/// Indented literals, one per line, comma separated.
fn literal_rows(matrix: &BinaryMatrix) -> String {
    matrix
        .iter_rows()
        .map(|row| format!("  {}", binary_literal(row)))
        .collect::<Vec<_>>()
        .join(",\n")
}


// ============================================================================
// Property-Based Tests
// ============================================================================
