//! End-to-end conversion from a rendered text buffer to an LED matrix.
//!
//! ```text
//! PixelBuffer ─▶ contrast ─▶ bounds ─▶ resample ─▶ threshold ─▶ LedMatrix
//! ```
//!
//! The caller's buffer is only read. Every call is independent, so
//! conversions may run concurrently on different buffers.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bounds::detect_bounds;
use crate::contrast::apply_contrast;
use crate::encode::{
    encode_arduino_header, encode_c_array, encode_preview_png, encode_python_list, encode_text,
    EncodeError, MatrixFormats, OutputFormat,
};
use crate::matrix::{BinaryMatrix, Dimensions};
use crate::pixel::{BoundingBox, PixelBuffer};
use crate::raster::{font_registry, RasterizeError, Rasterizer};
use crate::request::{ConfigError, ConvertRequest};
use crate::threshold::apply_threshold;
use crate::transform::resample;
use crate::{ConversionConfig, MatrixChars};

/// Errors that can occur during conversion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvertError {
    /// No pixel was classified as text
    #[error("No text found in canvas.")]
    NoForegroundFound,

    /// The text region has zero width or height
    #[error("Text region is degenerate ({width}x{height})")]
    DegenerateCrop { width: u32, height: u32 },

    /// The requested grid exceeds the cell budget
    #[error("LED grid of {columns}x{rows} cells is too large")]
    GridTooLarge { columns: u32, rows: u32 },

    /// The matrix is too wide for array literals
    #[error("Matrix has {columns} columns; array formats support at most 32")]
    UnsupportedWidth { columns: u32 },

    /// The rasterizer could not render the text
    #[error(transparent)]
    RasterizationFailure(#[from] RasterizeError),

    /// Pixel data length does not match the dimensions
    #[error("Invalid buffer: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Request or config values are out of range
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// Encoding the output failed
    #[error(transparent)]
    Encoding(EncodeError),
}

impl From<EncodeError> for ConvertError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::UnsupportedWidth { columns } => ConvertError::UnsupportedWidth { columns },
            other => ConvertError::Encoding(other),
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedMatrix {
    matrix: BinaryMatrix,
    rows: Vec<String>,
    chars: MatrixChars,
    bounds: BoundingBox,
}

impl LedMatrix {
    /// The binary grid (dark = `true`).
    pub fn matrix(&self) -> &BinaryMatrix {
        &self.matrix
    }

    /// Character rows, one string per LED row.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn chars(&self) -> MatrixChars {
        self.chars
    }

    /// Text bounds detected in the source buffer.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn dimensions(&self) -> Dimensions {
        self.matrix.dimensions()
    }

    /// Rows joined by `\n`.
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }

    /// Content of one download format.
    ///
    /// # Errors
    ///
    /// Array formats fail with [`ConvertError::UnsupportedWidth`] above 32
    /// columns.
    pub fn format(&self, format: OutputFormat) -> Result<String, ConvertError> {
        let content = match format {
            OutputFormat::Text => encode_text(&self.matrix, &self.chars),
            OutputFormat::C => encode_c_array(&self.matrix)?,
            OutputFormat::Python => encode_python_list(&self.matrix)?,
            OutputFormat::Arduino => encode_arduino_header(&self.matrix)?,
        };
        Ok(content)
    }

    /// All four formats.
    pub fn formats(&self) -> Result<MatrixFormats, ConvertError> {
        Ok(MatrixFormats::encode(&self.matrix, &self.chars)?)
    }

    /// PNG preview of the matrix.
    pub fn preview_png(&self) -> Result<Vec<u8>, ConvertError> {
        Ok(encode_preview_png(&self.matrix)?)
    }

    /// Response payload for the front end.
    ///
    /// Array formats are `null` when the matrix is too wide for them.
    pub fn to_response(&self) -> ConvertResponse {
        let formats = match MatrixFormats::encode(&self.matrix, &self.chars) {
            Ok(f) => ResponseFormats {
                text: f.text,
                c: Some(f.c),
                python: Some(f.python),
                arduino: Some(f.arduino),
            },
            Err(err) => {
                warn!(error = %err, "Array formats skipped");
                ResponseFormats {
                    text: self.text(),
                    c: None,
                    python: None,
                    arduino: None,
                }
            }
        };

        ConvertResponse {
            matrix: self.rows.clone(),
            dimensions: self.dimensions(),
            formats,
        }
    }
}

/// Formats included in a [`ConvertResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormats {
    pub text: String,
    pub c: Option<String>,
    pub python: Option<String>,
    pub arduino: Option<String>,
}

/// Successful conversion payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub matrix: Vec<String>,
    pub dimensions: Dimensions,
    pub formats: ResponseFormats,
}

/// Failed conversion payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ConvertError> for ErrorResponse {
    fn from(err: &ConvertError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Convert a rendered text buffer to an LED matrix.
///
/// # Errors
///
/// - [`ConvertError::InvalidConfig`] for a row count outside
///   `1..=MAX_LED_ROWS` or control characters
/// - [`ConvertError::InvalidBuffer`] if the pixel data does not match the
///   dimensions
/// - [`ConvertError::NoForegroundFound`] if no pixel counts as text
/// - [`ConvertError::GridTooLarge`] if the text region is so wide that the
///   grid would exceed [`MAX_GRID_CELLS`](crate::MAX_GRID_CELLS)
pub fn convert(buffer: &PixelBuffer, config: &ConversionConfig) -> Result<LedMatrix, ConvertError> {
    config.validate()?;
    buffer.validate()?;

    let threshold = config.brightness_threshold;
    let working = apply_contrast(buffer, config.contrast_enhanced);

    let bounds =
        detect_bounds(&working, threshold, config.invert).ok_or(ConvertError::NoForegroundFound)?;
    let grid = resample(&working, &bounds, config.led_rows)?;
    let (matrix, rows) = apply_threshold(&grid, threshold, config.invert, &config.matrix_chars);

    info!(
        source_width = buffer.width,
        source_height = buffer.height,
        rows = matrix.rows(),
        columns = matrix.columns(),
        "Converted text to LED matrix"
    );

    Ok(LedMatrix {
        matrix,
        rows,
        chars: config.matrix_chars,
        bounds,
    })
}

/// Validate a request, rasterize its text and convert the result.
///
/// Uses the fonts registered through [`register_fonts`](crate::raster::register_fonts).
/// Empty text fails with [`RasterizeError::EmptyText`] without calling the
/// rasterizer; whitespace-only text renders blank and ends as
/// [`ConvertError::NoForegroundFound`].
pub fn convert_text<R>(rasterizer: &R, request: &ConvertRequest) -> Result<LedMatrix, ConvertError>
where
    R: Rasterizer + ?Sized,
{
    let (config, style) = request.validate()?;
    if style.text.is_empty() {
        return Err(RasterizeError::EmptyText.into());
    }
    debug!(font = %style.css_font(), "Rasterizing text");
    let buffer = rasterizer.rasterize(&style, font_registry())?;
    convert(&buffer, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{CanvasLayout, FontRegistry};
    use crate::request::TextStyle;
    use crate::BrightnessThreshold;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn diagonal_buffer() -> PixelBuffer {
        let mut buffer = PixelBuffer::filled(2, 2, WHITE);
        buffer.put_pixel(0, 0, BLACK);
        buffer.put_pixel(1, 1, BLACK);
        buffer
    }

    fn config(led_rows: u32) -> ConversionConfig {
        ConversionConfig {
            led_rows,
            ..ConversionConfig::default()
        }
    }

    /// Draws a solid block of text colour for every character, or fails for
    /// families that are neither built in nor registered.
    struct BlockRasterizer;

    impl Rasterizer for BlockRasterizer {
        fn rasterize(
            &self,
            style: &TextStyle,
            fonts: &FontRegistry,
        ) -> Result<PixelBuffer, RasterizeError> {
            if style.font_family != "Arial" && !fonts.is_available(&style.font_family) {
                return Err(RasterizeError::FontUnavailable(style.font_family.clone()));
            }
            let glyph = style.font_size * 0.6;
            let text_width = glyph * style.text.chars().count() as f64;
            let layout = CanvasLayout::for_text(text_width, style.font_size, style.font_size);
            let mut buffer = layout.blank_buffer(style.background_color);
            let top = (style.font_size * 0.5) as u32;
            for y in top..top + style.font_size as u32 {
                for x in 20..20 + text_width as u32 {
                    buffer.put_pixel(x, y, style.text_color.0);
                }
            }
            Ok(buffer)
        }
    }

    #[test]
    fn test_diagonal_scenario() {
        let result = convert(&diagonal_buffer(), &config(2)).unwrap();
        assert_eq!(result.rows(), &["#.".to_string(), ".#".to_string()]);
        assert_eq!(result.text(), "#.\n.#");
        assert_eq!(
            result.dimensions(),
            Dimensions {
                rows: 2,
                columns: 2
            }
        );
        assert_eq!(
            result.format(OutputFormat::C).unwrap(),
            "const uint8_t PROGMEM matrix[2] = {\n  0b10,\n  0b01\n};"
        );
    }

    #[test]
    fn test_uniform_white_has_no_foreground() {
        let buffer = PixelBuffer::filled(10, 10, WHITE);
        let err = convert(&buffer, &ConversionConfig::default()).unwrap_err();
        assert_eq!(err, ConvertError::NoForegroundFound);
        assert_eq!(ErrorResponse::from(&err).error, "No text found in canvas.");
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let buffer = PixelBuffer::new(0, 0, vec![]);
        assert!(matches!(
            convert(&buffer, &ConversionConfig::default()),
            Err(ConvertError::InvalidBuffer {
                expected: 0,
                actual: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_buffer_rejected() {
        let buffer = PixelBuffer {
            width: 2,
            height: 2,
            pixels: vec![0; 12],
        };
        assert!(matches!(
            convert(&buffer, &ConversionConfig::default()),
            Err(ConvertError::InvalidBuffer {
                expected: 16,
                actual: 12,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_rows_rejected() {
        assert_eq!(
            convert(&diagonal_buffer(), &config(0)),
            Err(ConvertError::InvalidConfig(ConfigError::InvalidLedRows(0)))
        );
    }

    #[test]
    fn test_huge_row_count_rejected() {
        let mut buffer = PixelBuffer::filled(3, 3, WHITE);
        buffer.put_pixel(1, 1, BLACK);
        assert_eq!(
            convert(&buffer, &config(2_000_000_000)),
            Err(ConvertError::InvalidConfig(ConfigError::InvalidLedRows(
                2_000_000_000
            )))
        );

        let mut request = ConvertRequest::default();
        request.led_rows = 2_000_000_000;
        assert_eq!(
            convert_text(&BlockRasterizer, &request),
            Err(ConvertError::InvalidConfig(ConfigError::InvalidLedRows(
                2_000_000_000
            )))
        );
    }

    #[test]
    fn test_max_rows_on_wide_text_exceeds_grid() {
        // 5000x1 line at 256 rows: 1,536,000 columns
        let mut buffer = PixelBuffer::filled(5000, 3, WHITE);
        for x in 0..5000 {
            buffer.put_pixel(x, 1, BLACK);
        }
        let result = convert(&buffer, &config(crate::MAX_LED_ROWS));
        assert!(matches!(
            result,
            Err(ConvertError::GridTooLarge { rows: 256, .. })
        ));
    }

    #[test]
    fn test_max_rows_converts() {
        let result = convert(&diagonal_buffer(), &config(crate::MAX_LED_ROWS)).unwrap();
        assert_eq!(result.dimensions().rows, 256);
        assert_eq!(result.dimensions().columns, 307);
    }

    #[test]
    fn test_output_has_requested_rows() {
        let buffer = BlockRasterizer
            .rasterize(
                &ConvertRequest::default().text_style().unwrap(),
                &FontRegistry::new(),
            )
            .unwrap();
        for rows in [1, 7, 16, 24] {
            let result = convert(&buffer, &config(rows)).unwrap();
            assert_eq!(result.rows().len(), rows as usize);
            let columns = result.dimensions().columns as usize;
            assert!(result.rows().iter().all(|r| r.chars().count() == columns));
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let request = ConvertRequest::default();
        let a = convert_text(&BlockRasterizer, &request).unwrap();
        let b = convert_text(&BlockRasterizer, &request).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_response(), b.to_response());
    }

    #[test]
    fn test_input_buffer_not_modified() {
        let mut buffer = PixelBuffer::filled(4, 4, [200, 200, 200, 255]);
        buffer.put_pixel(1, 1, [140, 140, 140, 255]);
        let before = buffer.clone();
        let mut cfg = ConversionConfig::default();
        cfg.contrast_enhanced = true;
        convert(&buffer, &cfg).unwrap();
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_contrast_reveals_faint_text() {
        // 140 on 200: neither is below 255 - 128 until stretched
        let mut buffer = PixelBuffer::filled(6, 6, [200, 200, 200, 255]);
        for x in 1..5 {
            buffer.put_pixel(x, 2, [140, 140, 140, 255]);
            buffer.put_pixel(x, 3, [140, 140, 140, 255]);
        }

        let mut cfg = config(2);
        assert_eq!(convert(&buffer, &cfg), Err(ConvertError::NoForegroundFound));

        cfg.contrast_enhanced = true;
        let result = convert(&buffer, &cfg).unwrap();
        assert_eq!(
            result.bounds(),
            BoundingBox {
                min_x: 1,
                max_x: 4,
                min_y: 2,
                max_y: 3
            }
        );
        assert!(result.rows().iter().all(|r| r.chars().all(|c| c == '#')));
    }

    #[test]
    fn test_threshold_extremes() {
        let mut buffer = PixelBuffer::filled(3, 3, WHITE);
        buffer.put_pixel(1, 1, [10, 10, 10, 255]);

        // 255: nothing is below 0
        let mut cfg = config(1);
        cfg.brightness_threshold = BrightnessThreshold::new(255);
        assert_eq!(convert(&buffer, &cfg), Err(ConvertError::NoForegroundFound));

        // 0: everything but pure white is dark
        cfg.brightness_threshold = BrightnessThreshold::new(0);
        let result = convert(&buffer, &cfg).unwrap();
        assert_eq!(result.bounds(), BoundingBox::at(1, 1));

        // Inverted 0: every pixel counts as text
        cfg.invert = true;
        let result = convert(&buffer, &cfg).unwrap();
        assert_eq!(result.bounds().width(), 3);
        assert_eq!(result.bounds().height(), 3);
    }

    #[test]
    fn test_light_text_needs_invert() {
        let mut buffer = PixelBuffer::filled(4, 4, BLACK);
        buffer.put_pixel(2, 2, WHITE);

        let mut cfg = config(1);
        cfg.invert = true;
        let result = convert(&buffer, &cfg).unwrap();
        assert_eq!(result.bounds(), BoundingBox::at(2, 2));
        assert_eq!(result.text(), "#");
    }

    #[test]
    fn test_custom_chars() {
        let mut cfg = config(2);
        cfg.matrix_chars = MatrixChars::new('█', ' ');
        let result = convert(&diagonal_buffer(), &cfg).unwrap();
        assert_eq!(result.text(), "█ \n █");
        // Array literals do not depend on the characters
        assert!(result
            .format(OutputFormat::Python)
            .unwrap()
            .contains("0b10"));
    }

    #[test]
    fn test_wide_matrix_response() {
        // 4:1 crop at 16 rows gives round(16 * 4 * 1.2) = 77 columns
        let mut buffer = PixelBuffer::filled(40, 10, WHITE);
        buffer.put_pixel(0, 0, BLACK);
        buffer.put_pixel(39, 9, BLACK);
        let result = convert(&buffer, &config(16)).unwrap();
        assert_eq!(result.dimensions().columns, 77);

        assert_eq!(
            result.format(OutputFormat::Arduino),
            Err(ConvertError::UnsupportedWidth { columns: 77 })
        );
        assert!(result.format(OutputFormat::Text).is_ok());
        assert!(result.preview_png().is_ok());

        let response = result.to_response();
        assert_eq!(response.formats.c, None);
        assert_eq!(response.formats.text, result.text());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["formats"]["python"].is_null());
        assert_eq!(json["dimensions"]["columns"], 77);
    }

    #[test]
    fn test_response_json_shape() {
        let response = convert(&diagonal_buffer(), &config(2))
            .unwrap()
            .to_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["matrix"], serde_json::json!(["#.", ".#"]));
        assert_eq!(json["dimensions"]["rows"], 2);
        assert_eq!(json["formats"]["text"], "#.\n.#");
        assert_eq!(json["formats"]["python"], "matrix = [\n  0b10,\n  0b01\n]");
    }

    #[test]
    fn test_convert_text_with_rasterizer() {
        let mut request = ConvertRequest::default();
        request.text = "Hi".to_string();
        request.led_rows = 8;
        let result = convert_text(&BlockRasterizer, &request).unwrap();
        assert_eq!(result.dimensions().rows, 8);
        // Solid block: every cell is dark
        assert_eq!(
            result.matrix().dark_count(),
            result.dimensions().rows as usize * result.dimensions().columns as usize
        );
    }

    #[test]
    fn test_convert_text_rejects_invalid_request() {
        let mut request = ConvertRequest::default();
        request.brightness_threshold = 300;
        assert_eq!(
            convert_text(&BlockRasterizer, &request),
            Err(ConvertError::InvalidConfig(ConfigError::ThresholdOutOfRange(300)))
        );
    }

    #[test]
    fn test_convert_text_unknown_font() {
        let mut request = ConvertRequest::default();
        request.font_family = "Not A Font".to_string();
        let err = convert_text(&BlockRasterizer, &request).unwrap_err();
        assert_eq!(
            err,
            ConvertError::RasterizationFailure(RasterizeError::FontUnavailable(
                "Not A Font".to_string()
            ))
        );
        assert_eq!(err.to_string(), "Font not available: Not A Font");
    }

    #[test]
    fn test_convert_text_empty_text() {
        let mut request = ConvertRequest::default();
        request.text = String::new();
        let err = convert_text(&BlockRasterizer, &request).unwrap_err();
        assert_eq!(
            err,
            ConvertError::RasterizationFailure(RasterizeError::EmptyText)
        );
        assert_eq!(ErrorResponse::from(&err).error, "No text to render");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
