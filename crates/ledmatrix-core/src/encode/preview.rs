//! PNG preview of an LED matrix.
//!
//! Each LED is drawn as a 9×9 square inside a 10×10 cell, leaving a 1 px
//! transparent gap to the right and below. Lit LEDs are bright red, unlit
//! LEDs dark red.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use tracing::debug;

use super::EncodeError;
use crate::matrix::BinaryMatrix;

/// Size of one LED cell in the preview, in pixels.
pub const PREVIEW_CELL_SIZE: u32 = 10;

/// Colour of a lit LED (`#FF0000`).
pub const LED_ON: Rgba<u8> = Rgba([0xFF, 0x00, 0x00, 0xFF]);

/// Colour of an unlit LED (`#330000`).
pub const LED_OFF: Rgba<u8> = Rgba([0x33, 0x00, 0x00, 0xFF]);

/// Largest preview image, in pixels.
pub const MAX_PREVIEW_PIXELS: u64 = 1 << 24;

/// Pixel size of the preview for `matrix`.
///
/// # Errors
///
/// Returns [`EncodeError::PreviewTooLarge`] if the image would exceed
/// [`MAX_PREVIEW_PIXELS`].
pub fn preview_dimensions(matrix: &BinaryMatrix) -> Result<(u32, u32), EncodeError> {
    let too_large = || EncodeError::PreviewTooLarge {
        columns: matrix.columns(),
        rows: matrix.rows(),
    };
    let width = matrix
        .columns()
        .checked_mul(PREVIEW_CELL_SIZE)
        .ok_or_else(too_large)?;
    let height = matrix
        .rows()
        .checked_mul(PREVIEW_CELL_SIZE)
        .ok_or_else(too_large)?;
    if width as u64 * height as u64 > MAX_PREVIEW_PIXELS {
        return Err(too_large());
    }
    Ok((width, height))
}

/// Render `matrix` as an RGBA image, `PREVIEW_CELL_SIZE` pixels per LED.
pub fn render_preview(matrix: &BinaryMatrix) -> Result<RgbaImage, EncodeError> {
    let (width, height) = preview_dimensions(matrix)?;
    let led = PREVIEW_CELL_SIZE - 1;
    let mut img = RgbaImage::new(width, height);

    for (y, row) in matrix.iter_rows().enumerate() {
        for (x, &lit) in row.iter().enumerate() {
            let color = if lit { LED_ON } else { LED_OFF };
            let left = x as u32 * PREVIEW_CELL_SIZE;
            let top = y as u32 * PREVIEW_CELL_SIZE;
            for py in top..top + led {
                for px in left..left + led {
                    img.put_pixel(px, py, color);
                }
            }
        }
    }

    Ok(img)
}

/// Render the preview and encode it as PNG bytes.
///
/// # Errors
///
/// Returns [`EncodeError::EmptyMatrix`] for a matrix without cells,
/// [`EncodeError::PreviewTooLarge`] past the pixel budget, or
/// [`EncodeError::EncodingFailed`] if the PNG encoder fails.
pub fn encode_preview_png(matrix: &BinaryMatrix) -> Result<Vec<u8>, EncodeError> {
    if matrix.rows() == 0 || matrix.columns() == 0 {
        return Err(EncodeError::EmptyMatrix);
    }

    let img = render_preview(matrix)?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Encoding matrix preview"
    );

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn diagonal() -> BinaryMatrix {
        BinaryMatrix::from_rows(&[vec![true, false], vec![false, true]]).unwrap()
    }

    #[test]
    fn test_preview_dimensions() {
        let m = BinaryMatrix::from_rows(&[vec![true, false, true]]).unwrap();
        let img = render_preview(&m).unwrap();
        assert_eq!(img.dimensions(), (30, 10));
    }

    #[test]
    fn test_preview_colors() {
        let img = render_preview(&diagonal()).unwrap();
        assert_eq!(*img.get_pixel(0, 0), LED_ON);
        assert_eq!(*img.get_pixel(8, 8), LED_ON);
        assert_eq!(*img.get_pixel(10, 0), LED_OFF);
        assert_eq!(*img.get_pixel(15, 15), LED_ON);
    }

    #[test]
    fn test_preview_gap_is_transparent() {
        let img = render_preview(&diagonal()).unwrap();
        assert_eq!(img.get_pixel(9, 0)[3], 0);
        assert_eq!(img.get_pixel(0, 9)[3], 0);
        assert_eq!(img.get_pixel(19, 19)[3], 0);
    }

    #[test]
    fn test_encode_png_magic() {
        let png = encode_preview_png(&diagonal()).unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_png_decodes_back() {
        let png = encode_preview_png(&diagonal()).unwrap();
        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded, render_preview(&diagonal()).unwrap());
    }

    #[test]
    fn test_preview_too_large() {
        // 2^29 columns: width overflows u32 after scaling
        let wide = BinaryMatrix::new(0, 1 << 29, vec![]).unwrap();
        assert_eq!(
            preview_dimensions(&wide),
            Err(EncodeError::PreviewTooLarge {
                columns: 1 << 29,
                rows: 0
            })
        );

        // Fits in u32 but over the pixel budget
        let big = BinaryMatrix::new(500, 500, vec![true; 250_000]).unwrap();
        assert!(matches!(
            encode_preview_png(&big),
            Err(EncodeError::PreviewTooLarge { .. })
        ));
    }

    #[test]
    fn test_encode_empty_matrix() {
        let m = BinaryMatrix::new(0, 0, vec![]).unwrap();
        assert_eq!(encode_preview_png(&m), Err(EncodeError::EmptyMatrix));
    }
}
