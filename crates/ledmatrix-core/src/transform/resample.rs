//! Nearest-neighbor resampling of the text region.

use tracing::debug;

use crate::brightness::Brightness;
use crate::pipeline::ConvertError;
use crate::pixel::{BoundingBox, PixelBuffer};

/// Fixed widening factor applied to the derived column count.
pub const LED_ASPECT_MULTIPLIER: f64 = 1.2;

/// Largest grid (columns × rows) a resample may produce.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Per-cell brightness values of the resampled grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessGrid {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Row-major brightness values, `width * height` entries.
    pub cells: Vec<Brightness>,
}

impl BrightnessGrid {
    /// Brightness of the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Brightness {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Brightness]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }
}

/// Number of grid columns for a crop of `bounds` scaled to `led_rows` rows.
///
/// # Example
///
/// ```
/// use ledmatrix_core::{target_width, BoundingBox};
///
/// // Square crop, 2 rows: round(2 * 1.0 * 1.2) = 2
/// let bounds = BoundingBox { min_x: 0, max_x: 1, min_y: 0, max_y: 1 };
/// assert_eq!(target_width(2, &bounds), 2);
/// ```
pub fn target_width(led_rows: u32, bounds: &BoundingBox) -> u32 {
    let aspect_ratio = bounds.aspect_ratio();
    let width = (led_rows as f64 * aspect_ratio * LED_ASPECT_MULTIPLIER).round();
    (width as u32).max(1)
}

/// Resample the region of `buffer` inside `bounds` to `led_rows` rows.
///
/// # Errors
///
/// Returns [`ConvertError::DegenerateCrop`] if the box has zero extent or
/// does not lie inside the buffer. Boxes produced by
/// [`detect_bounds`](crate::bounds::detect_bounds) never do.
///
/// Returns [`ConvertError::GridTooLarge`] if the grid would exceed
/// [`MAX_GRID_CELLS`] cells.
pub fn resample(
    buffer: &PixelBuffer,
    bounds: &BoundingBox,
    led_rows: u32,
) -> Result<BrightnessGrid, ConvertError> {
    let crop_width = bounds.width();
    let crop_height = bounds.height();
    if crop_width == 0
        || crop_height == 0
        || bounds.max_x >= buffer.width
        || bounds.max_y >= buffer.height
    {
        return Err(ConvertError::DegenerateCrop {
            width: crop_width,
            height: crop_height,
        });
    }

    let width = target_width(led_rows, bounds);
    if width as u64 * led_rows as u64 > MAX_GRID_CELLS {
        return Err(ConvertError::GridTooLarge {
            columns: width,
            rows: led_rows,
        });
    }
    debug!(
        crop_width,
        crop_height,
        columns = width,
        rows = led_rows,
        "Resampling text region"
    );

    // Source columns are the same for every row
    let source_xs: Vec<u32> = (0..width)
        .map(|x| scale_index(x, crop_width, width) + bounds.min_x)
        .collect();

    let mut cells = Vec::with_capacity(width as usize * led_rows as usize);
    for y in 0..led_rows {
        let source_y = scale_index(y, crop_height, led_rows) + bounds.min_y;
        cells.extend(
            source_xs
                .iter()
                .map(|&source_x| buffer.brightness_at(source_x, source_y)),
        );
    }

    Ok(BrightnessGrid {
        width,
        height: led_rows,
        cells,
    })
}

/// `floor(index * source_len / target_len)` in exact integer arithmetic.
#[inline]
fn scale_index(index: u32, source_len: u32, target_len: u32) -> u32 {
    (index as u64 * source_len as u64 / target_len as u64) as u32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
