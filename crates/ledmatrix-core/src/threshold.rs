//! Thresholding of resampled brightness into dark/light cells.
//!
//! Uses the same rule as bounds detection, so a cell is dark exactly when
//! the source pixel it samples would have been counted as text.

use tracing::debug;

use crate::matrix::BinaryMatrix;
use crate::transform::BrightnessGrid;
use crate::{BrightnessThreshold, MatrixChars};

/// Convert a brightness grid into a binary matrix (dark = `true`).
pub fn threshold_grid(
    grid: &BrightnessGrid,
    threshold: BrightnessThreshold,
    invert: bool,
) -> BinaryMatrix {
    let cells = grid
        .cells
        .iter()
        .map(|b| b.is_dark(threshold, invert))
        .collect();
    BinaryMatrix::from_parts(grid.height, grid.width, cells)
}

/// Threshold a grid and render its character rows in one step.
///
/// Each row string has exactly `grid.width` characters.
pub fn apply_threshold(
    grid: &BrightnessGrid,
    threshold: BrightnessThreshold,
    invert: bool,
    chars: &MatrixChars,
) -> (BinaryMatrix, Vec<String>) {
    let matrix = threshold_grid(grid, threshold, invert);
    let rows = matrix.to_char_rows(chars);
    debug!(
        rows = matrix.rows(),
        columns = matrix.columns(),
        dark = matrix.dark_count(),
        "Thresholded LED grid"
    );
    (matrix, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brightness::Brightness;

    fn grid(width: u32, height: u32, values: &[u8]) -> BrightnessGrid {
        BrightnessGrid {
            width,
            height,
            cells: values.iter().map(|&v| Brightness::from_rgb(v, v, v)).collect(),
        }
    }

    #[test]
    fn test_checkerboard() {
        let g = grid(2, 2, &[0, 255, 255, 0]);
        let (matrix, rows) = apply_threshold(
            &g,
            BrightnessThreshold::default(),
            false,
            &MatrixChars::default(),
        );
        assert_eq!(rows, vec!["#.", ".#"]);
        assert!(matrix.get(0, 0));
        assert!(!matrix.get(1, 0));
    }

    #[test]
    fn test_invert_flips_pure_cells() {
        let g = grid(3, 1, &[0, 255, 0]);
        let normal = threshold_grid(&g, BrightnessThreshold::default(), false);
        let inverted = threshold_grid(&g, BrightnessThreshold::default(), true);
        assert_eq!(inverted, normal.complement());
    }

    #[test]
    fn test_custom_chars_and_width() {
        let g = grid(4, 2, &[10, 200, 10, 200, 200, 200, 200, 10]);
        let (_, rows) = apply_threshold(
            &g,
            BrightnessThreshold::default(),
            false,
            &MatrixChars::new('O', '-'),
        );
        assert_eq!(rows, vec!["O-O-", "---O"]);
        assert!(rows.iter().all(|r| r.chars().count() == 4));
    }

    #[test]
    fn test_threshold_boundaries() {
        let g = grid(3, 1, &[0, 127, 254]);
        // threshold 0: everything below 255 is dark
        let m = threshold_grid(&g, BrightnessThreshold::new(0), false);
        assert_eq!(m.row(0), &[true, true, true]);
        // threshold 255: nothing is below 0
        let m = threshold_grid(&g, BrightnessThreshold::new(255), false);
        assert_eq!(m.row(0), &[false, false, false]);
        // inverted threshold 0: all dark
        let m = threshold_grid(&g, BrightnessThreshold::new(0), true);
        assert_eq!(m.row(0), &[true, true, true]);
        // inverted threshold 255: only 255 is dark
        let m = threshold_grid(&g, BrightnessThreshold::new(255), true);
        assert_eq!(m.row(0), &[false, false, false]);
    }
}
