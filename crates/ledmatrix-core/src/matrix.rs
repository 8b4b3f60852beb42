//! Binary LED grid.

use serde::{Deserialize, Serialize};

use crate::MatrixChars;

/// Row and column count of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: u32,
    pub columns: u32,
}

/// A rows × columns grid of dark (`true`) and light (`false`) cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryMatrix {
    rows: u32,
    columns: u32,
    cells: Vec<bool>,
}

impl BinaryMatrix {
    /// Create a matrix from row-major cells.
    ///
    /// Returns `None` if `cells.len() != rows * columns`.
    pub fn new(rows: u32, columns: u32, cells: Vec<bool>) -> Option<Self> {
        if cells.len() != rows as usize * columns as usize {
            return None;
        }
        Some(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Create a matrix whose cell count is already known to match.
    pub(crate) fn from_parts(rows: u32, columns: u32, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows as usize * columns as usize);
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Create a matrix from nested rows.
    ///
    /// Returns `None` if the rows differ in length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != columns) {
            return None;
        }
        let cells = rows.iter().flatten().copied().collect();
        Self::new(rows.len() as u32, columns as u32, cells)
    }

    /// Parse rows of `dark`/`light` characters.
    ///
    /// Any character other than `chars.dark` counts as light.
    pub fn from_text_rows<S: AsRef<str>>(rows: &[S], chars: &MatrixChars) -> Option<Self> {
        let parsed: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.as_ref().chars().map(|c| c == chars.dark).collect())
            .collect();
        Self::from_rows(&parsed)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Whether the cell at (x, y) is dark.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[y as usize * self.columns as usize + x as usize]
    }

    /// Cells of row `y`.
    pub fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.columns as usize;
        &self.cells[start..start + self.columns as usize]
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        (0..self.rows).map(move |y| self.row(y))
    }

    /// Number of dark cells.
    pub fn dark_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Matrix with every cell flipped.
    pub fn complement(&self) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.iter().map(|c| !c).collect(),
        }
    }

    /// One string per row, `chars.dark` for dark cells and `chars.light`
    /// otherwise.
    pub fn to_char_rows(&self, chars: &MatrixChars) -> Vec<String> {
        self.iter_rows()
            .map(|row| row.iter().map(|&dark| chars.for_cell(dark)).collect())
            .collect()
    }
}
