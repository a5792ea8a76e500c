//! Pixel grids and lattice points
//!
//! A glyph is described as rows of cells, top row first. Strokes are drawn
//! between the centers of filled cells, so every filled cell is also a
//! [`GridPoint`] on the stroke lattice.

use thiserror::Error;

/// State of a single cell in a [`PixelGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
    /// Decorative marker drawn as a heart, never connected by strokes
    Special,
}

impl Cell {
    /// Decode the numeric cell values used by definition files (0, 1, 2)
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Filled),
            2 => Some(Cell::Special),
            _ => None,
        }
    }

    pub fn to_value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled => 1,
            Cell::Special => 2,
        }
    }

    pub fn is_filled(self) -> bool {
        self == Cell::Filled
    }
}

/// Errors raised while building a [`PixelGrid`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unsupported cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: u8 },
}

/// A rectangular grid of cells, indexed by (row, column) with row 0 on top
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelGrid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl PixelGrid {
    /// Build a grid from rows of cells. All rows must have the same length.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * cols);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
        }
        Ok(Self {
            cells,
            rows: row_count,
            cols,
        })
    }

    /// Build a grid from the numeric rows found in definition files
    pub fn from_values(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let decoded = rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(|(col, &value)| {
                        Cell::from_value(value).ok_or(GridError::InvalidCell { row, col, value })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(decoded)
    }

    /// Build a grid from digit strings such as `"0110"`
    pub fn parse(rows: &[&str]) -> Result<Self, GridError> {
        let values: Vec<Vec<u8>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| c.to_digit(10).map_or(u8::MAX, |d| d as u8))
                    .collect()
            })
            .collect();
        Self::from_values(&values)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a signed position; anything outside the grid reads as empty
    pub fn get(&self, row: isize, col: isize) -> Cell {
        if row < 0 || col < 0 {
            return Cell::Empty;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return Cell::Empty;
        }
        self.cells[row * self.cols + col]
    }

    pub fn is_filled(&self, row: isize, col: isize) -> bool {
        self.get(row, col).is_filled()
    }

    /// Number of filled cells among the eight neighbors of a cell
    pub fn filled_neighbors(&self, row: usize, col: usize) -> usize {
        let (row, col) = (row as isize, col as isize);
        let mut count = 0;
        for dr in -1..=1 {
            for dc in -1..=1 {
                if (dr, dc) != (0, 0) && self.is_filled(row + dr, col + dc) {
                    count += 1;
                }
            }
        }
        count
    }

    /// All cells in row-major order with their position
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &cell)| (index / self.cols, index % self.cols, cell))
    }

    /// Index of the top-most row holding any non-empty cell
    pub fn highest_marked_row(&self) -> Option<usize> {
        (0..self.rows).find(|&row| {
            (0..self.cols).any(|col| self.cells[row * self.cols + col] != Cell::Empty)
        })
    }

    /// Numeric rows, the inverse of [`PixelGrid::from_values`]
    #[cfg(test)]
    pub fn to_values(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|cell| cell.to_value()).collect())
            .collect()
    }
}

/// A lattice point at the center of a cell, stored as (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub col: usize,
    pub row: usize,
}

impl GridPoint {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}
