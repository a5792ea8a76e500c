//! Stroke edge extraction
//!
//! Every pair of adjacent filled cells is a candidate stroke. Straight
//! candidates can be suppressed by letterform templates; diagonal candidates
//! go through an include list that overrides an exclude list.

use super::grid::{GridPoint, PixelGrid};
use super::pattern::{PatternError, PatternSet};
use super::pattern_tables::{DIAGONAL_EXCLUDE, DIAGONAL_INCLUDE, SUPPRESS_DOWN, SUPPRESS_RIGHT};

/// Direction class of an edge, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Horizontal,
    Vertical,
    /// From a cell to its bottom-right neighbor
    DiagonalDescending,
    /// From a cell to its bottom-left neighbor
    DiagonalAscending,
}

/// A stroke between two adjacent lattice points. `start` is always the
/// upper (or, for horizontal edges, left) end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub start: GridPoint,
    pub end: GridPoint,
    pub kind: EdgeKind,
}

impl Edge {
    fn right(col: usize, row: usize) -> Self {
        Self {
            start: GridPoint::new(col, row),
            end: GridPoint::new(col + 1, row),
            kind: EdgeKind::Horizontal,
        }
    }

    fn down(col: usize, row: usize) -> Self {
        Self {
            start: GridPoint::new(col, row),
            end: GridPoint::new(col, row + 1),
            kind: EdgeKind::Vertical,
        }
    }

    fn down_right(col: usize, row: usize) -> Self {
        Self {
            start: GridPoint::new(col, row),
            end: GridPoint::new(col + 1, row + 1),
            kind: EdgeKind::DiagonalDescending,
        }
    }

    fn down_left(col: usize, row: usize) -> Self {
        Self {
            start: GridPoint::new(col, row),
            end: GridPoint::new(col - 1, row + 1),
            kind: EdgeKind::DiagonalAscending,
        }
    }

    pub fn points(&self) -> [GridPoint; 2] {
        [self.start, self.end]
    }

    pub fn is_diagonal(&self) -> bool {
        matches!(
            self.kind,
            EdgeKind::DiagonalDescending | EdgeKind::DiagonalAscending
        )
    }
}

/// Compiled template lists that decide which candidate edges are drawn
#[derive(Debug, Clone, Default)]
pub struct EdgeRules {
    pub suppress_right: PatternSet,
    pub suppress_down: PatternSet,
    pub diagonal_include: PatternSet,
    pub diagonal_exclude: PatternSet,
}

impl EdgeRules {
    /// The built-in letterform tables
    pub fn builtin() -> Result<Self, PatternError> {
        Ok(Self {
            suppress_right: PatternSet::compile(SUPPRESS_RIGHT)?,
            suppress_down: PatternSet::compile(SUPPRESS_DOWN)?,
            diagonal_include: PatternSet::compile(DIAGONAL_INCLUDE)?,
            diagonal_exclude: PatternSet::compile(DIAGONAL_EXCLUDE)?,
        })
    }

    /// Rules that never suppress anything
    pub fn permissive() -> Self {
        Self::default()
    }

    fn keep_diagonal(&self, grid: &PixelGrid, row: usize, col: usize, left: bool) -> bool {
        if let Some(template) = self.diagonal_include.first_match(grid, row, col, left) {
            tracing::trace!("diagonal at ({row}, {col}) forced by `{}`", template.name());
            return true;
        }
        if let Some(template) = self.diagonal_exclude.first_match(grid, row, col, left) {
            tracing::trace!("diagonal at ({row}, {col}) dropped by `{}`", template.name());
            return false;
        }
        true
    }

    /// Extract the ordered edge list of a grid.
    ///
    /// Cells are visited row by row; each contributes its right, down,
    /// bottom-right and bottom-left edges in that order. Straight edges are
    /// only suppressed when diagonals are enabled, since the suppression
    /// templates assume the diagonal strokes are present.
    pub fn extract(&self, grid: &PixelGrid, diagonals: bool) -> Vec<Edge> {
        let mut edges = Vec::new();
        let (rows, cols) = (grid.rows(), grid.cols());

        for row in 0..rows {
            for col in 0..cols {
                if !grid.is_filled(row as isize, col as isize) {
                    continue;
                }
                let (r, c) = (row as isize, col as isize);

                let suppressed = |patterns: &PatternSet| {
                    diagonals && patterns.first_match(grid, row, col, false).is_some()
                };

                if col + 1 < cols && grid.is_filled(r, c + 1) && !suppressed(&self.suppress_right) {
                    edges.push(Edge::right(col, row));
                }

                if row + 1 < rows && grid.is_filled(r + 1, c) && !suppressed(&self.suppress_down) {
                    edges.push(Edge::down(col, row));
                }

                if !diagonals || row + 1 >= rows {
                    continue;
                }

                if col + 1 < cols
                    && grid.is_filled(r + 1, c + 1)
                    && self.keep_diagonal(grid, row, col, false)
                {
                    edges.push(Edge::down_right(col, row));
                }

                if col > 0
                    && grid.is_filled(r + 1, c - 1)
                    && self.keep_diagonal(grid, row, col, true)
                {
                    edges.push(Edge::down_left(col, row));
                }
            }
        }

        edges
    }
}
