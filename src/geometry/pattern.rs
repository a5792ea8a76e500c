//! Neighborhood template matching
//!
//! A [`PatternTemplate`] is a small block of symbols anchored on a single
//! cursor cell. Matching lines the cursor up with a query cell and checks
//! every other symbol against the surrounding grid cells.

use super::grid::{Cell, PixelGrid};
use thiserror::Error;

/// One cell of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Filled,
    Empty,
    Wildcard,
    Cursor,
}

impl Symbol {
    /// Decode the compact template notation: `1`, `0`, `~` and `X`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Symbol::Filled),
            '0' => Some(Symbol::Empty),
            '~' => Some(Symbol::Wildcard),
            'X' => Some(Symbol::Cursor),
            _ => None,
        }
    }

    /// Special cells satisfy neither `Filled` nor `Empty`, only wildcards.
    fn accepts(self, cell: Cell) -> bool {
        match self {
            Symbol::Filled => cell == Cell::Filled,
            Symbol::Empty => cell == Cell::Empty,
            Symbol::Wildcard | Symbol::Cursor => true,
        }
    }
}

/// Template construction errors. These are programming errors in a pattern
/// table, never a property of glyph data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern `{name}` is empty")]
    Empty { name: String },
    #[error("pattern `{name}` has no cursor cell")]
    MissingCursor { name: String },
    #[error("pattern `{name}` has {count} cursor cells, expected exactly one")]
    MultipleCursors { name: String, count: usize },
    #[error("pattern `{name}` row {row} has {found} symbols, expected {expected}")]
    RaggedRow {
        name: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("pattern `{name}` contains unknown symbol {symbol:?}")]
    UnknownSymbol { name: String, symbol: char },
}

/// A validated template with exactly one cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTemplate {
    name: String,
    symbols: Vec<Symbol>,
    rows: usize,
    cols: usize,
    cursor_row: usize,
    cursor_col: usize,
}

impl PatternTemplate {
    /// Parse a template from rows in compact notation, e.g. `["X11", "010"]`
    pub fn parse(name: &str, rows: &[&str]) -> Result<Self, PatternError> {
        let symbols = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| {
                        Symbol::from_char(c).ok_or_else(|| PatternError::UnknownSymbol {
                            name: name.to_string(),
                            symbol: c,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_symbols(name, symbols)
    }

    /// Validate a block of symbols and locate its cursor
    pub fn from_symbols(name: &str, rows: Vec<Vec<Symbol>>) -> Result<Self, PatternError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(PatternError::Empty {
                name: name.to_string(),
            });
        }

        let row_count = rows.len();
        let mut symbols = Vec::with_capacity(row_count * cols);
        for (row, row_symbols) in rows.into_iter().enumerate() {
            if row_symbols.len() != cols {
                return Err(PatternError::RaggedRow {
                    name: name.to_string(),
                    row,
                    expected: cols,
                    found: row_symbols.len(),
                });
            }
            symbols.extend(row_symbols);
        }

        let cursors: Vec<usize> = symbols
            .iter()
            .enumerate()
            .filter(|(_, symbol)| **symbol == Symbol::Cursor)
            .map(|(index, _)| index)
            .collect();
        let cursor = match cursors.as_slice() {
            [] => {
                return Err(PatternError::MissingCursor {
                    name: name.to_string(),
                })
            }
            [single] => *single,
            many => {
                return Err(PatternError::MultipleCursors {
                    name: name.to_string(),
                    count: many.len(),
                })
            }
        };

        Ok(Self {
            name: name.to_string(),
            symbols,
            rows: row_count,
            cols,
            cursor_row: cursor / cols,
            cursor_col: cursor % cols,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cursor position as (row, column) inside the template
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn symbol(&self, row: usize, col: usize) -> Symbol {
        self.symbols[row * self.cols + col]
    }

    /// Left/right mirror image, used for bottom-left diagonals
    pub fn mirrored(&self) -> Self {
        let mut symbols = Vec::with_capacity(self.symbols.len());
        for row in self.symbols.chunks(self.cols) {
            symbols.extend(row.iter().rev());
        }
        Self {
            name: self.name.clone(),
            symbols,
            rows: self.rows,
            cols: self.cols,
            cursor_row: self.cursor_row,
            cursor_col: self.cols - 1 - self.cursor_col,
        }
    }

    /// Does the template match the grid with its cursor on (row, col)?
    pub fn matches(&self, grid: &PixelGrid, row: usize, col: usize) -> bool {
        let origin_row = row as isize - self.cursor_row as isize;
        let origin_col = col as isize - self.cursor_col as isize;
        for r in 0..self.rows {
            for c in 0..self.cols {
                if (r, c) == (self.cursor_row, self.cursor_col) {
                    continue;
                }
                let cell = grid.get(origin_row + r as isize, origin_col + c as isize);
                if !self.symbol(r, c).accepts(cell) {
                    return false;
                }
            }
        }
        true
    }
}

/// Declarative table entry for a named template
#[derive(Debug, Clone, Copy)]
pub struct PatternEntry {
    pub name: &'static str,
    pub rows: &'static [&'static str],
    /// Mirror the template when testing the bottom-left diagonal
    pub mirror_for_left: bool,
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    template: PatternTemplate,
    mirrored: Option<PatternTemplate>,
}

/// An ordered list of compiled templates. Lookups are first-match-wins.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Compile a table, failing on the first malformed entry
    pub fn compile(entries: &[PatternEntry]) -> Result<Self, PatternError> {
        let patterns = entries
            .iter()
            .map(|entry| {
                let template = PatternTemplate::parse(entry.name, entry.rows)?;
                let mirrored = entry.mirror_for_left.then(|| template.mirrored());
                Ok(CompiledPattern { template, mirrored })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First template matching at (row, col). With `mirror` set, entries
    /// flagged for mirroring are tested in their mirrored form.
    pub fn first_match(
        &self,
        grid: &PixelGrid,
        row: usize,
        col: usize,
        mirror: bool,
    ) -> Option<&PatternTemplate> {
        self.patterns.iter().find_map(|pattern| {
            let template = match (&pattern.mirrored, mirror) {
                (Some(mirrored), true) => mirrored,
                _ => &pattern.template,
            };
            template.matches(grid, row, col).then_some(template)
        })
    }
}
