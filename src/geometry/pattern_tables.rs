//! Hand-tuned letterform templates consulted by the edge extractor
//!
//! Notation: `1` filled, `0` empty, `~` anything, `X` the cell whose edge
//! is being decided. Order matters: lookups stop at the first match.

use super::pattern::PatternEntry;

const fn entry(name: &'static str, rows: &'static [&'static str]) -> PatternEntry {
    PatternEntry {
        name,
        rows,
        mirror_for_left: false,
    }
}

const fn mirrored(name: &'static str, rows: &'static [&'static str]) -> PatternEntry {
    PatternEntry {
        name,
        rows,
        mirror_for_left: true,
    }
}

/// Shapes where a horizontal connector to the right neighbor is dropped
pub const SUPPRESS_RIGHT: &[PatternEntry] = &[
    entry("W left", &["101", "X10", "10~"]),
    entry("W right", &["101", "0X1", "001"]),
    entry("zero", &["001", "0X1", "101"]),
    entry("M", &["100", "X10", "101"]),
    entry("one", &["000", "010", "X10", "010", "010"]),
];

/// Shapes where a vertical connector to the cell below is dropped
pub const SUPPRESS_DOWN: &[PatternEntry] = &[
    entry("z top", &["1X1", "010", "100"]),
    entry("z bottom", &["0010", "0X00", "111~"]),
    entry("right arrow", &["100", "0X0", "111", "010", "100"]),
    entry("left arrow", &["001", "0X0", "111", "010", "001"]),
];

/// Diagonals that are always drawn, even when an exclude entry matches
pub const DIAGONAL_INCLUDE: &[PatternEntry] = &[
    mirrored("z", &["X11", "010", "001"]),
    mirrored("up arrow", &["00X00", "01110", "10101"]),
    mirrored("right arrow", &["100", "0X0", "111", "010", "100"]),
    mirrored("down arrow", &["10101", "0X110", "00100"]),
];

/// Diagonals that would read as pixel staircases in these shapes
pub const DIAGONAL_EXCLUDE: &[PatternEntry] = &[
    mirrored("hook", &["000", "X10", "010"]),
    mirrored("H left", &["X00", "111", "100"]),
    mirrored("H right and hash", &["~01", "1X1", "~01"]),
    mirrored("f", &["0X0", "111", "010"]),
    mirrored("z top", &["X11", "010", "100"]),
    mirrored("z bottom", &["001", "0X0", "111"]),
    mirrored("k and h", &["X01", "11~", "1~~"]),
    mirrored("l", &["000", "0X1", "001", "001"]),
    mirrored("u and w", &["010", "0X0", "~11"]),
    mirrored("zero", &["001", "~X1", "~01"]),
    mirrored("F, E and P", &["1X1", "001", "~~1"]),
    mirrored("five", &["11", "X0", "11"]),
    mirrored("Z", &["0010", "0X00", "0111"]),
    mirrored("dollar top", &["000", "0X0", "111"]),
    mirrored("dollar bottom", &["X11", "010", "000"]),
    mirrored("e", &["011", "X00", "111"]),
    mirrored("two", &["000", "0X0", "011", "000"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::pattern::PatternSet;

    #[test]
    fn every_builtin_table_compiles() {
        for table in [
            SUPPRESS_RIGHT,
            SUPPRESS_DOWN,
            DIAGONAL_INCLUDE,
            DIAGONAL_EXCLUDE,
        ] {
            let set = PatternSet::compile(table).unwrap();
            assert_eq!(set.len(), table.len());
        }
    }
}
