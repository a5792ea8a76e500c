//! Accented character composition
//!
//! Runs once before the character table is built. Every character naming a
//! diacritic gets its own merged grid so the glyph builders never see the
//! accent as a separate piece. A character that cannot be composed is left
//! out of the table and reported on its own.

use super::definitions::{CharacterDef, DiacriticDef, Pixels};
use crate::geometry::{Cell, GridError, PixelGrid};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    #[error("character `{character}` uses unknown diacritic `{diacritic}`")]
    UnknownDiacritic { character: String, diacritic: String },
    #[error("character `{character}` has an invalid grid")]
    Grid {
        character: String,
        #[source]
        source: GridError,
    },
}

impl CompositionError {
    pub fn character(&self) -> &str {
        match self {
            Self::UnknownDiacritic { character, .. } | Self::Grid { character, .. } => character,
        }
    }
}

/// Characters after composition, with the ones that failed set aside
#[derive(Debug, Default)]
pub struct Composed {
    pub characters: Vec<CharacterDef>,
    pub rejected: Vec<CompositionError>,
}

/// Merge diacritics into the characters that name one
pub fn compose_diacritics(
    characters: Vec<CharacterDef>,
    diacritics: &BTreeMap<String, DiacriticDef>,
) -> Composed {
    let bases: HashMap<u32, CharacterDef> = characters
        .iter()
        .filter(|character| character.diacritic.is_none())
        .filter_map(|character| Some((character.codepoint?, character.clone())))
        .collect();

    let mut composed = Composed::default();
    for character in characters {
        let result = match character.diacritic.clone() {
            Some(name) => match diacritics.get(&name) {
                Some(accent) => compose(character, accent, &bases),
                None => Err(CompositionError::UnknownDiacritic {
                    character: character.name.clone(),
                    diacritic: name,
                }),
            },
            None => Ok(character),
        };
        match result {
            Ok(character) => composed.characters.push(character),
            Err(error) => {
                tracing::warn!("Skipping {error}");
                composed.rejected.push(error);
            }
        }
    }
    composed
}

fn compose(
    mut character: CharacterDef,
    accent: &DiacriticDef,
    bases: &HashMap<u32, CharacterDef>,
) -> Result<CharacterDef, CompositionError> {
    let referenced = character.reference.and_then(|codepoint| bases.get(&codepoint));
    if character.reference.is_some() && referenced.is_none() {
        tracing::warn!(
            "`{}` references a missing character, composing its diacritic alone",
            character.name
        );
    }

    let base_pixels = character
        .pixels
        .clone()
        .or_else(|| referenced.and_then(|base| base.pixels.clone()))
        .unwrap_or_default();
    let grid_error = |source| CompositionError::Grid {
        character: character.name.clone(),
        source,
    };
    let base = PixelGrid::from_values(&base_pixels).map_err(grid_error)?;
    let mark = PixelGrid::from_values(&accent.pixels).map_err(grid_error)?;

    let pixels = stack(&base, &mark, character.diacritic_space.unwrap_or(0));

    if let Some(base) = referenced {
        character.diagonals = character.diagonals.or(base.diagonals);
        character.descent = character.descent.or(base.descent);
        character.left_margin = character.left_margin.or(base.left_margin);
    }
    character.pixels = Some(pixels);
    character.reference = None;
    character.diacritic = None;
    character.diacritic_space = None;
    Ok(character)
}

/// Place `mark` above the highest marked row of `base`, `space` rows apart
fn stack(base: &PixelGrid, mark: &PixelGrid, space: usize) -> Pixels {
    let width = base.cols().max(mark.cols());
    // Rows of `base` above the mark's bottom edge
    let anchor = match base.highest_marked_row() {
        Some(row) => row,
        None => base.rows().saturating_sub(1),
    };
    let needed = mark.rows() + space;
    let padding = needed.saturating_sub(anchor);
    let mark_top = (anchor + padding) - needed;

    let mut rows = vec![vec![Cell::Empty.to_value(); width]; base.rows() + padding];
    for (row, col, cell) in base.cells() {
        rows[row + padding][col] = cell.to_value();
    }
    for (row, col, cell) in mark.cells() {
        if cell != Cell::Empty {
            rows[mark_top + row][col] = cell.to_value();
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accents() -> BTreeMap<String, DiacriticDef> {
        let mut accents = BTreeMap::new();
        accents.insert(
            "dot".to_string(),
            DiacriticDef {
                pixels: vec![vec![1]],
            },
        );
        accents.insert(
            "acute".to_string(),
            DiacriticDef {
                pixels: vec![vec![0, 0, 1], vec![0, 1, 0]],
            },
        );
        accents
    }

    fn base(pixels: Pixels) -> CharacterDef {
        CharacterDef {
            codepoint: Some(105),
            name: "dotlessi".to_string(),
            pixels: Some(pixels),
            descent: Some(1.0),
            ..CharacterDef::default()
        }
    }

    #[test]
    fn accent_sits_above_the_highest_row_with_room_to_spare() {
        let base = base(vec![vec![0, 0], vec![0, 0], vec![1, 0], vec![1, 0]]);
        let composed = stack(
            &PixelGrid::from_values(base.pixels.as_ref().unwrap()).unwrap(),
            &PixelGrid::from_values(&[vec![1]]).unwrap(),
            0,
        );
        assert_eq!(composed, vec![vec![0, 0], vec![1, 0], vec![1, 0], vec![1, 0]]);
    }

    #[test]
    fn spacing_and_missing_headroom_add_rows_on_top() {
        let composed = stack(
            &PixelGrid::from_values(&[vec![1, 1]]).unwrap(),
            &PixelGrid::from_values(&[vec![0, 0, 1], vec![0, 1, 0]]).unwrap(),
            1,
        );
        assert_eq!(
            composed,
            vec![
                vec![0, 0, 1],
                vec![0, 1, 0],
                vec![0, 0, 0],
                vec![1, 1, 0],
            ]
        );
    }

    #[test]
    fn references_supply_pixels_and_layout() {
        let characters = vec![
            base(vec![vec![1]]),
            CharacterDef {
                codepoint: Some(237),
                name: "iacute".to_string(),
                reference: Some(105),
                diacritic: Some("dot".to_string()),
                diacritic_space: Some(1),
                ..CharacterDef::default()
            },
        ];
        let composed = compose_diacritics(characters, &accents());
        assert!(composed.rejected.is_empty());
        let composed = composed.characters;
        let iacute = &composed[1];
        assert_eq!(iacute.pixels, Some(vec![vec![1], vec![0], vec![1]]));
        assert_eq!(iacute.reference, None);
        assert_eq!(iacute.diacritic, None);
        assert_eq!(iacute.descent, Some(1.0));
        assert_eq!(composed[0], base(vec![vec![1]]));
    }

    #[test]
    fn unknown_diacritics_reject_only_their_character() {
        let characters = vec![
            base(vec![vec![1]]),
            CharacterDef {
                name: "x".to_string(),
                pixels: Some(vec![vec![1]]),
                diacritic: Some("ring".to_string()),
                ..CharacterDef::default()
            },
        ];
        let composed = compose_diacritics(characters, &accents());
        assert_eq!(composed.characters, vec![base(vec![vec![1]])]);
        assert_eq!(composed.rejected.len(), 1);
        assert!(matches!(
            composed.rejected[0],
            CompositionError::UnknownDiacritic { .. }
        ));
        assert_eq!(composed.rejected[0].character(), "x");
    }

    #[test]
    fn bad_cells_in_an_accented_character_reject_it() {
        let characters = vec![
            CharacterDef {
                name: "broken".to_string(),
                pixels: Some(vec![vec![7]]),
                diacritic: Some("dot".to_string()),
                ..CharacterDef::default()
            },
            base(vec![vec![1]]),
        ];
        let composed = compose_diacritics(characters, &accents());
        assert_eq!(composed.characters.len(), 1);
        assert!(matches!(
            composed.rejected[0],
            CompositionError::Grid {
                source: GridError::InvalidCell { value: 7, .. },
                ..
            }
        ));
    }
}
