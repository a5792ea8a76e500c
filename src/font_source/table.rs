//! Read-only codepoint lookup shared by every glyph build

use super::definitions::CharacterDef;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CharacterTable {
    characters: Vec<CharacterDef>,
    by_codepoint: HashMap<u32, usize>,
}

impl CharacterTable {
    /// Index characters by codepoint. A later definition of the same
    /// codepoint replaces the earlier one in the lookup.
    pub fn new(characters: Vec<CharacterDef>) -> Self {
        let mut by_codepoint = HashMap::with_capacity(characters.len());
        for (index, character) in characters.iter().enumerate() {
            if let Some(codepoint) = character.codepoint {
                if let Some(previous) = by_codepoint.insert(codepoint, index) {
                    tracing::warn!(
                        "Codepoint U+{codepoint:04X} defined by both `{}` and `{}`",
                        characters[previous].name,
                        character.name
                    );
                }
            }
        }
        Self {
            characters,
            by_codepoint,
        }
    }

    pub fn get(&self, codepoint: u32) -> Option<&CharacterDef> {
        self.by_codepoint
            .get(&codepoint)
            .map(|&index| &self.characters[index])
    }

    pub fn name_of(&self, codepoint: u32) -> Option<&str> {
        self.get(codepoint).map(|character| character.name.as_str())
    }

    /// Characters in definition order
    pub fn characters(&self) -> &[CharacterDef] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
