//! Single character glyphs

use super::{BuiltGlyph, GlyphBuilder, GlyphError};
use crate::font_source::CharacterDef;
use crate::rendering::BooleanUnion;

impl<U: BooleanUnion> GlyphBuilder<'_, U> {
    /// Build one character. A character with a reference is drawn from the
    /// referenced character's grid and layout.
    pub fn build_character(&self, character: &CharacterDef) -> Result<BuiltGlyph, GlyphError> {
        let source = match character.reference {
            Some(codepoint) => {
                self.table()
                    .get(codepoint)
                    .ok_or_else(|| GlyphError::MissingReference {
                        glyph: character.name.clone(),
                        codepoint,
                    })?
            }
            None => character,
        };

        let rendered = self.render_source(&character.name, source, 0.0)?;
        if rendered.primitives.is_empty() {
            tracing::debug!("`{}` has no pixels, writing an empty glyph", character.name);
        }
        let contours = self.resolve(rendered.primitives.into_iter().map(|p| p.path));
        tracing::trace!(
            "Built `{}`: {} edges, {} contours",
            character.name,
            rendered.edges.len(),
            contours.len()
        );

        Ok(BuiltGlyph {
            name: character.name.clone(),
            codepoint: character.codepoint,
            contours,
            advance: self.advance(1),
        })
    }
}
