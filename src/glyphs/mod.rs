//! Glyph builders
//!
//! Turns character and ligature definitions into finished outlines: the grid
//! is rendered into raw primitives and the overlap resolver merges them into
//! the glyph's final contours. Builders only read shared state, so any number
//! of glyphs can be built at once.

pub mod character;
pub mod ligature;

pub use ligature::{BuiltLigature, ChainLayout, LigatureRegistry, Substitution};

use crate::font_source::{CharacterTable, CompositionError, GridSource};
use crate::geometry::{EdgeRules, GridError, PixelGrid};
use crate::rendering::{
    BooleanUnion, GridLayout, OverlapResolver, RenderedGrid, PolygonUnion, StrokeRenderer,
    StrokeStyle,
};
use kurbo::BezPath;
use thiserror::Error;

/// Failure to build one glyph. The rest of the font is unaffected.
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("`{glyph}` references U+{codepoint:04X}, which is not defined")]
    MissingReference { glyph: String, codepoint: u32 },
    #[error("fragment {index} of `{glyph}` has neither pixels nor a valid reference")]
    InvalidFragment { glyph: String, index: usize },
    #[error("ligature `{glyph}` replaces U+{codepoint:04X}, which is not defined")]
    UnknownSequenceCodepoint { glyph: String, codepoint: u32 },
    #[error("`{glyph}` has an invalid pixel grid")]
    InvalidGrid {
        glyph: String,
        #[source]
        source: GridError,
    },
    #[error("`{glyph}` is not a valid glyph name")]
    InvalidName { glyph: String },
    #[error("`{glyph}` has codepoint {codepoint:#X}, which is not a Unicode scalar value")]
    InvalidCodepoint { glyph: String, codepoint: u32 },
    #[error(transparent)]
    Composition(#[from] CompositionError),
}

impl GlyphError {
    /// Name of the glyph that failed
    pub fn glyph(&self) -> &str {
        match self {
            Self::MissingReference { glyph, .. }
            | Self::InvalidFragment { glyph, .. }
            | Self::UnknownSequenceCodepoint { glyph, .. }
            | Self::InvalidGrid { glyph, .. }
            | Self::InvalidName { glyph }
            | Self::InvalidCodepoint { glyph, .. } => glyph,
            Self::Composition(error) => error.character(),
        }
    }
}

/// A finished glyph ready for font assembly
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltGlyph {
    pub name: String,
    pub codepoint: Option<u32>,
    /// Resolved, non-overlapping contours
    pub contours: Vec<BezPath>,
    pub advance: f64,
}

impl BuiltGlyph {
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Shared, read-only state for building every glyph of one weight
#[derive(Debug, Clone, Copy)]
pub struct GlyphBuilder<'a, U = PolygonUnion> {
    table: &'a CharacterTable,
    renderer: StrokeRenderer<'a>,
    resolver: &'a OverlapResolver<U>,
    /// Width of one character, in grid cells
    advance_cells: f64,
}

impl<'a, U: BooleanUnion> GlyphBuilder<'a, U> {
    pub fn new(
        table: &'a CharacterTable,
        rules: &'a EdgeRules,
        style: StrokeStyle,
        resolver: &'a OverlapResolver<U>,
        advance_cells: f64,
    ) -> Self {
        Self {
            table,
            renderer: StrokeRenderer::new(style, rules),
            resolver,
            advance_cells,
        }
    }

    pub fn table(&self) -> &'a CharacterTable {
        self.table
    }

    pub fn size(&self) -> f64 {
        self.renderer.style().size
    }

    /// Advance of a glyph standing in for `characters` characters
    pub fn advance(&self, characters: usize) -> f64 {
        self.size() * characters as f64 * self.advance_cells
    }

    /// Render the grid of `source` starting `x_offset` units into the glyph.
    /// Sources without pixels render nothing and leave the offset as is.
    fn render_source(
        &self,
        glyph: &str,
        source: &dyn GridSource,
        x_offset: f64,
    ) -> Result<RenderedGrid, GlyphError> {
        let grid = match source.pixels() {
            Some(pixels) => {
                PixelGrid::from_values(pixels).map_err(|source| GlyphError::InvalidGrid {
                    glyph: glyph.to_string(),
                    source,
                })?
            }
            None => PixelGrid::default(),
        };
        let layout = GridLayout {
            grid: &grid,
            diagonals: source.diagonals().unwrap_or(true),
            descent: source.descent().unwrap_or(0.0),
            left_margin: source.left_margin().unwrap_or(0.0),
        };
        Ok(self.renderer.render(&layout, x_offset))
    }

    fn resolve(&self, raw: impl IntoIterator<Item = BezPath>) -> Vec<BezPath> {
        let raw: Vec<BezPath> = raw.into_iter().collect();
        self.resolver.resolve(&raw)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Owns everything a builder borrows
    pub struct Fixture {
        pub table: CharacterTable,
        pub rules: EdgeRules,
        pub resolver: OverlapResolver,
        pub style: StrokeStyle,
    }

    impl Fixture {
        pub fn new(characters: Vec<crate::font_source::CharacterDef>, size: f64) -> Self {
            Self {
                table: CharacterTable::new(characters),
                rules: EdgeRules::builtin().unwrap(),
                resolver: OverlapResolver::default(),
                style: StrokeStyle::new(size, size * 0.48),
            }
        }

        pub fn builder(&self) -> GlyphBuilder<'_> {
            GlyphBuilder::new(&self.table, &self.rules, self.style, &self.resolver, 6.0)
        }
    }
}
