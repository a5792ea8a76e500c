//! Font source definitions
//!
//! Everything the glyph builders read: character, ligature and diacritic
//! records loaded from JSON, the codepoint lookup table and per-weight
//! metrics.

pub mod definitions;
pub mod diacritics;
pub mod metrics;
pub mod table;

// Explicit re-exports for public API
pub use definitions::{
    CharacterDef, DefinitionError, DiacriticDef, FontSources, FragmentDef, GridSource,
    LigatureDef, Pixels,
};
pub use diacritics::{compose_diacritics, Composed, CompositionError};
pub use metrics::{FontInfo, FontMetrics};
pub use table::CharacterTable;
