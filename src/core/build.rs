//! Per-weight font builds
//!
//! A [`FontProject`] owns everything that is shared by every weight: the
//! composed character table, the ligature list and the compiled edge rules.
//! Each weight is then built glyph by glyph on the current rayon pool.

use crate::core::config::{BuildSettings, WeightSetting};
use crate::data::{assemble_font, to_norad_glyph};
use crate::font_source::{
    compose_diacritics, CharacterTable, CompositionError, FontInfo, FontSources, LigatureDef,
};
use crate::geometry::EdgeRules;
use crate::glyphs::{GlyphBuilder, GlyphError, LigatureRegistry};
use crate::rendering::{OverlapResolver, StrokeStyle};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read-only inputs shared by every weight
#[derive(Debug)]
pub struct FontProject {
    table: CharacterTable,
    /// Characters whose diacritic could not be composed
    rejected: Vec<CompositionError>,
    ligatures: Vec<LigatureDef>,
    rules: EdgeRules,
}

/// Outcome of building one weight
#[derive(Debug)]
pub struct WeightReport {
    pub info: FontInfo,
    pub font: norad::Font,
    /// Glyphs written to the font
    pub built: usize,
    /// Written glyphs without any outline
    pub empty: usize,
    pub failures: Vec<GlyphError>,
}

impl FontProject {
    /// Load and prepare the definitions in a source directory
    pub fn load(source: &Path) -> Result<Self> {
        let sources = FontSources::load(source)
            .with_context(|| format!("Failed to load definitions from {}", source.display()))?;
        Self::from_sources(sources)
    }

    /// Compose diacritics, index characters and compile the edge rules
    pub fn from_sources(sources: FontSources) -> Result<Self> {
        let composed = compose_diacritics(sources.characters, &sources.diacritics);
        let rules = EdgeRules::builtin().context("Built-in letterform tables are invalid")?;
        Ok(Self {
            table: CharacterTable::new(composed.characters),
            rejected: composed.rejected,
            ligatures: sources.ligatures,
            rules,
        })
    }

    pub fn table(&self) -> &CharacterTable {
        &self.table
    }

    /// Build every glyph of one weight. Failing glyphs are reported and
    /// left out; the rest of the font is still assembled.
    pub fn build_weight(&self, settings: &BuildSettings, weight: &WeightSetting) -> WeightReport {
        let mut info = FontInfo::new(&settings.family_name, &weight.name, weight.size);
        info.copyright = settings.copyright.clone();
        info!("Building {}", info.get_display_name());

        let style = StrokeStyle::new(weight.size, settings.stroke_width);
        let resolver = OverlapResolver::with_tolerance(settings.flatten_tolerance);
        let builder = GlyphBuilder::new(
            &self.table,
            &self.rules,
            style,
            &resolver,
            settings.advance_cells,
        );

        let characters: Vec<_> = self
            .table
            .characters()
            .par_iter()
            .map(|character| builder.build_character(character))
            .collect();
        let ligatures: Vec<_> = if settings.ligatures {
            self.ligatures
                .par_iter()
                .map(|ligature| builder.build_ligature(ligature))
                .collect()
        } else {
            Vec::new()
        };

        let mut report = WeightReport {
            font: norad::Font::new(),
            info,
            built: 0,
            empty: 0,
            failures: self.rejected.iter().cloned().map(GlyphError::from).collect(),
        };
        let mut glyphs = Vec::with_capacity(characters.len() + ligatures.len());
        let mut registry = LigatureRegistry::default();

        let character_glyphs = characters.into_iter().map(|result| (result, None));
        let ligature_glyphs = ligatures.into_iter().map(|result| match result {
            Ok(built) => (Ok(built.glyph), built.substitution),
            Err(error) => (Err(error), None),
        });
        for (result, substitution) in character_glyphs.chain(ligature_glyphs) {
            match result.and_then(|glyph| to_norad_glyph(&glyph).map(|g| (glyph, g))) {
                Ok((glyph, norad_glyph)) => {
                    if glyph.is_empty() {
                        debug!("`{}` has no outline", glyph.name);
                        report.empty += 1;
                    }
                    report.built += 1;
                    glyphs.push(norad_glyph);
                    registry.extend(substitution);
                }
                Err(error) => {
                    warn!("Skipping `{}`: {error}", error.glyph());
                    report.failures.push(error);
                }
            }
        }

        report.font = assemble_font(&report.info, glyphs, &registry);
        info!(
            "{}: {} glyphs built ({} empty), {} ligature rules, {} failed",
            report.info.get_display_name(),
            report.built,
            report.empty,
            registry.len(),
            report.failures.len()
        );
        report
    }
}
