//! UFO assembly and file I/O

use crate::font_source::FontInfo;
use crate::glyphs::LigatureRegistry;
use anyhow::{Context, Result};
use norad::Font;
use std::path::Path;

/// Assemble a font from converted glyphs. Later glyphs replace earlier
/// glyphs of the same name.
pub fn assemble_font(
    info: &FontInfo,
    glyphs: impl IntoIterator<Item = norad::Glyph>,
    registry: &LigatureRegistry,
) -> Font {
    let mut font = Font::new();
    font.font_info = info.to_norad_font_info();
    font.features = registry.to_feature_code();

    let layer = font.default_layer_mut();
    for glyph in glyphs {
        if layer.get_glyph(glyph.name().as_str()).is_some() {
            tracing::warn!("Duplicate glyph `{}`, keeping the last one", glyph.name());
        }
        layer.insert_glyph(glyph);
    }
    font
}

/// Write a UFO to disk, replacing any existing source at `path`
pub fn write_ufo(font: &Font, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    font.save(path)
        .with_context(|| format!("Failed to write UFO to {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Load a UFO font file from disk
#[cfg(test)]
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    let font = Font::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::Substitution;

    fn glyph(name: &str, width: f64) -> norad::Glyph {
        let mut glyph = norad::Glyph::new(name);
        glyph.width = width;
        glyph
    }

    #[test]
    fn assembled_fonts_carry_info_glyphs_and_features() {
        let mut registry = LigatureRegistry::default();
        registry.register(Substitution {
            components: vec!["a".to_string(), "b".to_string()],
            ligature: "a_b".to_string(),
        });
        let info = FontInfo::new("Test", "Bold", 10.0);
        let font = assemble_font(
            &info,
            [glyph("a", 60.0), glyph("b", 60.0), glyph("a_b", 120.0), glyph("a", 61.0)],
            &registry,
        );

        assert_eq!(font.default_layer().len(), 3);
        assert_eq!(font.default_layer().get_glyph("a").map(|g| g.width), Some(61.0));
        assert!(font.features.contains("sub a b by a_b;"));
        assert_eq!(font.font_info.ascender, Some(80.0));
    }

    #[test]
    fn written_fonts_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test-Bold.ufo");
        let info = FontInfo::new("Test", "Bold", 10.0);
        let font = assemble_font(&info, [glyph("a", 60.0)], &LigatureRegistry::default());

        write_ufo(&font, &path).unwrap();
        let loaded = load_ufo_from_path(&path).unwrap();
        assert_eq!(loaded.font_info.family_name.as_deref(), Some("Test"));
        assert_eq!(loaded.default_layer().get_glyph("a").map(|g| g.width), Some(60.0));
    }

    #[test]
    fn loading_a_missing_ufo_fails() {
        assert!(load_ufo_from_path("/definitely/not/here.ufo").is_err());
    }
}
