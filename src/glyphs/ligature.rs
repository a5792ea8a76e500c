//! Ligature composition and the substitution registry
//!
//! A ligature is either drawn from its own grid or chained together from
//! several character-sized fragments laid out left to right with a one-cell
//! gutter between them. Either way it advances as far as the characters it
//! replaces.

use super::{BuiltGlyph, GlyphBuilder, GlyphError};
use crate::font_source::{FragmentDef, GridSource, LigatureDef};
use crate::rendering::BooleanUnion;
use kurbo::BezPath;

/// Replaces a run of component glyphs with one ligature glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub components: Vec<String>,
    pub ligature: String,
}

/// Ordered substitutions collected while building ligatures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LigatureRegistry {
    substitutions: Vec<Substitution>,
}

impl LigatureRegistry {
    pub fn register(&mut self, substitution: Substitution) {
        self.substitutions.push(substitution);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Substitution> + '_ {
        self.substitutions.iter()
    }

    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Render the registry as a `liga` feature in feature file syntax.
    /// Empty registries produce no feature code.
    pub fn to_feature_code(&self) -> String {
        if self.substitutions.is_empty() {
            return String::new();
        }
        let mut fea = String::from("languagesystem DFLT dflt;\nlanguagesystem latn dflt;\n\n");
        fea.push_str("feature liga {\n");
        for substitution in &self.substitutions {
            fea.push_str(&format!(
                "    sub {} by {};\n",
                substitution.components.join(" "),
                substitution.ligature
            ));
        }
        fea.push_str("} liga;\n");
        fea
    }
}

impl Extend<Substitution> for LigatureRegistry {
    fn extend<T: IntoIterator<Item = Substitution>>(&mut self, iter: T) {
        self.substitutions.extend(iter);
    }
}

/// Raw outline of a chain before overlap removal
#[derive(Debug, Clone, Default)]
pub struct ChainLayout {
    /// Horizontal offset each fragment was drawn at
    pub offsets: Vec<f64>,
    pub paths: Vec<BezPath>,
    /// Right-hand edge of the last fragment
    pub extent: f64,
}

/// A built ligature and the substitution it should be registered under
#[derive(Debug, Clone)]
pub struct BuiltLigature {
    pub glyph: BuiltGlyph,
    /// Absent for ligatures with nothing to draw
    pub substitution: Option<Substitution>,
}

impl<U: BooleanUnion> GlyphBuilder<'_, U> {
    /// Build one ligature glyph together with its substitution rule
    pub fn build_ligature(&self, ligature: &LigatureDef) -> Result<BuiltLigature, GlyphError> {
        let components = ligature
            .sequence
            .iter()
            .map(|&codepoint| {
                self.table()
                    .name_of(codepoint)
                    .map(str::to_string)
                    .ok_or_else(|| GlyphError::UnknownSequenceCodepoint {
                        glyph: ligature.name.clone(),
                        codepoint,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let raw: Option<Vec<BezPath>> = match (&ligature.pixels, &ligature.chain) {
            (Some(pixels), _) if !pixels.is_empty() => {
                let rendered = self.render_source(&ligature.name, ligature, 0.0)?;
                Some(rendered.primitives.into_iter().map(|p| p.path).collect())
            }
            (_, Some(chain)) if !chain.is_empty() => {
                Some(self.layout_chain(&ligature.name, chain)?.paths)
            }
            _ => None,
        };

        let advance = self.advance(ligature.sequence.len());
        let Some(raw) = raw else {
            tracing::warn!(
                "Ligature `{}` has neither pixels nor a chain, writing an empty glyph",
                ligature.name
            );
            return Ok(BuiltLigature {
                glyph: BuiltGlyph {
                    name: ligature.name.clone(),
                    codepoint: None,
                    contours: Vec::new(),
                    advance,
                },
                substitution: None,
            });
        };

        let contours = self.resolve(raw);
        tracing::trace!("Built ligature `{}`: {} contours", ligature.name, contours.len());
        Ok(BuiltLigature {
            glyph: BuiltGlyph {
                name: ligature.name.clone(),
                codepoint: None,
                contours,
                advance,
            },
            substitution: Some(Substitution {
                components,
                ligature: ligature.name.clone(),
            }),
        })
    }

    /// Draw chain fragments left to right. Each fragment starts one cell
    /// after the right-hand edge of the previous one.
    pub fn layout_chain(
        &self,
        glyph: &str,
        chain: &[FragmentDef],
    ) -> Result<ChainLayout, GlyphError> {
        let mut layout = ChainLayout::default();
        let mut x_offset = 0.0;
        for (index, fragment) in chain.iter().enumerate() {
            let source: &dyn GridSource = match (&fragment.pixels, fragment.reference) {
                (Some(pixels), _) if !pixels.is_empty() => fragment as &dyn GridSource,
                (_, Some(codepoint)) => match self.table().get(codepoint) {
                    Some(character) => character as &dyn GridSource,
                    None => {
                        return Err(GlyphError::InvalidFragment {
                            glyph: glyph.to_string(),
                            index,
                        })
                    }
                },
                _ => {
                    return Err(GlyphError::InvalidFragment {
                        glyph: glyph.to_string(),
                        index,
                    })
                }
            };

            let rendered = self.render_source(glyph, source, x_offset)?;
            layout.offsets.push(x_offset);
            layout.extent = rendered.extent;
            layout
                .paths
                .extend(rendered.primitives.into_iter().map(|p| p.path));
            x_offset = rendered.extent + self.size();
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::font_source::CharacterDef;

    fn character(codepoint: u32, name: &str, pixels: Vec<Vec<u8>>) -> CharacterDef {
        CharacterDef {
            codepoint: Some(codepoint),
            name: name.to_string(),
            pixels: Some(pixels),
            ..CharacterDef::default()
        }
    }

    fn fixture() -> Fixture {
        Fixture::new(
            vec![
                character(45, "hyphen", vec![vec![1, 1, 1]]),
                character(62, "greater", vec![vec![1, 0], vec![0, 1], vec![1, 0]]),
                character(61, "equal", vec![vec![1, 1], vec![0, 0], vec![1, 1]]),
            ],
            10.0,
        )
    }

    fn fragment(pixels: Vec<Vec<u8>>) -> FragmentDef {
        FragmentDef {
            pixels: Some(pixels),
            ..FragmentDef::default()
        }
    }

    #[test]
    fn chain_fragments_are_separated_by_a_gutter() {
        let fixture = fixture();
        let chain = [
            fragment(vec![vec![1, 1, 1]]),
            FragmentDef {
                reference: Some(62),
                ..FragmentDef::default()
            },
        ];
        let layout = fixture.builder().layout_chain("arrow", &chain).unwrap();
        assert_eq!(layout.offsets, vec![0.0, 40.0]);
        assert_eq!(layout.extent, 60.0);
    }

    #[test]
    fn offsets_follow_fragment_width_and_bad_references_fail() {
        let fixture = fixture();
        let chain = [
            fragment(vec![vec![1]]),
            FragmentDef {
                reference: Some(62),
                ..FragmentDef::default()
            },
        ];
        let mut empty_first = chain.clone();
        empty_first[0] = FragmentDef {
            pixels: Some(Vec::new()),
            reference: Some(32),
            ..FragmentDef::default()
        };
        let error = fixture.builder().layout_chain("gap", &empty_first).unwrap_err();
        assert!(matches!(error, GlyphError::InvalidFragment { index: 0, .. }));

        let layout = fixture.builder().layout_chain("dot arrow", &chain).unwrap();
        assert_eq!(layout.offsets, vec![0.0, 20.0]);
    }

    #[test]
    fn pixel_ligatures_span_their_sequence() {
        let fixture = fixture();
        let ligature = LigatureDef {
            name: "hyphen_greater.liga".to_string(),
            sequence: vec![45, 62],
            pixels: Some(vec![vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 0]]),
            ..LigatureDef::default()
        };
        let built = fixture.builder().build_ligature(&ligature).unwrap();
        assert_eq!(built.glyph.advance, 120.0);
        assert_eq!(built.glyph.codepoint, None);
        assert_eq!(built.glyph.contours.len(), 1);
        assert_eq!(
            built.substitution,
            Some(Substitution {
                components: vec!["hyphen".to_string(), "greater".to_string()],
                ligature: "hyphen_greater.liga".to_string(),
            })
        );
    }

    #[test]
    fn chained_ligatures_register_a_substitution() {
        let fixture = fixture();
        let ligature = LigatureDef {
            name: "equal_equal_equal.liga".to_string(),
            sequence: vec![61, 61, 61],
            chain: Some(vec![
                FragmentDef {
                    reference: Some(61),
                    ..FragmentDef::default()
                };
                3
            ]),
            ..LigatureDef::default()
        };
        let built = fixture.builder().build_ligature(&ligature).unwrap();
        assert_eq!(built.glyph.advance, 180.0);
        assert_eq!(built.glyph.contours.len(), 6);
        assert_eq!(built.substitution.unwrap().components.len(), 3);
    }

    #[test]
    fn broken_fragments_fail_only_that_ligature() {
        let fixture = fixture();
        let ligature = LigatureDef {
            name: "broken".to_string(),
            sequence: vec![45, 45],
            chain: Some(vec![fragment(vec![vec![1]]), FragmentDef::default()]),
            ..LigatureDef::default()
        };
        let error = fixture.builder().build_ligature(&ligature).unwrap_err();
        assert!(matches!(error, GlyphError::InvalidFragment { index: 1, .. }));
    }

    #[test]
    fn unknown_sequence_codepoints_fail() {
        let fixture = fixture();
        let ligature = LigatureDef {
            name: "mystery".to_string(),
            sequence: vec![45, 0x1F600],
            pixels: Some(vec![vec![1]]),
            ..LigatureDef::default()
        };
        let error = fixture.builder().build_ligature(&ligature).unwrap_err();
        assert!(matches!(
            error,
            GlyphError::UnknownSequenceCodepoint { codepoint: 0x1F600, .. }
        ));
    }

    #[test]
    fn ligatures_without_outlines_are_empty_and_unregistered() {
        let fixture = fixture();
        let ligature = LigatureDef {
            name: "placeholder".to_string(),
            sequence: vec![45, 45],
            ..LigatureDef::default()
        };
        let built = fixture.builder().build_ligature(&ligature).unwrap();
        assert!(built.glyph.is_empty());
        assert_eq!(built.glyph.advance, 120.0);
        assert!(built.substitution.is_none());
    }

    #[test]
    fn feature_code_lists_rules_in_order() {
        let mut registry = LigatureRegistry::default();
        assert_eq!(registry.to_feature_code(), "");
        registry.register(Substitution {
            components: vec!["hyphen".to_string(), "greater".to_string()],
            ligature: "hyphen_greater.liga".to_string(),
        });
        registry.extend([Substitution {
            components: vec!["equal".to_string(); 2],
            ligature: "equal_equal.liga".to_string(),
        }]);
        let fea = registry.to_feature_code();
        let first = fea.find("sub hyphen greater by hyphen_greater.liga;").unwrap();
        let second = fea.find("sub equal equal by equal_equal.liga;").unwrap();
        assert!(first < second);
        assert!(fea.starts_with("languagesystem DFLT dflt;"));
        assert!(fea.trim_end().ends_with("} liga;"));
    }
}
