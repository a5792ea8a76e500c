//! Character, ligature and diacritic definition records
//!
//! These mirror the JSON files a font project keeps next to its build:
//! `characters.json`, `diacritics.json` and `ligatures.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CHARACTERS_FILE: &str = "characters.json";
pub const DIACRITICS_FILE: &str = "diacritics.json";
pub const LIGATURES_FILE: &str = "ligatures.json";

/// Raw cell rows, `0` empty, `1` filled, `2` special
pub type Pixels = Vec<Vec<u8>>;

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Layout of a pixel grid inside its glyph
pub trait GridSource {
    fn pixels(&self) -> Option<&Pixels>;
    fn diagonals(&self) -> Option<bool>;
    /// Rows that hang below the baseline
    fn descent(&self) -> Option<f64>;
    fn left_margin(&self) -> Option<f64>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codepoint: Option<u32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Pixels>,
    /// Codepoint of another character whose grid this one reuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonals: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diacritic: Option<String>,
    /// Empty rows between the base and its diacritic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diacritic_space: Option<usize>,
}

/// One piece of a chained ligature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Pixels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonals: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigatureDef {
    pub name: String,
    /// Codepoints replaced by this ligature, in order
    pub sequence: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Pixels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<FragmentDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonals: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiacriticDef {
    pub pixels: Pixels,
}

macro_rules! grid_source {
    ($($ty:ty),*) => {$(
        impl GridSource for $ty {
            fn pixels(&self) -> Option<&Pixels> {
                self.pixels.as_ref()
            }
            fn diagonals(&self) -> Option<bool> {
                self.diagonals
            }
            fn descent(&self) -> Option<f64> {
                self.descent
            }
            fn left_margin(&self) -> Option<f64> {
                self.left_margin
            }
        }
    )*};
}

grid_source!(CharacterDef, FragmentDef, LigatureDef);

/// Every definition of one font project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontSources {
    pub characters: Vec<CharacterDef>,
    pub diacritics: BTreeMap<String, DiacriticDef>,
    pub ligatures: Vec<LigatureDef>,
}

impl FontSources {
    /// Load definitions from a source directory. Only `characters.json` is
    /// required; missing diacritic and ligature files count as empty.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let dir = dir.as_ref();
        let characters = read_json(&dir.join(CHARACTERS_FILE))?;
        let diacritics = read_optional_json(&dir.join(DIACRITICS_FILE))?.unwrap_or_default();
        let ligatures = read_optional_json(&dir.join(LIGATURES_FILE))?.unwrap_or_default();
        let sources = Self {
            characters,
            diacritics,
            ligatures,
        };
        tracing::info!(
            "Loaded {} characters, {} diacritics and {} ligatures from {}",
            sources.characters.len(),
            sources.diacritics.len(),
            sources.ligatures.len(),
            dir.display()
        );
        Ok(sources)
    }

    /// Parse definitions from in-memory JSON documents
    pub fn from_json(
        characters: &str,
        diacritics: Option<&str>,
        ligatures: Option<&str>,
    ) -> Result<Self, DefinitionError> {
        Ok(Self {
            characters: parse_json(CHARACTERS_FILE, characters)?,
            diacritics: diacritics
                .map(|text| parse_json(DIACRITICS_FILE, text))
                .transpose()?
                .unwrap_or_default(),
            ligatures: ligatures
                .map(|text| parse_json(LIGATURES_FILE, text))
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(
    name: impl AsRef<Path>,
    text: &str,
) -> Result<T, DefinitionError> {
    serde_json::from_str(text).map_err(|source| DefinitionError::Parse {
        path: name.as_ref().to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DefinitionError> {
    let text = fs::read_to_string(path).map_err(|source| DefinitionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(path, &text)
}

fn read_optional_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, DefinitionError> {
    if !path.exists() {
        tracing::debug!("No {} found, skipping", path.display());
        return Ok(None);
    }
    read_json(path).map(Some)
}
