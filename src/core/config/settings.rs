//! Resolved build settings

use super::user_config::ConfigFile;
use crate::core::cli::CliArgs;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_FAMILY_NAME: &str = "Pixelstroke";
pub const DEFAULT_STROKE_WIDTH: f64 = 192.0;
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 0.25;
pub const DEFAULT_ADVANCE_CELLS: f64 = 6.0;
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Lighter weights use larger cells, so the fixed stroke reads thinner
const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    ("Thin", 508.0),
    ("ExtraLight", 464.0),
    ("Light", 420.0),
    ("Normal", 376.0),
    ("Medium", 332.0),
    ("SemiBold", 288.0),
    ("Bold", 244.0),
    ("Black", 200.0),
];

/// One weight to build: its style name and design units per grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSetting {
    pub name: String,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildSettings {
    pub family_name: String,
    pub copyright: Option<String>,
    pub stroke_width: f64,
    pub flatten_tolerance: f64,
    /// Weights to build, in order
    pub weights: Vec<WeightSetting>,
    pub advance_cells: f64,
    pub output_dir: PathBuf,
    pub ligatures: bool,
    /// Worker threads, `None` for one per core
    pub jobs: Option<usize>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            family_name: DEFAULT_FAMILY_NAME.to_string(),
            copyright: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|&(name, size)| WeightSetting {
                    name: name.to_string(),
                    size,
                })
                .collect(),
            advance_cells: DEFAULT_ADVANCE_CELLS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ligatures: true,
            jobs: None,
        }
    }
}

impl BuildSettings {
    /// Layer the settings file and CLI flags over the defaults
    ///
    /// Priority order:
    /// 1. CLI arguments
    /// 2. Config file (~/.config/pixelstroke/settings.json)
    /// 3. Built-in defaults
    pub fn resolve(cli: &CliArgs, config: Option<ConfigFile>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(config) = config {
            if let Some(family_name) = config.family_name {
                settings.family_name = family_name;
            }
            settings.copyright = config.copyright.or(settings.copyright);
            if let Some(stroke_width) = config.stroke_width {
                settings.stroke_width = stroke_width;
            }
            if let Some(tolerance) = config.flatten_tolerance {
                settings.flatten_tolerance = tolerance;
            }
            if let Some(weights) = config.weights {
                settings.weights = weights;
            }
            if let Some(advance_cells) = config.advance_cells {
                settings.advance_cells = advance_cells;
            }
            if let Some(output_dir) = config.output_dir {
                settings.output_dir = output_dir;
            }
        }

        if let Some(family_name) = &cli.family {
            settings.family_name = family_name.clone();
        }
        if let Some(stroke_width) = cli.stroke {
            settings.stroke_width = stroke_width;
        }
        if let Some(output_dir) = &cli.output {
            settings.output_dir = output_dir.clone();
        }
        settings.ligatures = !cli.no_ligatures;
        settings.jobs = cli.jobs;
        settings.weights = select_weights(settings.weights, &cli.weights)?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.family_name.trim().is_empty() {
            bail!("Family name must not be empty");
        }
        if !(self.stroke_width > 0.0) {
            bail!("Stroke width must be positive, got {}", self.stroke_width);
        }
        if !(self.flatten_tolerance > 0.0) {
            bail!("Flatten tolerance must be positive, got {}", self.flatten_tolerance);
        }
        if !(self.advance_cells > 0.0) {
            bail!("Advance must be positive, got {} cells", self.advance_cells);
        }
        if self.weights.is_empty() {
            bail!("No weights configured");
        }
        if let Some(weight) = self.weights.iter().find(|weight| !(weight.size > 0.0)) {
            bail!("Weight `{}` has a non-positive size {}", weight.name, weight.size);
        }
        Ok(())
    }
}

/// Keep the requested weights, in configured order. Nothing requested
/// means every weight.
fn select_weights(
    available: Vec<WeightSetting>,
    requested: &[String],
) -> Result<Vec<WeightSetting>> {
    if requested.is_empty() {
        return Ok(available);
    }
    if let Some(unknown) = requested
        .iter()
        .find(|name| !available.iter().any(|weight| weight.name.eq_ignore_ascii_case(name)))
    {
        let names: Vec<&str> = available.iter().map(|weight| weight.name.as_str()).collect();
        bail!(
            "Unknown weight: '{unknown}'\nAvailable weights: {}",
            names.join(", ")
        );
    }
    Ok(available
        .into_iter()
        .filter(|weight| {
            requested
                .iter()
                .any(|name| weight.name.eq_ignore_ascii_case(name))
        })
        .collect())
}
