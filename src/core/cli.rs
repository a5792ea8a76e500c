//! Command line interface for pixelstroke
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Many CLI options are documented with
//! examples to help users understand the expected format.

use crate::font_source::definitions::CHARACTERS_FILE;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Pixelstroke CLI arguments
///
/// Examples:
///   pixelstroke --source src                      # Build every weight into ./dist
///   pixelstroke -s src -o build                   # Write the UFOs into ./build
///   pixelstroke -s src -w Bold -w Black           # Build two weights only
///   pixelstroke -s src --stroke 160 --no-ligatures
///   pixelstroke -s src -vv --log-file             # Debug logging, also to a dated file
///   pixelstroke --new-config                      # Write a settings file to edit
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "pixelstroke",
    version,
    about = "Builds stroked vector fonts from pixel-grid glyph definitions",
    long_about = "Pixelstroke turns pixel-grid character and ligature definitions into smooth stroked outlines and writes one UFO source per weight."
)]
pub struct CliArgs {
    /// Directory holding the glyph definitions
    ///
    /// Must contain characters.json, and may contain diacritics.json and
    /// ligatures.json.
    #[clap(
        long = "source",
        short = 's',
        help = "Directory with characters.json and friends",
        long_help = "Directory holding the glyph definitions: characters.json (required), diacritics.json and ligatures.json (both optional).",
        required_unless_present = "new_config"
    )]
    pub source: Option<PathBuf>,

    /// Directory the UFO sources are written to
    #[clap(
        long = "output",
        short = 'o',
        help = "Output directory (default: dist)",
        long_help = "Directory the UFO sources are written to, one <Family>-<Weight>.ufo per weight. Overrides outputDir from the settings file."
    )]
    pub output: Option<PathBuf>,

    /// Font family name
    #[clap(long = "family", short = 'f', help = "Font family name")]
    pub family: Option<String>,

    /// Weights to build, by name
    ///
    /// Can be repeated. If not specified, every configured weight is built.
    #[clap(
        long = "weight",
        short = 'w',
        help = "Weight to build (repeatable)",
        long_help = "Weight to build, matched case-insensitively against the configured weights (Thin, ExtraLight, Light, Normal, Medium, SemiBold, Bold, Black by default). Can be repeated. Builds every weight when omitted."
    )]
    pub weights: Vec<String>,

    /// Stroke width in font units
    #[clap(long = "stroke", help = "Stroke width in font units (default: 192)")]
    pub stroke: Option<f64>,

    /// Skip ligature glyphs and the liga feature
    #[clap(long = "no-ligatures", help = "Do not build ligatures")]
    pub no_ligatures: bool,

    /// Worker threads for glyph builds
    #[clap(
        long = "jobs",
        short = 'j',
        help = "Worker threads (default: one per core)"
    )]
    pub jobs: Option<usize>,

    /// Also write logs to a file
    ///
    /// Without a path the log goes to the dated file in the user config
    /// directory.
    #[clap(
        long = "log-file",
        num_args = 0..=1,
        value_name = "PATH",
        help = "Also write logs to a file",
        long_help = "Also write logs to a file. Without a path, logs go to ~/.config/pixelstroke/logs/pixelstroke-<date>.log."
    )]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Initialize user configuration directory with a settings file
    ///
    /// This creates the ~/.config/pixelstroke directory with:
    /// - settings.json: every build setting at its default value
    /// - logs/: the default location for --log-file
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with a settings file",
        long_help = "Initialize the ~/.config/pixelstroke directory with a settings.json file holding every build setting at its default value, and a logs directory."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and are valid before the build starts,
    /// providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(source) = &self.source {
            if !source.exists() {
                return Err(format!(
                    "Source directory does not exist: {}\nMake sure the path is correct.",
                    source.display()
                ));
            }
            if !source.is_dir() {
                return Err(format!(
                    "Source is not a directory: {}\nPass the directory that holds {CHARACTERS_FILE}.",
                    source.display()
                ));
            }
            if !source.join(CHARACTERS_FILE).is_file() {
                return Err(format!(
                    "Missing {CHARACTERS_FILE} in {}\nEvery source directory needs a character list.",
                    source.display()
                ));
            }
        }

        if self.jobs == Some(0) {
            return Err("--jobs must be at least 1".to_string());
        }

        Ok(())
    }

    /// Get the source directory if provided
    pub fn get_source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Log file requested with `--log-file`, resolving the bare flag to the
    /// dated default file
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_ref()
            .map(|path| path.clone().unwrap_or_else(crate::logging::current_log_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn source_is_required_unless_initializing_config() {
        assert!(CliArgs::try_parse_from(["pixelstroke"]).is_err());
        let args = CliArgs::try_parse_from(["pixelstroke", "--new-config"]).unwrap();
        assert!(args.new_config);
        assert!(args.get_source().is_none());
    }

    #[test]
    fn log_file_flag_takes_an_optional_path() {
        let args = CliArgs::parse_from(["pixelstroke", "-s", "."]);
        assert_eq!(args.log_file_path(), None);

        let args = CliArgs::parse_from(["pixelstroke", "-s", ".", "--log-file"]);
        assert_eq!(args.log_file_path(), Some(crate::logging::current_log_file()));

        let args = CliArgs::parse_from(["pixelstroke", "-s", ".", "--log-file", "build.log"]);
        assert_eq!(args.log_file_path(), Some(PathBuf::from("build.log")));
    }

    #[test]
    fn verbosity_counts_flags() {
        let args = CliArgs::parse_from(["pixelstroke", "-s", ".", "-vvv"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn validation_checks_the_source_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().to_str().unwrap();

        let args = CliArgs::parse_from(["pixelstroke", "-s", source]);
        assert!(args.validate().unwrap_err().contains(CHARACTERS_FILE));

        fs::write(dir.path().join(CHARACTERS_FILE), "[]").unwrap();
        assert!(args.validate().is_ok());

        let args = CliArgs::parse_from(["pixelstroke", "-s", source, "-j", "0"]);
        assert!(args.validate().is_err());

        let missing = dir.path().join("missing");
        let args = CliArgs::parse_from(["pixelstroke", "-s", missing.to_str().unwrap()]);
        assert!(args.validate().unwrap_err().contains("does not exist"));
    }
}
