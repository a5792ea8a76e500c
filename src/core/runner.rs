//! Application runner logic
//!
//! Turns parsed CLI arguments into a finished set of UFO sources.

use crate::core::build::FontProject;
use crate::core::config::{BuildSettings, ConfigFile};
use crate::core::cli::CliArgs;
use crate::data::write_ufo;
use crate::logging;
use anyhow::{bail, Context, Result};
use rayon::ThreadPoolBuilder;
use std::fs;

/// Run a build with the given CLI arguments.
/// Handles special CLI flags and delegates to the weight builds.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    let log_file = cli_args.log_file_path();
    let _log_guard = logging::init(cli_args.verbose, log_file.as_deref())?;

    cli_args.validate().map_err(anyhow::Error::msg)?;
    let settings = BuildSettings::resolve(&cli_args, ConfigFile::load())?;
    let source = cli_args
        .get_source()
        .context("No source directory given, pass --source")?;
    let project = FontProject::load(source)?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(settings.jobs.unwrap_or(0))
        .build()
        .context("Failed to start worker threads")?;
    tracing::debug!("Building with {} worker threads", pool.current_num_threads());

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!("Failed to create output directory {}", settings.output_dir.display())
    })?;

    let mut failed = 0;
    for weight in &settings.weights {
        let report = pool.install(|| project.build_weight(&settings, weight));
        let path = settings
            .output_dir
            .join(format!("{}.ufo", report.info.file_stem()));
        write_ufo(&report.font, &path)?;
        failed += report.failures.len();
    }

    if failed > 0 {
        bail!(
            "{failed} glyph builds failed across {} weights, see the log for details",
            settings.weights.len()
        );
    }
    Ok(())
}
