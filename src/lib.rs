pub mod colors;
pub mod compare;
pub mod config;
pub mod loader;
pub mod normalize;
mod output;

pub use colors::{should_use_colors, Colors};
pub use compare::{compare, ComparisonRecord, DiffReport};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_compare_options, CliCompareOptions,
    CnfdiffToml, CompareOptions, CompareSection, ConfigError, CNFDIFF_TOML_TEMPLATE,
};
pub use loader::{ExcludeList, FileFormat, LoadError, Loader, ParseOutcome, RawConfig, RawValue};
pub use normalize::{CanonicalValue, Normalizer};
pub use output::{print_config_diff, render_text, OutputContext, OutputMode};

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of a `diff` run
pub struct RunResult {
    pub differences: usize,
    pub matches: usize,
    /// Sides that could not be read and were compared as empty
    pub load_failures: usize,
}

impl RunResult {
    pub fn is_clean(&self) -> bool {
        self.differences == 0 && self.load_failures == 0
    }
}

/// Error type for template generation
#[derive(Debug)]
pub enum TemplateError {
    /// The input configuration could not be loaded
    Load(LoadError),
    /// The template could not be serialized
    Serialize(serde_json::Error),
    /// The template could not be written
    Write(io::Error),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Load(e) => write!(f, "{e}"),
            TemplateError::Serialize(e) => write!(f, "failed to serialize template: {e}"),
            TemplateError::Write(e) => write!(f, "failed to write template: {e}"),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Load(e) => Some(e),
            TemplateError::Serialize(e) => Some(e),
            TemplateError::Write(e) => Some(e),
        }
    }
}

impl From<LoadError> for TemplateError {
    fn from(e: LoadError) -> Self {
        TemplateError::Load(e)
    }
}

/// Compare two files and print the report.
///
/// A side that cannot be read is compared as an empty configuration, so the
/// run still produces a best-effort diff instead of refusing to run.
pub fn run_diff(
    left: &Path,
    right: &Path,
    options: &CompareOptions,
    ctx: &OutputContext,
) -> RunResult {
    let loader = Loader::new(options.excludes.clone());
    let mut load_failures = 0;

    let left_config = load_or_empty(&loader, left, ctx, &mut load_failures);
    let right_config = load_or_empty(&loader, right, ctx, &mut load_failures);

    let report = compare(&left_config, &right_config, &Normalizer::new());

    let left_name = file_name(left);
    let right_name = file_name(right);
    match ctx.mode {
        OutputMode::Diff => print_config_diff(&left_name, &right_name, &left_config, &right_config),
        _ => output::print_report(&report, &left_name, &right_name, ctx),
    }

    RunResult {
        differences: report.differences.len(),
        matches: report.matches.len(),
        load_failures,
    }
}

/// Load a configuration file and write it out as a JSON template.
pub fn run_template(
    config_path: &Path,
    json_path: &Path,
    excludes: ExcludeList,
    ctx: &OutputContext,
) -> Result<(), TemplateError> {
    let loader = Loader::new(excludes);
    let outcome = loader.load(config_path)?;
    warn_orphans(config_path, &outcome, ctx);

    let json = outcome.config.to_json().map_err(TemplateError::Serialize)?;
    fs::write(json_path, json).map_err(TemplateError::Write)?;
    Ok(())
}

fn load_or_empty(
    loader: &Loader,
    path: &Path,
    ctx: &OutputContext,
    failures: &mut usize,
) -> RawConfig {
    match loader.load(path) {
        Ok(outcome) => {
            warn_orphans(path, &outcome, ctx);
            outcome.config
        }
        Err(e) => {
            *failures += 1;
            output::print_warning(
                &format!(
                    "{}: {e}; comparing against an empty configuration",
                    path.display()
                ),
                ctx,
            );
            RawConfig::new()
        }
    }
}

fn warn_orphans(path: &Path, outcome: &ParseOutcome, ctx: &OutputContext) {
    for (line, content) in &outcome.orphans {
        output::print_warning(
            &format!(
                "{}:{line}: line outside of any section was skipped: {content}",
                path.display()
            ),
            ctx,
        );
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
