//! Comparison option merging
//!
//! Priority: CLI args > cnfdiff.toml > defaults

use crate::loader::ExcludeList;

use super::toml_schema::CompareSection;

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliCompareOptions {
    /// Extra parameter names to exclude
    pub exclude: Vec<String>,
    /// If Some(true), drop the builtin denylist (inverted in config)
    pub no_builtin_excludes: Option<bool>,
    pub show_matches: Option<bool>,
}

/// Merged comparison options.
#[derive(Debug)]
pub struct CompareOptions {
    pub excludes: ExcludeList,
    pub show_matches: bool,
}

/// Merge comparison options from CLI, TOML, and defaults.
///
/// The denylist is additive: CLI and TOML `exclude` entries extend whichever
/// base (builtin or empty) is selected.
pub fn merge_compare_options(
    cli: &CliCompareOptions,
    toml: Option<&CompareSection>,
) -> CompareOptions {
    let builtin = cli
        .no_builtin_excludes
        .map(|no| !no)
        .or_else(|| toml.and_then(|t| t.builtin_excludes))
        .unwrap_or(true);

    let mut excludes = if builtin {
        ExcludeList::builtin()
    } else {
        ExcludeList::empty()
    };
    if let Some(extra) = toml.and_then(|t| t.exclude.as_ref()) {
        excludes.extend(extra);
    }
    excludes.extend(&cli.exclude);

    let show_matches = cli
        .show_matches
        .or_else(|| toml.and_then(|t| t.show_matches))
        .unwrap_or(false);

    CompareOptions {
        excludes,
        show_matches,
    }
}
