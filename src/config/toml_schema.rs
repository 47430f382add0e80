//! TOML schema definitions for cnfdiff.toml

use serde::{Deserialize, Serialize};

/// Root structure for cnfdiff.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CnfdiffToml {
    /// Comparison settings
    #[serde(default)]
    pub compare: CompareSection,
}

/// `[compare]` section in cnfdiff.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CompareSection {
    /// Extra parameter names to exclude, on top of the builtin denylist
    pub exclude: Option<Vec<String>>,

    /// Use the builtin denylist of environment-specific parameters
    /// (default: true)
    pub builtin_excludes: Option<bool>,

    /// Also list matching parameters in the report (default: false)
    pub show_matches: Option<bool>,
}
