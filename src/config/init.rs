//! Template generation for the `init` subcommand

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Template cnfdiff.toml with documentation
pub const CNFDIFF_TOML_TEMPLATE: &str = r#"# cnfdiff.toml - Configuration for cnfdiff
#
# cnfdiff compares MySQL/INI configuration files after canonicalizing
# values, so `ON` vs `1`, `512K` vs `524288`, and reordered sql_mode
# lists do not show up as drift. Parameters that legitimately differ
# across environments (ports, paths, host identifiers) are excluded
# by a builtin denylist.
#
# The settings below control optional behavior - uncomment and modify
# as needed.

[compare]
# Extra parameter names to exclude, on top of the builtin denylist.
# Matching is case-insensitive.
# exclude = ["wsrep_node_name", "wsrep_node_address"]

# Use the builtin denylist of environment-specific parameters.
# Set to false to compare every parameter, including ports and paths.
# Default: true
# builtin_excludes = true

# Also list matching parameters in the report.
# Default: false
# show_matches = false
"#;

/// Generate cnfdiff.toml in the specified directory (or current directory
/// if None).
///
/// Returns an error if cnfdiff.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from("cnfdiff.toml"), |d| d.join("cnfdiff.toml"));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "cnfdiff.toml already exists",
        ));
    }

    fs::write(&path, CNFDIFF_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate cnfdiff.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
