//! Configuration file support for cnfdiff.
//!
//! This module provides:
//! - Loading configuration from `cnfdiff.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, and defaults
//! - Template generation with the `init` subcommand

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, load_config, ConfigError};
pub use init::{generate_init_file, generate_init_file_in, CNFDIFF_TOML_TEMPLATE};
pub use merge::{merge_compare_options, CliCompareOptions, CompareOptions};
pub use toml_schema::{CnfdiffToml, CompareSection};
