//! Config file discovery and loading

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::toml_schema::CnfdiffToml;

const CONFIG_FILE_NAME: &str = "cnfdiff.toml";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading the file
    Io(io::Error),
    /// TOML parsing error
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Find cnfdiff.toml by searching upward from the given directory.
///
/// Stops at the first cnfdiff.toml found, or at the git repository root
/// (directory containing `.git`), whichever comes first.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }

        if current.join(".git").exists() {
            return None;
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load and parse cnfdiff.toml from the given path.
pub fn load_config(path: &Path) -> Result<CnfdiffToml, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: CnfdiffToml = toml::from_str(&content)?;
    Ok(config)
}
