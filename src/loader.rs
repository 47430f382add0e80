//! Loading configuration files into the in-memory model.
//!
//! Two input formats:
//! - Structured text (MySQL/INI style): `[section]` headers, `key = value`
//!   lines, bare flags, `#`/`;` comments.
//! - JSON templates: `{ "section": { "key": value } }`, produced by the
//!   `template` subcommand.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Parameters excluded from loading because they legitimately differ across
/// environments (ports, paths, host identifiers, replication groups).
/// All entries lowercase; matching is case-insensitive.
const BUILTIN_EXCLUDES: &[&str] = &[
    "innodb_buffer_pool_size",
    "keyring_file_data",
    "port",
    "socket",
    "bind_address",
    "datadir",
    "log-error",
    "pid-file",
    "innodb_data_home_dir",
    "innodb_log_group_home_dir",
    "innodb_undo_directory",
    "server-id",
    "basedir",
    "tmpdir",
    "report_host",
    "report_port",
    "innodb_lock_wait_log_dir",
    "slow_query_log_file",
    "trx_query_log_file",
    "general_log_file",
    "rpl_semi_sync_master_group1",
    "rpl_semi_sync_master_group2",
    "rpl_semi_sync_master_group3",
    "rpl_semi_sync_master_group4",
    "rpl_semi_sync_master_group5",
    "rpl_semi_sync_master_group6",
    "rpl_semi_sync_master_group7",
    "rpl_semi_sync_master_group8",
    "rpl_semi_sync_master_group9",
    "rpl_semi_sync_master_group10",
    "rpl_semi_sync_master_enabled",
    "rpl_semi_sync_master_timeout_ratio",
    "rpl_semi_sync_slave_enabled",
    "rpl_semi_sync_master_wait_cond_lwm",
    "rpl_semi_sync_master_wait_cond_hwm",
    "read_only",
    "kafka_libdir",
    "zk_libdir",
    "gateway",
    "alarmfiledir",
    "seq_backup_dir",
    "metadataserver_ip",
    "gtm_handlethread_num",
    "zk_host_ip",
];

/// Immutable denylist of parameter names skipped at load time.
#[derive(Debug, Clone)]
pub struct ExcludeList {
    keys: HashSet<String>,
}

impl ExcludeList {
    /// The builtin denylist.
    pub fn builtin() -> Self {
        Self {
            keys: BUILTIN_EXCLUDES.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// An empty denylist (nothing excluded).
    pub fn empty() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    /// Add extra parameter names to the denylist.
    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keys
            .extend(extra.into_iter().map(|k| k.as_ref().to_lowercase()));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for ExcludeList {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A raw configuration value as it appeared in the source file.
///
/// Text files only produce `Str` (trimmed) and `Bool(true)` (bare flags);
/// JSON templates may carry any variant. Untagged so templates round-trip
/// as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Int(n) => write!(f, "{n}"),
            RawValue::Float(x) => write!(f, "{x}"),
            RawValue::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Section name → key name → raw value.
///
/// `BTreeMap` keeps sections and keys sorted, so reports and serialized
/// templates come out in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig {
    pub sections: BTreeMap<String, BTreeMap<String, RawValue>>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&RawValue> {
        self.sections.get(section).and_then(|keys| keys.get(key))
    }

    /// Serialize as a pretty-printed JSON template (4-space indent).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}

/// Error type for loading a configuration file
#[derive(Debug)]
pub enum LoadError {
    /// IO error reading the file
    Io(io::Error),
    /// JSON template did not parse as section → key → scalar
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read configuration file: {e}"),
            LoadError::Json(e) => write!(f, "failed to parse JSON template: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

/// Input format, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Text,
    Json,
}

impl FileFormat {
    /// `.json` is a template; everything else parses as structured text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Text,
        }
    }
}

/// Result of parsing structured text: the configuration plus any lines that
/// had to be discarded because no section was open yet.
#[derive(Debug)]
pub struct ParseOutcome {
    pub config: RawConfig,
    /// (line number, line content) of discarded out-of-section lines
    pub orphans: Vec<(usize, String)>,
}

/// Loads configuration files, filtering denylisted parameters from text input.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    excludes: ExcludeList,
}

impl Loader {
    pub fn new(excludes: ExcludeList) -> Self {
        Self { excludes }
    }

    /// Load a file, inferring the format from its extension.
    pub fn load(&self, path: &Path) -> Result<ParseOutcome, LoadError> {
        match FileFormat::from_path(path) {
            FileFormat::Json => {
                let config = self.load_json(path)?;
                Ok(ParseOutcome {
                    config,
                    orphans: vec![],
                })
            }
            FileFormat::Text => self.load_text(path),
        }
    }

    /// Load a structured-text configuration file.
    ///
    /// The file is decoded best-effort: invalid UTF-8 sequences become
    /// replacement characters instead of aborting the read, and a leading
    /// BOM is stripped.
    pub fn load_text(&self, path: &Path) -> Result<ParseOutcome, LoadError> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        Ok(self.parse_text(content))
    }

    /// Load a JSON template. The denylist is not reapplied: templates are
    /// assumed to have been filtered when they were generated.
    pub fn load_json(&self, path: &Path) -> Result<RawConfig, LoadError> {
        let content = fs::read_to_string(path)?;
        let config: RawConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Parse structured text line by line.
    pub fn parse_text(&self, content: &str) -> ParseOutcome {
        let mut config = RawConfig::new();
        let mut orphans = vec![];
        let mut current_section: Option<String> = None;

        for (line_idx, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            // Section headers open (or reopen) a section
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_string();
                config.sections.entry(name.clone()).or_default();
                current_section = Some(name);
                continue;
            }

            let Some(section) = &current_section else {
                orphans.push((line_idx + 1, line.to_string()));
                continue;
            };

            // `key = value` splits on the first `=`; a line without `=` is a
            // bare flag valued boolean true
            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (
                    key.trim().to_lowercase(),
                    RawValue::Str(value.trim().to_string()),
                ),
                None => (line.to_lowercase(), RawValue::Bool(true)),
            };

            if self.excludes.contains(&key) {
                continue;
            }

            // Last write wins for repeated keys
            config
                .sections
                .entry(section.clone())
                .or_default()
                .insert(key, value);
        }

        ParseOutcome { config, orphans }
    }
}
