//! Cleaner configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! command-line flags. The resolved [`Config`] does not change during a run.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cleaner::patterns::SuffixPatterns;
use crate::error::{CleanerError, Result};

/// Name of this tool; excluded from cleaning by default.
pub const TOOL_NAME: &str = "fileremover";

/// Fixed name of the directory that receives backups.
pub const BACKUP_DIR_NAME: &str = "fileremover_backup";

/// Names skipped when the user gives no exclusion list.
pub const DEFAULT_EXCLUDES: &[&str] = &[TOOL_NAME, BACKUP_DIR_NAME];

const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of a TOML configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub verbose: Option<bool>,
    pub backup: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub file_patterns: Option<Vec<String>>,
    pub dir_patterns: Option<Vec<String>>,
}

impl FileConfig {
    /// Parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| CleanerError::ConfigError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| CleanerError::ConfigError {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })
    }

    /// Load `explicit` if given; otherwise the per-user file if it exists;
    /// otherwise an empty configuration.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user configuration");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/fileremover/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(TOOL_NAME).join(CONFIG_FILE_NAME))
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub verbose: bool,
    pub backup: bool,
    pub log_file: Option<PathBuf>,
    pub backup_dir: PathBuf,
    pub exclude: BTreeSet<String>,
    pub file_patterns: SuffixPatterns,
    pub dir_patterns: SuffixPatterns,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            backup: false,
            log_file: None,
            backup_dir: PathBuf::from(BACKUP_DIR_NAME),
            exclude: DEFAULT_EXCLUDES.iter().map(|name| name.to_string()).collect(),
            file_patterns: SuffixPatterns::any(),
            dir_patterns: SuffixPatterns::any(),
        }
    }
}

impl Config {
    /// Apply a configuration file on top of the defaults.
    pub fn from_file(file: FileConfig) -> Result<Self> {
        let mut config = Self::default();
        config.verbose = file.verbose.unwrap_or(config.verbose);
        config.backup = file.backup.unwrap_or(config.backup);
        config.log_file = file.log_file;
        if let Some(dir) = file.backup_dir {
            config.backup_dir = dir;
        }
        if let Some(exclude) = file.exclude {
            config = config.with_exclude(exclude);
        }
        if let Some(patterns) = file.file_patterns {
            config.file_patterns = SuffixPatterns::from_patterns(patterns)?;
        }
        if let Some(patterns) = file.dir_patterns {
            config.dir_patterns = SuffixPatterns::from_patterns(patterns)?;
        }
        Ok(config)
    }

    /// Replace the default exclusions with `names`.
    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.file_patterns = SuffixPatterns::from_patterns(patterns)?;
        Ok(self)
    }

    pub fn with_dir_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dir_patterns = SuffixPatterns::from_patterns(patterns)?;
        Ok(self)
    }

    pub fn with_backup(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup = true;
        self.backup_dir = backup_dir.into();
        self
    }

    /// True for names in the exclusion set and for the backup directory's own
    /// name, which is never cleaned even when the user replaces the defaults.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.contains(name)
            || self
                .backup_dir
                .file_name()
                .is_some_and(|backup| backup == name)
    }
}
