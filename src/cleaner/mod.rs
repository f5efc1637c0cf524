//! Cleaner module - bulk deletion of directory entries
//!
//! Walks the direct children of a directory, matches them against exclusion
//! and suffix rules, and removes them, optionally backing each one up first.

pub mod backup;
pub mod config;
pub mod deleter;
pub mod patterns;
pub mod stats;

pub use backup::BackupWriter;
pub use config::{Config, FileConfig, BACKUP_DIR_NAME, DEFAULT_EXCLUDES, TOOL_NAME};
pub use deleter::Deleter;
pub use patterns::SuffixPatterns;
pub use stats::CleanReport;
