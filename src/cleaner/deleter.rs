//! Destructive deletion and the directory-cleaning pass.
//!
//! Errors are never swallowed here: the first failure aborts the pass and the
//! directory is left in whatever state it reached.

use std::fs;
use std::path::Path;

use crate::cleaner::backup::BackupWriter;
use crate::cleaner::config::Config;
use crate::cleaner::stats::CleanReport;
use crate::error::{CleanerError, Result};
use crate::logger::AuditLog;

/// Executes deletions for one run.
#[derive(Debug)]
pub struct Deleter {
    config: Config,
    backup: BackupWriter,
    log: AuditLog,
}

impl Deleter {
    pub fn new(config: Config) -> Self {
        let backup = BackupWriter::new(config.backup, config.backup_dir.clone());
        let log = AuditLog::new(config.verbose, config.log_file.clone());
        Self::with_log(config, backup, log)
    }

    pub fn with_log(config: Config, backup: BackupWriter, log: AuditLog) -> Self {
        Self {
            config,
            backup,
            log,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Back up (if enabled) then remove a single file. Returns bytes removed.
    pub fn delete_file(&self, path: &Path) -> Result<u64> {
        let size = fs::symlink_metadata(path)
            .map_err(|e| CleanerError::from_io_error(e, "reading metadata of", Some(path.to_path_buf())))?
            .len();

        self.backup.backup(path, &self.log)?;
        fs::remove_file(path)
            .map_err(|e| CleanerError::from_io_error(e, "deleting", Some(path.to_path_buf())))?;
        self.log.log(&format!("Deleted file: {}", path.display()))?;

        Ok(size)
    }

    /// Back up (if enabled) then recursively remove a directory. Returns bytes
    /// removed.
    pub fn delete_folder(&self, path: &Path) -> Result<u64> {
        let size = tree_size(path)?;

        self.backup.backup(path, &self.log)?;
        fs::remove_dir_all(path)
            .map_err(|e| CleanerError::from_io_error(e, "deleting directory", Some(path.to_path_buf())))?;
        self.log.log(&format!("Deleted folder: {}", path.display()))?;

        Ok(size)
    }

    /// Clean the direct children of `root`.
    ///
    /// Excluded names are skipped; files are removed when they match a file
    /// pattern (or none are configured); directories likewise against the
    /// directory patterns. Children are visited in name order.
    pub fn clean_directory(&self, root: &Path) -> Result<CleanReport> {
        let mut entries = fs::read_dir(root)
            .map_err(|e| CleanerError::from_io_error(e, "reading directory", Some(root.to_path_buf())))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| CleanerError::from_io_error(e, "reading directory", Some(root.to_path_buf())))?;
        entries.sort_by_key(|entry| entry.file_name());

        tracing::debug!(root = %root.display(), entries = entries.len(), "cleaning directory");

        let mut report = CleanReport::default();

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            if self.config.is_excluded(&name) {
                self.log.log(&format!("Skipping excluded item: {}", name))?;
                report.excluded += 1;
                continue;
            }

            // Follows symlinks when classifying; removal acts on the link itself
            let Ok(metadata) = fs::metadata(&path) else {
                tracing::debug!(path = %path.display(), "neither file nor directory, leaving in place");
                report.unmatched += 1;
                continue;
            };

            if metadata.is_file() {
                if !self.config.file_patterns.matches(&name) {
                    report.unmatched += 1;
                    continue;
                }
                report.bytes_removed += self.delete_file(&path)?;
                report.files_deleted += 1;
            } else if metadata.is_dir() {
                if !self.config.dir_patterns.matches(&name) {
                    report.unmatched += 1;
                    continue;
                }
                report.bytes_removed += self.delete_folder(&path)?;
                report.dirs_deleted += 1;
            } else {
                report.unmatched += 1;
                continue;
            }

            if self.backup.is_enabled() {
                report.backed_up += 1;
            }
        }

        Ok(report)
    }
}

/// Total size of a tree without following symlinks.
fn tree_size(path: &Path) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| CleanerError::from_io_error(e, "reading metadata of", Some(path.to_path_buf())))?;
    if !metadata.is_dir() {
        return Ok(metadata.len());
    }

    let mut total = 0;
    for entry in fs::read_dir(path)
        .map_err(|e| CleanerError::from_io_error(e, "reading directory", Some(path.to_path_buf())))?
    {
        let entry = entry
            .map_err(|e| CleanerError::from_io_error(e, "reading directory", Some(path.to_path_buf())))?;
        total += tree_size(&entry.path())?;
    }
    Ok(total)
}
