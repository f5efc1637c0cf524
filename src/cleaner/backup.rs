//! Backup-before-delete.
//!
//! Copies land in a single flat directory under the entry's base name. An
//! existing backup is never replaced: a taken name gets a `.<unix seconds>`
//! suffix, bumped until it is free.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{CleanerError, Result};
use crate::fs::copy_preserving;
use crate::logger::AuditLog;

#[derive(Debug, Clone)]
pub struct BackupWriter {
    enabled: bool,
    dir: PathBuf,
}

impl BackupWriter {
    pub fn new(enabled: bool, dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            dir: dir.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `path` into the backup directory. Returns the backup location, or
    /// `None` when backups are disabled.
    pub fn backup(&self, path: &Path, log: &AuditLog) -> Result<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }

        self.ensure_dir()?;

        let name = path.file_name().ok_or_else(|| CleanerError::IoError {
            path: Some(path.to_path_buf()),
            operation: "naming backup for".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        })?;

        let target = self.free_name(&name.to_string_lossy());
        copy_preserving(path, &target)?;
        log.log(&format!("Backed up {} to {}", path.display(), target.display()))?;

        Ok(Some(target))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                CleanerError::from_io_error(e, "creating backup directory", Some(self.dir.clone()))
            })?;
            tracing::debug!(dir = %self.dir.display(), "created backup directory");
        }
        Ok(())
    }

    fn free_name(&self, name: &str) -> PathBuf {
        let plain = self.dir.join(name);
        if !occupied(&plain) {
            return plain;
        }

        let mut stamp = Utc::now().timestamp();
        loop {
            let candidate = self.dir.join(format!("{}.{}", name, stamp));
            if !occupied(&candidate) {
                return candidate;
            }
            stamp += 1;
        }
    }
}

// Broken symlinks occupy a name too
fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
