use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};

/// Snapshot of a filesystem entry's metadata, digests, and content type.
///
/// Rebuilt from disk on every query; nothing here is cached or persisted.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
    /// Not every platform/filesystem reports a birth time
    pub created: Option<DateTime<Local>>,
    pub is_file: bool,
    pub is_dir: bool,
    /// Directories carry no content digests
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub mime_type: String,
}

impl FileDescriptor {
    /// Field name/value pairs in display order. Missing values render as `-`.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let missing = || "-".to_string();
        vec![
            ("path", self.path.display().to_string()),
            ("size", self.size.to_string()),
            ("modified", format_time(&self.modified)),
            ("created", self.created.as_ref().map(format_time).unwrap_or_else(missing)),
            ("is_file", self.is_file.to_string()),
            ("is_dir", self.is_dir.to_string()),
            ("md5", self.md5.clone().unwrap_or_else(missing)),
            ("sha1", self.sha1.clone().unwrap_or_else(missing)),
            ("mime_type", self.mime_type.clone()),
        ]
    }
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.fields() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

fn format_time(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}
