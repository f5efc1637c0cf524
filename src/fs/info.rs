use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::{CleanerError, Result};
use crate::fs::mime;
use crate::fs::types::FileDescriptor;
use crate::hash::{HashAlgorithm, HashComputer};

/// Digests reported for every inspected file.
const DESCRIPTOR_ALGORITHMS: [HashAlgorithm; 2] = [HashAlgorithm::Md5, HashAlgorithm::Sha1];

/// Build a [`FileDescriptor`] for `path`.
///
/// Both digests are computed in a single streaming pass. Fails if the path is
/// missing or cannot be read.
pub fn inspect(path: &Path) -> Result<FileDescriptor> {
    let metadata = fs::metadata(path)
        .map_err(|e| CleanerError::from_io_error(e, "reading metadata of", Some(path.to_path_buf())))?;

    let modified = metadata
        .modified()
        .map_err(|e| CleanerError::from_io_error(e, "reading mtime of", Some(path.to_path_buf())))?;
    let created = metadata.created().ok();

    let (md5, sha1) = if metadata.is_file() {
        let mut digests = HashComputer::new()
            .compute_multiple_hashes(path, &DESCRIPTOR_ALGORITHMS)?
            .into_iter()
            .map(|result| result.hash);
        (digests.next(), digests.next())
    } else {
        (None, None)
    };

    let mime_type = mime::sniff_path(path)
        .map_err(|e| CleanerError::from_io_error(e, "reading", Some(path.to_path_buf())))?;

    tracing::debug!(path = %path.display(), mime_type, "inspected");

    Ok(FileDescriptor {
        path: path.to_path_buf(),
        size: metadata.len(),
        modified: to_local(modified),
        created: created.map(to_local),
        is_file: metadata.is_file(),
        is_dir: metadata.is_dir(),
        md5,
        sha1,
        mime_type: mime_type.to_string(),
    })
}

fn to_local(time: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, b"hello world").unwrap();

        let info = inspect(&path).unwrap();
        assert_eq!(info.size, 11);
        assert!(info.is_file);
        assert!(!info.is_dir);
        assert_eq!(info.md5.as_deref(), Some("5eb63bbbe01eeed093cb22bb8f5acdc3"));
        assert_eq!(
            info.sha1.as_deref(),
            Some("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed")
        );
        assert_eq!(info.mime_type, "text/plain");
    }

    #[test]
    fn test_inspect_directory_has_no_digests() {
        let dir = tempfile::tempdir().unwrap();
        let info = inspect(dir.path()).unwrap();
        assert!(info.is_dir);
        assert!(info.md5.is_none());
        assert!(info.sha1.is_none());
        assert_eq!(info.mime_type, "inode/directory");
    }

    #[test]
    fn test_inspect_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = inspect(&dir.path().join("absent"));
        assert!(matches!(result, Err(CleanerError::FileNotFound { .. })));
    }

    #[test]
    fn test_display_lists_fields_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();

        let rendered = inspect(&path).unwrap().to_string();
        let keys: Vec<&str> = rendered
            .lines()
            .map(|line| line.split(": ").next().unwrap())
            .collect();
        assert_eq!(
            keys,
            ["path", "size", "modified", "created", "is_file", "is_dir", "md5", "sha1", "mime_type"]
        );
        assert!(rendered.contains("mime_type: inode/x-empty"));
    }
}
