//! Metadata-preserving copies used for backups.
//!
//! Files keep their permissions and access/modification times. Directories are
//! copied recursively and get their permissions and times applied after their
//! contents, so populating them does not disturb the copied mtime. Symlinks
//! are recreated as links and never followed; sockets, FIFOs and devices are
//! skipped.

use std::fs::{self, File, FileTimes, Metadata};
use std::path::Path;

use crate::error::{CleanerError, Result};

/// Copy `src` to `dst`, recursing into real directories.
pub fn copy_preserving(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(src)
        .map_err(|e| CleanerError::from_io_error(e, "reading metadata of", Some(src.to_path_buf())))?;
    let file_type = metadata.file_type();

    if file_type.is_symlink() {
        copy_symlink(src, dst)
    } else if file_type.is_dir() {
        copy_dir(src, dst, &metadata)
    } else if file_type.is_file() {
        copy_file(src, dst, &metadata)
    } else {
        tracing::debug!(path = %src.display(), "special file not copied");
        Ok(())
    }
}

fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src)
        .map_err(|e| CleanerError::from_io_error(e, "reading link", Some(src.to_path_buf())))?;
    create_symlink(src, &target, dst)
        .map_err(|e| CleanerError::IoError {
            path: Some(src.to_path_buf()),
            operation: format!("linking {} to", dst.display()),
            source: e,
        })
}

#[cfg(unix)]
fn create_symlink(_src: &Path, target: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(windows)]
fn create_symlink(src: &Path, target: &Path, dst: &Path) -> std::io::Result<()> {
    // Windows needs to know the link kind; a dangling link is treated as a file link
    if fs::metadata(src).is_ok_and(|m| m.is_dir()) {
        std::os::windows::fs::symlink_dir(target, dst)
    } else {
        std::os::windows::fs::symlink_file(target, dst)
    }
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_src: &Path, _target: &Path, _dst: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}

fn copy_file(src: &Path, dst: &Path, metadata: &Metadata) -> Result<()> {
    fs::copy(src, dst).map_err(|e| CleanerError::IoError {
        path: Some(src.to_path_buf()),
        operation: format!("copying to {}", dst.display()),
        source: e,
    })?;

    // A read-only copy cannot be opened for writing; a read handle is enough
    // to update times on Unix
    let handle = File::options()
        .write(true)
        .open(dst)
        .or_else(|_| File::open(dst))
        .map_err(|e| CleanerError::from_io_error(e, "opening", Some(dst.to_path_buf())))?;
    handle
        .set_times(file_times(metadata))
        .map_err(|e| CleanerError::from_io_error(e, "setting times on", Some(dst.to_path_buf())))?;

    Ok(())
}

fn copy_dir(src: &Path, dst: &Path, metadata: &Metadata) -> Result<()> {
    fs::create_dir(dst)
        .map_err(|e| CleanerError::from_io_error(e, "creating directory", Some(dst.to_path_buf())))?;

    let entries = fs::read_dir(src)
        .map_err(|e| CleanerError::from_io_error(e, "reading directory", Some(src.to_path_buf())))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| CleanerError::from_io_error(e, "reading directory", Some(src.to_path_buf())))?;
        copy_preserving(&entry.path(), &dst.join(entry.file_name()))?;
    }

    // Directory handles cannot always carry timestamps (e.g. on Windows)
    match File::open(dst).and_then(|handle| handle.set_times(file_times(metadata))) {
        Ok(()) => {}
        Err(e) => tracing::debug!(path = %dst.display(), error = %e, "directory times not preserved"),
    }

    fs::set_permissions(dst, metadata.permissions())
        .map_err(|e| CleanerError::from_io_error(e, "setting permissions on", Some(dst.to_path_buf())))?;

    Ok(())
}

fn file_times(metadata: &Metadata) -> FileTimes {
    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_file_copy_keeps_contents_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        fs::write(&src, b"payload").unwrap();
        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        set_mtime(&src, old);

        copy_preserving(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"payload");
        assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), old);
    }

    #[test]
    fn test_directory_copy_is_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("tree");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("top.txt"), b"top").unwrap();
        fs::write(src.join("nested").join("leaf.txt"), b"leaf").unwrap();

        let dst = dir.path().join("copy");
        copy_preserving(&src, &dst).unwrap();

        assert_eq!(fs::read(dst.join("top.txt")).unwrap(), b"top");
        assert_eq!(fs::read(dst.join("nested").join("leaf.txt")).unwrap(), b"leaf");
    }

    #[test]
    fn test_read_only_file_copy() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ro.txt");
        fs::write(&src, b"locked").unwrap();
        let mut perms = fs::metadata(&src).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&src, perms).unwrap();

        let dst = dir.path().join("ro-copy.txt");
        copy_preserving(&src, &dst).unwrap();
        assert!(fs::metadata(&dst).unwrap().permissions().readonly());
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_link_is_recreated_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("cache");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("obj"), b"object").unwrap();
        fs::write(dir.path().join("sibling"), b"not copied").unwrap();
        std::os::unix::fs::symlink("..", src.join("up")).unwrap();

        let dst = dir.path().join("copy");
        copy_preserving(&src, &dst).unwrap();

        assert_eq!(fs::read(dst.join("obj")).unwrap(), b"object");
        let link = fs::symlink_metadata(dst.join("up")).unwrap();
        assert!(link.file_type().is_symlink());
        assert_eq!(fs::read_link(dst.join("up")).unwrap(), Path::new(".."));
    }

    #[cfg(unix)]
    #[test]
    fn test_top_level_directory_link_copies_link_only() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("big"), b"lots of data").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        let dst = dir.path().join("link-copy");
        copy_preserving(&link, &dst).unwrap();

        assert!(fs::symlink_metadata(&dst).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&dst).unwrap(), outside);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_preserving(&dir.path().join("nope"), &dir.path().join("out"));
        assert!(matches!(result, Err(CleanerError::FileNotFound { .. })));
    }
}
