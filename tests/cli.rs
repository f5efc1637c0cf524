use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn fileremover() -> Command {
    let mut cmd = Command::cargo_bin("fileremover").unwrap();
    // Keep a developer's own config.toml out of the runs
    cmd.env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cleans_matching_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.tmp"), "a").unwrap();
    fs::write(dir.path().join("b.log"), "b").unwrap();
    fs::write(dir.path().join("keep.txt"), "k").unwrap();

    fileremover()
        .arg("-d")
        .arg(dir.path())
        .args(["-fp", "*.tmp"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!dir.path().join("a.tmp").exists());
    assert!(dir.path().join("b.log").exists());
    assert!(dir.path().join("keep.txt").exists());
}

#[test]
fn test_verbose_echoes_log_and_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.tmp"), "a").unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();

    fileremover()
        .arg("--directory")
        .arg(dir.path())
        .args(["-fp", "*.tmp", "-dp", "modules", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted file: "))
        .stdout(predicate::str::contains("Deleted folder: "))
        .stdout(predicate::str::contains("Removed 1 files and 1 folders"));

    assert!(!dir.path().join("node_modules").exists());
}

#[test]
fn test_backup_and_log_file() {
    let work = tempdir().unwrap();
    let root = work.path().join("root");
    let backups = work.path().join("bk");
    let log = work.path().join("audit.log");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("old.tmp"), "payload").unwrap();

    fileremover()
        .arg("-d")
        .arg(&root)
        .arg("-b")
        .arg("--backup-dir")
        .arg(&backups)
        .arg("-l")
        .arg(&log)
        .assert()
        .success();

    assert!(!root.join("old.tmp").exists());
    assert_eq!(fs::read_to_string(backups.join("old.tmp")).unwrap(), "payload");
    let log_text = fs::read_to_string(log).unwrap();
    assert!(log_text.contains("Backed up"));
    assert!(log_text.contains("Deleted file: "));
}

#[test]
fn test_info_prints_descriptor() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    fs::write(&path, "hello world").unwrap();

    fileremover()
        .arg("--info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("size: 11"))
        .stdout(predicate::str::contains("modified: "))
        .stdout(predicate::str::contains("created: "))
        .stdout(predicate::str::contains("md5: 5eb63bbbe01eeed093cb22bb8f5acdc3"))
        .stdout(predicate::str::contains(
            "sha1: 2aae6c35c94fcfb415dbe95f408b9ce91ee846ed",
        ))
        .stdout(predicate::str::contains("mime_type: text/plain"));

    assert!(path.exists());
}

#[test]
fn test_info_with_hash_prints_only_digest() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    fs::write(&path, "hello world").unwrap();

    fileremover()
        .arg("--info")
        .arg(&path)
        .args(["--hash", "sha256"])
        .assert()
        .success()
        .stdout(
            "SHA256 hash: b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9\n",
        );
}

#[test]
fn test_missing_directory_reports_error() {
    let dir = tempdir().unwrap();

    fileremover()
        .arg("-d")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_info_missing_file_reports_error() {
    let dir = tempdir().unwrap();

    fileremover()
        .arg("--info")
        .arg(dir.path().join("missing.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_hash_without_info_is_usage_error() {
    fileremover()
        .args(["--hash", "md5"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--info"));
}

#[test]
fn test_invalid_pattern_reported_before_cleaning() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.tmp"), "a").unwrap();

    fileremover()
        .arg("-d")
        .arg(dir.path())
        .args(["-fp", "sub/*.tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern"));

    assert!(dir.path().join("a.tmp").exists());
}

#[test]
fn test_config_file_supplies_patterns() {
    let work = tempdir().unwrap();
    let root = work.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.bak"), "a").unwrap();
    fs::write(root.join("b.txt"), "b").unwrap();
    let config = work.path().join("config.toml");
    fs::write(&config, "file_patterns = [\"*.bak\"]\n").unwrap();

    fileremover()
        .arg("-d")
        .arg(&root)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert!(!root.join("a.bak").exists());
    assert!(root.join("b.txt").exists());
}
