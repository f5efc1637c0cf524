//! Audit log for destructive operations.
//!
//! Each message becomes one `[YYYY-MM-DD HH:MM:SS] message` line, appended to
//! the log file (when configured) and echoed to stdout in verbose mode.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{CleanerError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Process-wide audit logger, configured once per run.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    verbose: bool,
    log_file: Option<PathBuf>,
}

impl AuditLog {
    pub fn new(verbose: bool, log_file: Option<PathBuf>) -> Self {
        Self { verbose, log_file }
    }

    /// Logger that records nothing.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Record a message. The file is opened in append mode for every line, so
    /// nothing is buffered between writes.
    pub fn log(&self, message: &str) -> Result<()> {
        let line = format_line(message);
        tracing::info!(target: "fileremover::audit", "{}", message);

        if self.verbose {
            println!("{}", line);
        }

        if let Some(path) = &self.log_file {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| CleanerError::from_io_error(e, "opening log", Some(path.clone())))?;
            writeln!(file, "{}", line)
                .map_err(|e| CleanerError::from_io_error(e, "writing log", Some(path.clone())))?;
        }

        Ok(())
    }
}

fn format_line(message: &str) -> String {
    format!("[{}] {}", Local::now().format(TIMESTAMP_FORMAT), message)
}
