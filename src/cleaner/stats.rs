use std::fmt;

use humansize::{format_size, BINARY};

/// Tally of one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub files_deleted: usize,
    pub dirs_deleted: usize,
    pub excluded: usize,
    /// Entries that matched no configured pattern and were left in place.
    pub unmatched: usize,
    pub backed_up: usize,
    pub bytes_removed: u64,
}

impl CleanReport {
    pub fn deleted(&self) -> usize {
        self.files_deleted + self.dirs_deleted
    }

    pub fn bytes(&self) -> u64 {
        self.bytes_removed
    }
}

impl fmt::Display for CleanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Removed {} files and {} folders ({}), skipped {} excluded, left {} unmatched",
            self.files_deleted,
            self.dirs_deleted,
            format_size(self.bytes(), BINARY),
            self.excluded,
            self.unmatched,
        )?;
        if self.backed_up > 0 {
            write!(f, ", backed up {}", self.backed_up)?;
        }
        Ok(())
    }
}
