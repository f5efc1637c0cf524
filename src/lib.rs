// Library module for fileremover
// Re-exports modules for use in integration tests and the binary

pub mod cleaner;
pub mod cli;
pub mod error;
pub mod fs;
pub mod hash;
pub mod logger;

pub use cli::{run, Cli};
pub use error::{CleanerError, Result};
