//! Command-line surface and the run entry point.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use crate::cleaner::{Config, Deleter, FileConfig};
use crate::error::{CleanerError, Result};
use crate::fs::inspect;
use crate::hash::{HashAlgorithm, HashComputer, HashRegistry};

#[derive(Debug, Parser)]
#[command(
    name = "fileremover",
    version,
    about = "Inspect files and bulk-delete directory entries with optional backup"
)]
pub struct Cli {
    /// Directory to operate on
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: PathBuf,

    /// Files/folders to exclude (replaces the default exclusions)
    #[arg(short = 'e', long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// File name patterns to match (e.g. *.tmp); `*` is stripped and the rest
    /// matched as a suffix
    #[arg(long = "file-patterns", visible_alias = "fp", num_args = 1..)]
    pub file_patterns: Option<Vec<String>>,

    /// Directory name patterns to match, same suffix rules as file patterns
    #[arg(long = "dir-patterns", visible_alias = "dp", num_args = 1..)]
    pub dir_patterns: Option<Vec<String>>,

    /// Enable backup before deletion
    #[arg(short = 'b', long)]
    pub backup: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log file path (appended to)
    #[arg(short = 'l', long)]
    pub log: Option<PathBuf>,

    /// Print information about a specific file and exit
    #[arg(long, value_name = "PATH")]
    pub info: Option<PathBuf>,

    /// With --info, print only this digest
    #[arg(long, value_name = "ALGO", requires = "info", value_parser = parse_algorithm)]
    pub hash: Option<HashAlgorithm>,

    /// List supported hash algorithms and exit
    #[arg(long)]
    pub list_algorithms: bool,

    /// Configuration file (defaults to the per-user config.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where backups are written
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments, accepting `-fp`/`-dp` spellings.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parse an explicit argument list, accepting `-fp`/`-dp` spellings.
    pub fn try_parse_normalized<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrite the single-dash multi-letter flags to their long forms; clap would
/// otherwise read `-fp` as `-f -p`. Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some("-fp") => OsString::from("--file-patterns"),
                Some("-dp") => OsString::from("--dir-patterns"),
                _ => arg,
            }
        })
        .collect()
}

fn parse_algorithm(name: &str) -> std::result::Result<HashAlgorithm, String> {
    name.parse().map_err(|e: CleanerError| e.to_string())
}

/// Layer the configuration file and command-line flags over the defaults.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let file = FileConfig::discover(cli.config.as_deref())?;
    let mut config = Config::from_file(file)?;

    config.verbose |= cli.verbose;
    config.backup |= cli.backup;
    if let Some(log) = &cli.log {
        config.log_file = Some(log.clone());
    }
    if let Some(dir) = &cli.backup_dir {
        config.backup_dir = dir.clone();
    }
    if let Some(exclude) = &cli.exclude {
        config = config.with_exclude(exclude.iter().cloned());
    }
    if let Some(patterns) = &cli.file_patterns {
        config = config.with_file_patterns(patterns)?;
    }
    if let Some(patterns) = &cli.dir_patterns {
        config = config.with_dir_patterns(patterns)?;
    }

    Ok(config)
}

/// Execute one invocation, writing user-facing output to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    if cli.list_algorithms {
        for info in HashRegistry::list_algorithms() {
            let note = if info.collision_resistant {
                ""
            } else {
                " (compatibility only)"
            };
            writeln!(out, "{:<8} {:>4} bits{}", info.name, info.output_bits, note)?;
        }
        return Ok(());
    }

    if let Some(path) = &cli.info {
        if let Some(algorithm) = cli.hash {
            let result = HashComputer::new().compute_hash(path, algorithm)?;
            writeln!(out, "{} hash: {}", algorithm.name().to_uppercase(), result.hash)?;
        } else {
            write!(out, "{}", inspect(path)?)?;
        }
        return Ok(());
    }

    let config = resolve_config(cli)?;
    let verbose = config.verbose;
    tracing::debug!(?config, directory = %cli.directory.display(), "starting clean");

    let report = Deleter::new(config).clean_directory(&cli.directory)?;

    if verbose {
        writeln!(out, "{}", report.to_string().green())?;
    }

    Ok(())
}
