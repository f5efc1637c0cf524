use std::io;
use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use fileremover::{run, Cli};

/// Environment variable controlling diagnostic output (e.g. `FILEREMOVER_LOG=debug`)
const LOG_ENV: &str = "FILEREMOVER_LOG";

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse_normalized();
    let stdout = io::stdout();

    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
