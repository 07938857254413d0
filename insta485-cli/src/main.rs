//! insta485generator: templated static website generator.
//!
//! # Usage
//!
//! ```text
//! insta485generator <INPUT_DIR> [--output <DIR>] [--verbose]
//! ```
//!
//! `INPUT_DIR` holds `config.json`, `templates/` and optionally `static/`.
//! Pages land in `<INPUT_DIR>/html` unless `--output` says otherwise.

mod build;

use std::process::ExitCode;

use clap::Parser;

use build::BuildArgs;

/// Prefix of every fatal diagnostic.
const ERROR_PREFIX: &str = "insta485generator error";

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "insta485generator",
    version,
    about = "Templated static website generator.",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.build.verbose);
    match cli.build.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{ERROR_PREFIX}: {err}");
            ExitCode::FAILURE
        }
    }
}
