//! Docker-builder: stage a build context from a Dockerfile template and
//! shared library directories, then run the image build tool against it.
//!
//! This is the main entry point for the `docker-builder` CLI. It parses
//! arguments, sets up logging, runs the build, and maps errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod invoker;
pub mod pipeline;
pub mod request;
pub mod stage;
pub mod template;
pub mod variables;

#[cfg(test)]
mod test_support;

use cli::{Cli, USAGE_EXAMPLE};
use error::BuilderError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            if matches!(err, BuilderError::UserError(_)) {
                eprintln!("{}", USAGE_EXAMPLE);
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Level used when `RUST_LOG` is unset.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Log to stderr so stdout carries only the dry-run preview.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
