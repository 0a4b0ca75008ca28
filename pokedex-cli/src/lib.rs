//! Command-line interface that builds a local Pokedex from PokeAPI.
//!
//! Running `pokedex` with no subcommand behaves like `pokedex build` with
//! every option taken from configuration files, `POKEDEX_CMDS_BUILD_*`
//! environment variables or built-in defaults.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::warn;

mod build;
mod error;

pub use error::CliError;

use build::{BuildArgs, BuildOutcome, run_build};

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_USER_AGENT: &str = "user-agent";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ENV_DATABASE: &str = "POKEDEX_CMDS_BUILD_DATABASE";

/// Run the Pokedex CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration layering, store
/// inspection or the ingest run fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let args = match cli.command {
        Some(Command::Build(args)) => args,
        None => BuildArgs::default(),
    };
    if let BuildOutcome::Built(report) = run_build(args)?
        && !report.skipped.is_empty()
    {
        let ids: Vec<String> = report.skipped.iter().map(|entry| entry.id.to_string()).collect();
        warn!(
            "{} species could not be loaded: {}",
            report.skipped.len(),
            ids.join(", ")
        );
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "pokedex",
    about = "Build a local SQLite Pokedex from the PokeAPI catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the store if it is missing or incomplete (the default).
    Build(BuildArgs),
}

#[cfg(test)]
mod tests;
