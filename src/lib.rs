//! Core library entry for the `drift-checker` CLI.
//!
//! The pipeline is plan JSON → [`plan::classify()`] → [`policy::evaluate`] →
//! [`Outcome`]. Only the binary entrypoint turns an outcome into an exit code.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod plan;
pub mod policy;
pub mod ports;
pub mod report;
pub mod runner;

use clap::Parser;

pub use error::Error;

use context::ServiceContext;
use policy::{FailReason, Verdict};

/// Successful result of a command. Errors travel separately as [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gate passed or was advisory.
    Pass,
    /// The strict gate condition was met.
    PolicyFail(FailReason),
}

impl Outcome {
    /// Maps a verdict to an outcome.
    #[must_use]
    pub fn from_verdict(verdict: &Verdict) -> Self {
        verdict.reason().map_or(Self::Pass, Self::PolicyFail)
    }
}

/// Run the CLI with the provided arguments against live adapters.
///
/// # Errors
///
/// Returns [`Error::Usage`] when argument parsing fails (including
/// `--help`/`--version`), or the command's error.
pub fn run<I, T>(args: I) -> Result<Outcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    run_with_context(args, &ServiceContext::live())
}

/// Run the CLI with the provided arguments and service context.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_context<I, T>(args: I, ctx: &ServiceContext) -> Result<Outcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(&cli, ctx)
}
