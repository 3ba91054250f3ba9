//! Command dispatch and handlers.

pub mod gate;
pub mod scan;

use crate::cli::{Cli, Command};
use crate::config::FileConfig;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::Outcome;

/// Dispatch a parsed command to its handler.
///
/// Loads the optional config file first so both commands see the same
/// defaults.
///
/// # Errors
///
/// Returns an error if the config file is invalid or the command fails.
pub fn dispatch(cli: &Cli, ctx: &ServiceContext) -> Result<Outcome, Error> {
    let config = FileConfig::load(ctx, cli.config.as_deref())?;
    match &cli.command {
        Command::Scan(args) => scan::run(ctx, args, &config),
        Command::Gate(args) => gate::run(ctx, args, &config),
    }
}
