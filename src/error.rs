//! Crate-wide error type.
//!
//! Every variant maps to the general-failure exit status. A failing policy
//! verdict is not an error; see [`crate::Outcome`].

use std::path::PathBuf;

use thiserror::Error;

use crate::plan::MalformedPlanError;
use crate::runner::RunnerKind;

/// Boxed error returned by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced to the binary entrypoint.
#[derive(Debug, Error)]
pub enum Error {
    /// Command-line parsing failed, or help/version was requested.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// A file could not be read.
    #[error("read {}: {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// Underlying port error.
        source: PortError,
    },

    /// The plan document did not have the expected shape.
    #[error("invalid plan JSON: {0}")]
    MalformedPlan(#[from] MalformedPlanError),

    /// The config file exists but is not valid.
    #[error("invalid config file {}: {reason}", .path.display())]
    Config {
        /// The config file path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The requested report format is not supported.
    #[error("unsupported format {0:?} (use md|text|json)")]
    UnsupportedFormat(String),

    /// JSON report rendering failed.
    #[error("failed to render json: {0}")]
    Render(#[from] serde_json::Error),

    /// Neither provisioning binary is on `PATH`.
    #[error("neither 'tofu' nor 'terraform' found in PATH")]
    RunnerNotFound,

    /// The provisioning tool could not be spawned or exited non-zero.
    #[error("{runner} {step} failed: {detail}")]
    Runner {
        /// Which binary was invoked.
        runner: RunnerKind,
        /// The step that failed (`plan` or `show -json`).
        step: &'static str,
        /// Exit status and stderr, or the spawn error.
        detail: String,
    },
}
