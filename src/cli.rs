//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `drift-checker`.
#[derive(Debug, Parser)]
#[command(
    name = "drift-checker",
    version,
    about = "Detect and gate infrastructure drift from Terraform/OpenTofu plans"
)]
pub struct Cli {
    /// YAML file with policy defaults (also read from `DRIFT_CHECKER_CONFIG`).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a refresh-only plan and report drift.
    #[command(after_help = EXIT_CODES_SCAN)]
    Scan(ScanArgs),
    /// Enforce destructive-change policy against a plan JSON (not refresh-only).
    #[command(after_help = EXIT_CODES_GATE)]
    Gate(GateArgs),
}

const EXIT_CODES_SCAN: &str = "Exit codes:
  0 = no drift, or not --strict
  2 = drift detected (with --strict)
  1 = error";

const EXIT_CODES_GATE: &str = "Exit codes:
  0 = safe
  2 = destructive changes present or thresholds exceeded (with --strict)
  1 = error";

/// Arguments for `scan`.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Working directory containing the configuration.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Output format: md|text|json [default: md].
    #[arg(long)]
    pub format: Option<String>,

    /// Exit with code 2 if any drift is detected.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `gate`.
#[derive(Debug, Args)]
pub struct GateArgs {
    /// Path to a normal plan JSON file (from `show -json`).
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Output format: md|text|json [default: md].
    #[arg(long)]
    pub format: Option<String>,

    /// Exit with code 2 if destructive changes are present or thresholds exceeded.
    #[arg(long)]
    pub strict: bool,

    /// Maximum allowed deletes before failing (negative means unlimited).
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub max_deletes: i64,

    /// Maximum allowed replaces before failing (negative means unlimited).
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub max_replaces: i64,

    /// Include the list of destructive resource addresses in the output.
    #[arg(long)]
    pub list: bool,
}
