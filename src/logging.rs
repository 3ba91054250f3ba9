//! Tracing subscriber setup.
//!
//! Logs go to stderr so that stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "DRIFT_CHECKER_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global fmt subscriber. Calling it twice is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
