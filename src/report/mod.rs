//! Report rendering for the `gate` and `scan` commands.
//!
//! Reports go to stdout; logs go to stderr, so JSON output stays parseable.

pub mod drift;
pub mod gate;

use std::str::FromStr;

use crate::error::Error;

pub use drift::DriftSummary;
pub use gate::GateSummary;

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// GitHub-flavoured markdown.
    #[default]
    Markdown,
    /// Plain text.
    Text,
    /// Compact JSON.
    Json,
}

impl ReportFormat {
    /// Picks the flag value, then the config file value, then markdown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the chosen value is unknown.
    pub fn resolve(flag: Option<&str>, file: Option<&str>) -> Result<Self, Error> {
        flag.or(file).map_or(Ok(Self::default()), str::parse)
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "md" | "markdown" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}
