//! Drift summary report produced by `scan`.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::ReportFormat;
use crate::error::Error;
use crate::plan::ClassifiedStats;
use crate::runner::RunnerKind;

/// Machine-readable drift summary. `total == drifted.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSummary {
    /// Update count.
    pub updates: usize,
    /// Replace count.
    pub replaces: usize,
    /// Delete count.
    pub deletes: usize,
    /// Drifted addresses in plan order.
    pub drifted: Vec<String>,
    /// Number of drifted resources.
    pub total: usize,
}

impl DriftSummary {
    /// Builds the summary from classified stats.
    #[must_use]
    pub fn from_stats(stats: &ClassifiedStats) -> Self {
        Self {
            updates: stats.updates,
            replaces: stats.replaces,
            deletes: stats.deletes,
            drifted: stats.drifted_addresses.clone(),
            total: stats.drift_count(),
        }
    }

    /// Renders the summary; `runner` appears in the markdown and text headers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if JSON serialization fails.
    pub fn render(&self, format: ReportFormat, runner: RunnerKind) -> Result<String, Error> {
        Ok(match format {
            ReportFormat::Markdown => self.to_markdown(runner),
            ReportFormat::Text => self.to_text(runner),
            ReportFormat::Json => serde_json::to_string(self)?,
        })
    }

    /// Markdown rendering.
    #[must_use]
    pub fn to_markdown(&self, runner: RunnerKind) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "## Drift Summary ({runner})\n");
        let _ = writeln!(s, "- **Updates**: {}", self.updates);
        let _ = writeln!(s, "- **Replaces**: {}", self.replaces);
        let _ = writeln!(s, "- **Deletes**: {}", self.deletes);
        let _ = writeln!(s, "- **Total changed resources**: {}\n", self.total);

        if self.drifted.is_empty() {
            s.push_str("_No drift detected._\n");
        } else {
            s.push_str("### Drifted Resources\n\n");
            for addr in &self.drifted {
                let _ = writeln!(s, "- `{addr}`");
            }
            s.push('\n');
        }
        s
    }

    /// Plain-text rendering.
    #[must_use]
    pub fn to_text(&self, runner: RunnerKind) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "Drift Summary ({runner})");
        let _ = writeln!(s, "Updates: {}", self.updates);
        let _ = writeln!(s, "Replaces: {}", self.replaces);
        let _ = writeln!(s, "Deletes: {}", self.deletes);
        let _ = writeln!(s, "Total changed resources: {}", self.total);

        if self.drifted.is_empty() {
            s.push_str("\nNo drift detected.\n");
        } else {
            s.push_str("\nDrifted Resources:\n");
            for addr in &self.drifted {
                let _ = writeln!(s, "- {addr}");
            }
        }
        s
    }
}
