//! Destructive change gate report.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::ReportFormat;
use crate::error::Error;
use crate::plan::ClassifiedStats;

/// Machine-readable gate summary.
///
/// `total` is the number of drifted resources, not the number of records in
/// the plan. `destructive` is present only when the caller asked for the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSummary {
    /// Update count.
    pub updates: usize,
    /// Replace count.
    pub replaces: usize,
    /// Delete count.
    pub deletes: usize,
    /// Deletes plus replaces.
    pub destructive_total: usize,
    /// Destructive addresses in plan order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive: Option<Vec<String>>,
    /// Number of drifted resources.
    pub total: usize,
}

impl GateSummary {
    /// Builds the summary, attaching the destructive address list if `list`.
    #[must_use]
    pub fn from_stats(stats: &ClassifiedStats, list: bool) -> Self {
        Self {
            updates: stats.updates,
            replaces: stats.replaces,
            deletes: stats.deletes,
            destructive_total: stats.destructive_total(),
            destructive: list.then(|| stats.destructive_addresses.clone()),
            total: stats.drift_count(),
        }
    }

    /// Renders the summary in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if JSON serialization fails.
    pub fn render(&self, format: ReportFormat) -> Result<String, Error> {
        Ok(match format {
            ReportFormat::Markdown => self.to_markdown(),
            ReportFormat::Text => self.to_text(),
            ReportFormat::Json => serde_json::to_string(self)?,
        })
    }

    fn listed(&self) -> &[String] {
        self.destructive.as_deref().unwrap_or_default()
    }

    /// Markdown rendering.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut s = String::from("## Destructive Change Gate\n\n");
        let _ = writeln!(s, "- **Updates**: {}", self.updates);
        let _ = writeln!(s, "- **Replaces**: {}", self.replaces);
        let _ = writeln!(s, "- **Deletes**: {}", self.deletes);
        let _ = writeln!(s, "- **Destructive total (delete+replace)**: {}", self.destructive_total);
        let _ = writeln!(s, "- **Total changed resources in plan**: {}", self.total);
        if !self.listed().is_empty() {
            s.push_str("\n### Destructive Resources\n\n");
            for addr in self.listed() {
                let _ = writeln!(s, "- `{addr}`");
            }
        }
        s
    }

    /// Plain-text rendering.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut s = String::from("Destructive Change Gate\n");
        let _ = writeln!(s, "Updates: {}", self.updates);
        let _ = writeln!(s, "Replaces: {}", self.replaces);
        let _ = writeln!(s, "Deletes: {}", self.deletes);
        let _ = writeln!(s, "Destructive total (delete+replace): {}", self.destructive_total);
        let _ = writeln!(s, "Total changed resources in plan: {}", self.total);
        if !self.listed().is_empty() {
            s.push_str("\nDestructive Resources:\n");
            for addr in self.listed() {
                let _ = writeln!(s, "- {addr}");
            }
        }
        s
    }
}
