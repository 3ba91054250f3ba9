//! Policy gate: turns classified counts plus a [`Policy`] into a [`Verdict`].
//!
//! Evaluation is pure. A failing verdict is a normal outcome, not an error.

use std::fmt;

use crate::plan::ClassifiedStats;

/// Gate configuration for a single invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// When `false` the gate is advisory and never demands a failing exit.
    pub strict: bool,
    /// Maximum allowed deletes; `None` is unbounded.
    pub max_deletes: Option<usize>,
    /// Maximum allowed replaces; `None` is unbounded.
    pub max_replaces: Option<usize>,
    /// Treat any drift, including plain updates, as a fail condition.
    pub fail_on_updates: bool,
}

impl Policy {
    /// Converts a raw command-line ceiling into an optional bound.
    /// Negative values mean unbounded.
    #[must_use]
    pub fn ceiling(raw: i64) -> Option<usize> {
        usize::try_from(raw).ok()
    }
}

/// Why a strict gate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    /// A configured ceiling was exceeded.
    ThresholdExceeded,
    /// At least one delete or replace is present.
    DestructivePresent,
    /// Drift is present and the policy fails on any drift.
    DriftPresent,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ThresholdExceeded => "threshold exceeded",
            Self::DestructivePresent => "destructive changes present",
            Self::DriftPresent => "drift detected",
        })
    }
}

/// Result of evaluating a policy against classified stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// `deletes > 0 || replaces > 0`.
    pub destructive_present: bool,
    /// A configured ceiling was strictly exceeded.
    pub threshold_exceeded: bool,
    /// Any update, delete or replace is present.
    pub drift_present: bool,
    /// The caller must exit with the policy-fail status.
    pub should_fail: bool,
}

impl Verdict {
    /// The most specific reason for failing, if the verdict fails.
    #[must_use]
    pub fn reason(&self) -> Option<FailReason> {
        if !self.should_fail {
            None
        } else if self.threshold_exceeded {
            Some(FailReason::ThresholdExceeded)
        } else if self.destructive_present {
            Some(FailReason::DestructivePresent)
        } else {
            Some(FailReason::DriftPresent)
        }
    }
}

/// Evaluates `policy` against `stats`.
///
/// Ceilings compare strictly greater-than, so a ceiling of `0` rejects a
/// single change of that kind.
#[must_use]
pub fn evaluate(stats: &ClassifiedStats, policy: &Policy) -> Verdict {
    let exceeds = |count: usize, ceiling: Option<usize>| ceiling.is_some_and(|max| count > max);

    let destructive_present = stats.deletes > 0 || stats.replaces > 0;
    let threshold_exceeded =
        exceeds(stats.deletes, policy.max_deletes) || exceeds(stats.replaces, policy.max_replaces);
    let drift_present = stats.has_drift();
    let should_fail = policy.strict
        && (destructive_present || threshold_exceeded || (policy.fail_on_updates && drift_present));

    Verdict { destructive_present, threshold_exceeded, drift_present, should_fail }
}
