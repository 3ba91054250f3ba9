//! Plan parsing and change classification.
//!
//! A plan is the JSON document emitted by `terraform show -json` or
//! `tofu show -json`. Classification reduces its `resource_changes` to counts
//! of updates, deletes and replaces plus the addresses behind them.

pub mod classify;
pub mod document;

pub use classify::{classify, classify_records, ChangeKind, ClassifiedStats};
pub use document::{parse_plan, Action, MalformedPlanError, PlanDocument, ResourceChangeRecord};
