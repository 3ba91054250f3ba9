//! Plan document types and parsing.
//!
//! Only the parts of `show -json` output that classification needs are
//! modelled. Unknown keys are ignored so that newer plan format versions keep
//! parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single action token from a resource change's `change.actions` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// `no-op`
    NoOp,
    /// `create`
    Create,
    /// `read`
    Read,
    /// `update`
    Update,
    /// `delete`
    Delete,
    /// Any token outside the known vocabulary.
    #[serde(other)]
    Unknown,
}

/// The `change` object of a resource change record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDetail {
    /// Ordered action tokens. `null` and absent are both treated as empty.
    #[serde(default)]
    pub actions: Option<Vec<Action>>,
}

/// One entry of the plan's `resource_changes` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChangeRecord {
    /// Resource address, unique within the plan.
    #[serde(default)]
    pub address: Option<String>,
    /// The proposed change.
    #[serde(default)]
    pub change: Option<ChangeDetail>,
}

impl ResourceChangeRecord {
    /// Builds a record from an address and its action list.
    #[must_use]
    pub fn new(address: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            address: Some(address.into()),
            change: Some(ChangeDetail { actions: Some(actions) }),
        }
    }

    /// Returns the resource address, or an empty string when absent.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or_default()
    }

    /// Returns the action tokens, or an empty slice when absent.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        self.change.as_ref().and_then(|c| c.actions.as_deref()).unwrap_or_default()
    }
}

/// A parsed plan document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Resource changes in plan declaration order. The provisioning tool omits
    /// the key entirely when the plan is empty.
    #[serde(default)]
    pub resource_changes: Option<Vec<ResourceChangeRecord>>,
}

impl PlanDocument {
    /// Returns the resource change records in declaration order.
    #[must_use]
    pub fn records(&self) -> &[ResourceChangeRecord] {
        self.resource_changes.as_deref().unwrap_or_default()
    }
}

/// The plan document could not be parsed into the expected shape.
#[derive(Debug, Error)]
pub enum MalformedPlanError {
    /// The input is not JSON at all.
    #[error("not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    /// The top-level JSON value is not an object.
    #[error("top-level value must be an object, found {found}")]
    NotAnObject {
        /// JSON type name of the value that was found.
        found: &'static str,
    },
    /// The object exists but a known field has the wrong type.
    #[error("unexpected plan shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Parses raw `show -json` output into a [`PlanDocument`].
///
/// # Errors
///
/// Returns [`MalformedPlanError`] when the bytes are not JSON, the top-level
/// value is not an object, or `resource_changes` (or a record inside it) does
/// not have the expected types. Unknown action tokens are not an error.
pub fn parse_plan(bytes: &[u8]) -> Result<PlanDocument, MalformedPlanError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(MalformedPlanError::Json)?;
    if !value.is_object() {
        return Err(MalformedPlanError::NotAnObject { found: json_type_name(&value) });
    }
    serde_json::from_value(value).map_err(MalformedPlanError::Shape)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
