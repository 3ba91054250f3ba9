//! Change classification: maps each resource's action list to a
//! [`ChangeKind`] and aggregates the results into [`ClassifiedStats`].

use tracing::debug;

use super::document::{parse_plan, Action, MalformedPlanError, ResourceChangeRecord};

/// Semantic category of a single resource change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Nothing to do (`[]` or `[no-op]`).
    NoOp,
    /// In-place update (`[update]`).
    Update,
    /// Removal (`[delete]`).
    Delete,
    /// Destroy-and-recreate (`[create, delete]` in either order).
    Replace,
    /// Any other combination, e.g. a lone `create` or `read`. Not drift.
    Unrecognized,
}

impl ChangeKind {
    /// Classifies an ordered action list.
    #[must_use]
    pub fn from_actions(actions: &[Action]) -> Self {
        match actions {
            [] | [Action::NoOp] => Self::NoOp,
            [Action::Update] => Self::Update,
            [Action::Delete] => Self::Delete,
            [Action::Create, Action::Delete] | [Action::Delete, Action::Create] => Self::Replace,
            _ => Self::Unrecognized,
        }
    }

    /// Returns `true` for updates, deletes and replaces.
    #[must_use]
    pub fn is_drift(self) -> bool {
        matches!(self, Self::Update | Self::Delete | Self::Replace)
    }

    /// Returns `true` for deletes and replaces.
    #[must_use]
    pub fn is_destructive(self) -> bool {
        matches!(self, Self::Delete | Self::Replace)
    }
}

/// Aggregate classification of a whole plan.
///
/// `drifted_addresses.len() == updates + deletes + replaces`, and
/// `destructive_addresses` is the ordered sub-sequence of `drifted_addresses`
/// that came from delete or replace records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedStats {
    /// Number of `[update]` records.
    pub updates: usize,
    /// Number of `[delete]` records.
    pub deletes: usize,
    /// Number of replace records.
    pub replaces: usize,
    /// Addresses of every update, delete or replace, in plan order.
    pub drifted_addresses: Vec<String>,
    /// Addresses of every delete or replace, in plan order.
    pub destructive_addresses: Vec<String>,
    /// Number of records in the plan regardless of classification.
    pub total_resources: usize,
}

impl ClassifiedStats {
    /// Number of drifted resources.
    #[must_use]
    pub fn drift_count(&self) -> usize {
        self.drifted_addresses.len()
    }

    /// Deletes plus replaces.
    #[must_use]
    pub fn destructive_total(&self) -> usize {
        self.deletes + self.replaces
    }

    /// Returns `true` if any record classified as drift.
    #[must_use]
    pub fn has_drift(&self) -> bool {
        self.updates > 0 || self.deletes > 0 || self.replaces > 0
    }

    fn record(&mut self, kind: ChangeKind, address: &str) {
        match kind {
            ChangeKind::Update => self.updates += 1,
            ChangeKind::Delete => self.deletes += 1,
            ChangeKind::Replace => self.replaces += 1,
            ChangeKind::NoOp | ChangeKind::Unrecognized => return,
        }
        self.drifted_addresses.push(address.to_string());
        if kind.is_destructive() {
            self.destructive_addresses.push(address.to_string());
        }
    }
}

/// Classifies already-parsed records, preserving their order.
#[must_use]
pub fn classify_records(records: &[ResourceChangeRecord]) -> ClassifiedStats {
    let mut stats =
        ClassifiedStats { total_resources: records.len(), ..ClassifiedStats::default() };
    for rc in records {
        stats.record(ChangeKind::from_actions(rc.actions()), rc.address());
    }
    stats
}

/// Parses plan JSON and classifies every resource change.
///
/// # Errors
///
/// Returns [`MalformedPlanError`] if the document does not have the expected
/// shape. No partial stats are produced.
pub fn classify(plan_json: &[u8]) -> Result<ClassifiedStats, MalformedPlanError> {
    let doc = parse_plan(plan_json).inspect_err(|err| debug!(%err, "rejecting plan document"))?;
    Ok(classify_records(doc.records()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rc(address: &str, actions: &[Action]) -> ResourceChangeRecord {
        ResourceChangeRecord::new(address, actions.to_vec())
    }

    #[test]
    fn maps_every_action_shape() {
        use Action::{Create, Delete, NoOp, Read, Unknown, Update};

        assert_eq!(ChangeKind::from_actions(&[]), ChangeKind::NoOp);
        assert_eq!(ChangeKind::from_actions(&[NoOp]), ChangeKind::NoOp);
        assert_eq!(ChangeKind::from_actions(&[Update]), ChangeKind::Update);
        assert_eq!(ChangeKind::from_actions(&[Delete]), ChangeKind::Delete);
        assert_eq!(ChangeKind::from_actions(&[Create, Delete]), ChangeKind::Replace);
        assert_eq!(ChangeKind::from_actions(&[Delete, Create]), ChangeKind::Replace);
        assert_eq!(ChangeKind::from_actions(&[Create]), ChangeKind::Unrecognized);
        assert_eq!(ChangeKind::from_actions(&[Read]), ChangeKind::Unrecognized);
        assert_eq!(ChangeKind::from_actions(&[Unknown]), ChangeKind::Unrecognized);
        assert_eq!(ChangeKind::from_actions(&[Delete, Delete]), ChangeKind::Unrecognized);
        assert_eq!(ChangeKind::from_actions(&[Create, Delete, Update]), ChangeKind::Unrecognized);
    }

    #[test]
    fn empty_plan_has_zero_stats() {
        let stats = classify(br#"{"resource_changes": []}"#).unwrap();
        assert_eq!(stats, ClassifiedStats::default());
    }

    #[test]
    fn empty_actions_only_count_toward_total() {
        let stats = classify_records(&[rc("a", &[]), rc("b", &[])]);
        assert_eq!(stats.drift_count(), 0);
        assert!(stats.destructive_addresses.is_empty());
        assert_eq!(stats.total_resources, 2);
    }

    #[test]
    fn update_delete_replace_plan() {
        let stats = classify_records(&[
            rc("aws_instance.web", &[Action::Update]),
            rc("aws_s3_bucket.logs", &[Action::Delete]),
            rc("aws_db_instance.main", &[Action::Create, Action::Delete]),
        ]);

        assert_eq!((stats.updates, stats.deletes, stats.replaces), (1, 1, 1));
        assert_eq!(stats.drift_count(), 3);
        assert_eq!(stats.destructive_addresses, vec!["aws_s3_bucket.logs", "aws_db_instance.main"]);
        assert_eq!(stats.destructive_total(), 2);
        assert_eq!(stats.total_resources, 3);
    }

    #[test]
    fn lone_create_is_not_drift() {
        let stats = classify_records(&[rc("aws_iam_role.new", &[Action::Create])]);
        assert_eq!((stats.updates, stats.deletes, stats.replaces), (0, 0, 0));
        assert!(stats.drifted_addresses.is_empty());
        assert!(stats.destructive_addresses.is_empty());
        assert!(!stats.has_drift());
        assert_eq!(stats.total_resources, 1);
    }

    #[test]
    fn replace_is_order_independent() {
        let a = classify_records(&[rc("x", &[Action::Delete, Action::Create])]);
        let b = classify_records(&[rc("x", &[Action::Create, Action::Delete])]);
        assert_eq!(a.replaces, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_plan_yields_error() {
        assert!(classify(b"{").is_err());
        assert!(classify(b"42").is_err());
    }

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::NoOp),
            Just(Action::Create),
            Just(Action::Read),
            Just(Action::Update),
            Just(Action::Delete),
            Just(Action::Unknown),
        ]
    }

    fn records_strategy() -> impl Strategy<Value = Vec<ResourceChangeRecord>> {
        prop::collection::vec(prop::collection::vec(action_strategy(), 0..4), 0..40).prop_map(
            |lists| {
                lists
                    .into_iter()
                    .enumerate()
                    .map(|(i, actions)| ResourceChangeRecord::new(format!("res.r{i}"), actions))
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn drift_count_matches_kind_counts(records in records_strategy()) {
            let stats = classify_records(&records);
            prop_assert_eq!(stats.drift_count(), stats.updates + stats.deletes + stats.replaces);
            prop_assert_eq!(stats.destructive_addresses.len(), stats.destructive_total());
            prop_assert_eq!(stats.total_resources, records.len());
        }

        #[test]
        fn destructive_is_ordered_subsequence_of_drifted(records in records_strategy()) {
            let stats = classify_records(&records);
            let expected: Vec<String> = stats
                .drifted_addresses
                .iter()
                .filter(|addr| {
                    records
                        .iter()
                        .find(|r| r.address() == addr.as_str())
                        .is_some_and(|r| ChangeKind::from_actions(r.actions()).is_destructive())
                })
                .cloned()
                .collect();
            prop_assert_eq!(&stats.destructive_addresses, &expected);
        }

        #[test]
        fn drifted_addresses_follow_plan_order(records in records_strategy()) {
            let stats = classify_records(&records);
            let expected: Vec<String> = records
                .iter()
                .filter(|r| ChangeKind::from_actions(r.actions()).is_drift())
                .map(|r| r.address().to_string())
                .collect();
            prop_assert_eq!(stats.drifted_addresses, expected);
        }
    }
}
