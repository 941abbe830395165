use serde::Serialize;

use crate::access_control::domain::model::entities::policy_document::PolicyRuleConditions;

/// Execution restrictions merged from every matching allow rule.
///
/// Booleans are OR-ed, numeric caps keep the smallest non-zero value seen.
/// Zero means unconstrained.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConstraints {
    pub require_where: bool,
    pub read_only: bool,
    pub max_rows: u32,
    pub timeout_ms: u64,
}

impl PolicyConstraints {
    pub fn merge(&mut self, conditions: &PolicyRuleConditions) {
        if conditions.require_where == Some(true) {
            self.require_where = true;
        }
        if conditions.read_only == Some(true) {
            self.read_only = true;
        }
        if let Some(max_rows) = conditions.max_rows {
            self.max_rows = min_non_zero(self.max_rows, max_rows);
        }
        if let Some(timeout_ms) = conditions.timeout_ms {
            self.timeout_ms = min_non_zero(self.timeout_ms, timeout_ms);
        }
    }
}

fn min_non_zero<T: Copy + Ord + Default>(current: T, candidate: T) -> T {
    let zero = T::default();
    if candidate == zero {
        current
    } else if current == zero {
        candidate
    } else {
        current.min(candidate)
    }
}
