use serde_json::{Map, Value};

use crate::query_console::domain::model::entities::pii_rule::PiiRule;

pub const REDACTION_MARKER: &str = "****";

/// Rules whose resource pattern covers `resource`.
pub fn applicable_rules<'a>(rules: &'a [PiiRule], resource: &str) -> Vec<&'a PiiRule> {
    rules
        .iter()
        .filter(|rule| resource_matches(&rule.resource, resource))
        .collect()
}

/// `*`, a case-insensitive exact match, or a `prefix/*` pattern whose prefix starts the resource.
pub fn resource_matches(pattern: &str, resource: &str) -> bool {
    if pattern == "*" || pattern.eq_ignore_ascii_case(resource) {
        return true;
    }

    pattern
        .strip_suffix("/*")
        .is_some_and(|prefix| resource.starts_with(prefix))
}

/// Masks a positional row in place. Column names are compared case-insensitively.
pub fn mask_row(columns: &[String], row: &mut [Value], rules: &[&PiiRule]) {
    for rule in rules {
        let Some(index) = columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(&rule.field))
        else {
            continue;
        };

        if let Some(value) = row.get_mut(index) {
            *value = masked_value(&rule.mask_type);
        }
    }
}

/// Masks top-level document keys in place. Keys are matched exactly.
pub fn mask_document(document: &mut Map<String, Value>, rules: &[&PiiRule]) {
    for rule in rules {
        if let Some(value) = document.get_mut(&rule.field) {
            *value = masked_value(&rule.mask_type);
        }
    }
}

fn masked_value(mask_type: &str) -> Value {
    if mask_type.eq_ignore_ascii_case("null") {
        Value::Null
    } else {
        Value::String(REDACTION_MARKER.to_string())
    }
}
