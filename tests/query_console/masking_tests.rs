use query_console_api::query_console::domain::services::field_masking::{
    REDACTION_MARKER, applicable_rules, mask_document, mask_row, resource_matches,
};
use serde_json::{Value, json};

use crate::support::pii_rule;

#[test]
fn null_mask_clears_matching_column() {
    let rules = vec![pii_rule("connection/c1/db/*", "email", "null")];
    let applicable = applicable_rules(&rules, "connection/c1/db/public/entity/users");
    let columns = vec!["email".to_string(), "name".to_string()];
    let mut row = vec![json!("ada@example.com"), json!("Ada")];

    mask_row(&columns, &mut row, &applicable);

    assert_eq!(row, vec![Value::Null, json!("Ada")]);
}

#[test]
fn redact_mask_replaces_any_value_type() {
    let rules = vec![
        pii_rule("*", "EMAIL", "redact"),
        pii_rule("*", "salary", "hash"),
    ];
    let applicable = applicable_rules(&rules, "connection/c1/db/*");
    let columns = vec!["email".to_string(), "salary".to_string(), "id".to_string()];
    let mut row = vec![json!("ada@example.com"), json!(120000), json!(7)];

    mask_row(&columns, &mut row, &applicable);

    assert_eq!(
        row,
        vec![json!(REDACTION_MARKER), json!(REDACTION_MARKER), json!(7)]
    );
}

#[test]
fn document_keys_are_masked_exactly() {
    let rules = vec![
        pii_rule("*", "ssn", "null"),
        pii_rule("*", "Email", "redact"),
    ];
    let applicable = applicable_rules(&rules, "connection/c1/db/*");
    let mut document = json!({ "ssn": "123-45-6789", "email": "ada@example.com" })
        .as_object()
        .cloned()
        .expect("object");

    mask_document(&mut document, &applicable);

    assert_eq!(document.get("ssn"), Some(&Value::Null));
    assert_eq!(document.get("email"), Some(&json!("ada@example.com")));
}

#[test]
fn rules_for_other_resources_do_not_apply() {
    let rules = vec![pii_rule("connection/c2/*", "email", "null")];

    assert!(applicable_rules(&rules, "connection/c1/db/*").is_empty());
}

#[test]
fn resource_patterns() {
    assert!(resource_matches("*", "connection/c1/db/*"));
    assert!(resource_matches("CONNECTION/C1/DB/*", "connection/c1/db/*"));
    assert!(resource_matches("connection/c1/*", "connection/c1/db/public"));
    assert!(!resource_matches("connection/c1", "connection/c1/db/public"));
}
