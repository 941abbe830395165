use query_console_api::query_console::domain::{
    model::enums::backend_kind::BackendKind,
    services::statement_classifier::{classify, enforce_limit, statement_hash},
};

#[test]
fn drop_is_a_dangerous_write() {
    let classification = classify(BackendKind::Relational, "  DROP TABLE x");

    assert!(classification.is_write);
    assert!(classification.is_dangerous);
    assert_eq!(classification.action_name(), "query:write");
}

#[test]
fn select_with_where_is_a_read() {
    let classification = classify(BackendKind::Relational, "select * from t where id=1");

    assert!(!classification.is_write);
    assert!(!classification.is_dangerous);
    assert!(classification.has_where);
    assert_eq!(classification.action_name(), "query:read");
}

#[test]
fn update_without_where_is_detected() {
    let classification = classify(BackendKind::Relational, "update t set a=1");

    assert!(classification.is_write);
    assert!(!classification.is_dangerous);
    assert!(!classification.has_where);
}

#[test]
fn where_detection_is_textual() {
    let literal = classify(
        BackendKind::Relational,
        "delete from notes where_clause_column = 'x'",
    );
    let quoted = classify(
        BackendKind::Relational,
        "update notes set body = 'somewhere WHERE else'",
    );

    assert!(!literal.has_where);
    assert!(quoted.has_where);
}

#[test]
fn document_writes_follow_action_field() {
    assert!(classify(BackendKind::Document, r#"{"action":"insert","collection":"users"}"#).is_write);
    assert!(classify(BackendKind::Document, r#"{"action":"DELETE","collection":"users"}"#).is_write);
    assert!(!classify(BackendKind::Document, r#"{"action":"find","collection":"users"}"#).is_write);
    assert!(!classify(BackendKind::Document, "db.users.drop()").is_write);
    assert!(!classify(BackendKind::Document, r#"{"action":"drop"}"#).is_dangerous);
}

#[test]
fn enforce_limit_appends_cap_once() {
    assert_eq!(
        enforce_limit("SELECT * FROM t ", 50),
        "SELECT * FROM t LIMIT 50"
    );
    assert_eq!(
        enforce_limit("SELECT * FROM t LIMIT 5", 50),
        "SELECT * FROM t LIMIT 5"
    );
    assert_eq!(enforce_limit("SELECT * FROM t", 0), "SELECT * FROM t");
}

#[test]
fn statement_hash_is_stable_hex_digest() {
    let first = statement_hash("select 1");

    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(first, statement_hash("select 1"));
    assert_ne!(first, statement_hash("select 2"));
}
