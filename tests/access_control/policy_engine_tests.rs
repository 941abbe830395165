use query_console_api::access_control::{
    domain::{
        model::entities::policy_document::PolicyRuleConditions,
        services::policy_engine::{PolicyEngine, resource_pattern_matches},
    },
    infrastructure::persistence::repositories::policy_document_repository::PolicyDocumentRecord,
};

use crate::support::{allow_rule, deny_rule, document, with_conditions};

fn engine(records: Vec<PolicyDocumentRecord>) -> PolicyEngine {
    PolicyEngine::new(records.into_iter().map(|r| r.document).collect())
}

#[test]
fn unmatched_request_is_denied_without_constraints() {
    let engine = engine(vec![document(
        "readers",
        vec![allow_rule(&["query:read"], &["connection/c1/*"])],
    )]);

    let evaluation = engine.evaluate("query:write", "connection/c1/db/public", "dev");

    assert!(!evaluation.allowed);
    assert_eq!(evaluation.constraints.max_rows, 0);
    assert!(!evaluation.constraints.read_only);
}

#[test]
fn matching_rules_merge_constraints_keeping_smallest_caps() {
    let engine = engine(vec![
        document(
            "broad",
            vec![with_conditions(
                allow_rule(&["query:read"], &["*"]),
                PolicyRuleConditions {
                    max_rows: Some(500),
                    timeout_ms: Some(30_000),
                    ..PolicyRuleConditions::default()
                },
            )],
        ),
        document(
            "narrow",
            vec![
                with_conditions(
                    allow_rule(&["QUERY:READ"], &["connection/c1/*"]),
                    PolicyRuleConditions {
                        max_rows: Some(100),
                        require_where: Some(true),
                        ..PolicyRuleConditions::default()
                    },
                ),
                with_conditions(
                    allow_rule(&["query:read"], &["connection/c1/db/*"]),
                    PolicyRuleConditions {
                        max_rows: Some(0),
                        read_only: Some(true),
                        ..PolicyRuleConditions::default()
                    },
                ),
            ],
        ),
    ]);

    let evaluation = engine.evaluate("query:read", "connection/c1/db/public", "prod");

    assert!(evaluation.allowed);
    assert_eq!(evaluation.constraints.max_rows, 100);
    assert_eq!(evaluation.constraints.timeout_ms, 30_000);
    assert!(evaluation.constraints.require_where);
    assert!(evaluation.constraints.read_only);
}

#[test]
fn environment_condition_restricts_rule() {
    let engine = engine(vec![document(
        "prod-only",
        vec![with_conditions(
            allow_rule(&["query:write"], &["connection/*"]),
            PolicyRuleConditions {
                environment: vec!["PROD".to_string()],
                ..PolicyRuleConditions::default()
            },
        )],
    )]);

    assert!(engine.evaluate("query:write", "connection/c1", "prod").allowed);
    assert!(!engine.evaluate("query:write", "connection/c1", "staging").allowed);
    assert!(!engine.evaluate("query:write", "connection/c1", "").allowed);
}

#[test]
fn deny_rules_never_grant() {
    let engine = engine(vec![document(
        "deny",
        vec![deny_rule(&["query:read"], &["*"])],
    )]);

    assert!(engine.has_rules());
    assert!(!engine.evaluate("query:read", "connection/c1", "dev").allowed);
}

#[test]
fn engine_without_rules_reports_no_policy() {
    assert!(!engine(vec![]).has_rules());
    assert!(!engine(vec![document("empty", vec![])]).has_rules());
}

#[test]
fn resource_patterns_glob_per_segment() {
    assert!(resource_pattern_matches("*", "connection/c1/db/public"));
    assert!(resource_pattern_matches("**", "connection/c1"));
    assert!(resource_pattern_matches(
        "connection/c1/db/*",
        "connection/c1/db/public/entity/users"
    ));
    assert!(resource_pattern_matches("connection/*/db/public", "connection/abc/db/public"));
    assert!(resource_pattern_matches("connection/c1/db/pub*", "connection/c1/db/public"));
    assert!(resource_pattern_matches("connection/**/db/*", "connection/c9/db/x"));

    assert!(!resource_pattern_matches("connection/c1/*", "connection/c1"));
    assert!(!resource_pattern_matches("connection/c1", "connection/c2"));
    assert!(!resource_pattern_matches("connection/*/db", "connection/c1/db/public"));
}
