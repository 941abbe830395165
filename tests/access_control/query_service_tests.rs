use query_console_api::access_control::domain::{
    model::entities::policy_document::PolicyRuleConditions,
    services::access_control_query_service::AccessControlQueryService,
};

use crate::support::{
    PRINCIPAL_ID, admin_authorize_query, allow_rule, authorize_query, create_query_harness,
    document, role, with_conditions,
};

#[tokio::test]
async fn admin_bypasses_roles_and_policies() {
    let harness = create_query_harness();

    let decision = harness
        .service
        .handle_authorize(admin_authorize_query("query:write", "connection/c1"))
        .await
        .expect("authorize");

    assert!(decision.allowed);
    assert_eq!(decision.reason, "admin bypass");
    assert_eq!(harness.role_repository.find_calls(), 0);

    let events = harness.audit_repository.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].allowed);
    assert_eq!(events[0].principal_id.to_string(), PRINCIPAL_ID);
}

#[tokio::test]
async fn role_gate_denies_before_policy_evaluation() {
    let harness = create_query_harness();
    harness
        .role_repository
        .set_roles(vec![role("viewer", &["connection:read"])]);
    harness.policy_repository.set_documents(vec![document(
        "open",
        vec![allow_rule(&["query:write"], &["*"])],
    )]);
    harness.policy_snapshot.refresh().await.expect("refresh");

    let decision = harness
        .service
        .handle_authorize(authorize_query("query:write", "connection/c1", "dev"))
        .await
        .expect("authorize");

    assert!(!decision.allowed);
    assert_eq!(decision.reason, "role gate denied");

    let events = harness.audit_repository.events();
    assert_eq!(events.len(), 1);
    assert!(!events[0].allowed);
    assert_eq!(events[0].request_id.as_deref(), Some("req-1"));
}

#[tokio::test]
async fn missing_policy_allows_after_role_gate() {
    let harness = create_query_harness();
    harness
        .role_repository
        .set_roles(vec![role("analyst", &["query:*"])]);

    let decision = harness
        .service
        .handle_authorize(authorize_query("query:read", "connection/c1", "dev"))
        .await
        .expect("authorize");

    assert!(decision.allowed);
    assert_eq!(decision.reason, "no policy configured");
    assert_eq!(decision.constraints.max_rows, 0);
}

#[tokio::test]
async fn matching_rule_returns_merged_constraints() {
    let harness = create_query_harness();
    harness
        .role_repository
        .set_roles(vec![role("analyst", &["query:read"])]);
    harness.policy_repository.set_documents(vec![document(
        "analysts",
        vec![with_conditions(
            allow_rule(&["query:read"], &["connection/c1/*"]),
            PolicyRuleConditions {
                max_rows: Some(250),
                read_only: Some(true),
                ..PolicyRuleConditions::default()
            },
        )],
    )]);
    harness.policy_snapshot.refresh().await.expect("refresh");

    let decision = harness
        .service
        .handle_authorize(authorize_query(
            "query:read",
            "connection/c1/db/public",
            "prod",
        ))
        .await
        .expect("authorize");

    assert!(decision.allowed);
    assert_eq!(decision.reason, "allow rule matched");
    assert_eq!(decision.constraints.max_rows, 250);
    assert!(decision.constraints.read_only);

    let events = harness.audit_repository.events();
    assert_eq!(events[0].constraints, decision.constraints);
    assert_eq!(events[0].environment, "prod");
}

#[tokio::test]
async fn unmatched_policy_denies() {
    let harness = create_query_harness();
    harness
        .role_repository
        .set_roles(vec![role("analyst", &["query:read"])]);
    harness.policy_repository.set_documents(vec![document(
        "analysts",
        vec![allow_rule(&["query:read"], &["connection/c1/*"])],
    )]);
    harness.policy_snapshot.refresh().await.expect("refresh");

    let decision = harness
        .service
        .handle_authorize(authorize_query("query:read", "connection/c2/db/x", "dev"))
        .await
        .expect("authorize");

    assert!(!decision.allowed);
    assert_eq!(decision.reason, "no matching policy rule");
    assert_eq!(harness.audit_repository.events().len(), 1);
}

#[tokio::test]
async fn names_with_spaces_are_matched_like_any_other_identifier() {
    let harness = create_query_harness();
    harness
        .role_repository
        .set_roles(vec![role("analyst", &["query:read"])]);
    harness.policy_repository.set_documents(vec![document(
        "east",
        vec![with_conditions(
            allow_rule(&["query:read"], &["connection/c1/db/public/entity/*"]),
            PolicyRuleConditions {
                environment: vec!["Prod East".to_string()],
                ..PolicyRuleConditions::default()
            },
        )],
    )]);
    harness.policy_snapshot.refresh().await.expect("refresh");

    let decision = harness
        .service
        .handle_authorize(authorize_query(
            "query:read",
            "connection/c1/db/public/entity/Order Items",
            " prod east ",
        ))
        .await
        .expect("authorize");

    assert!(decision.allowed);
    assert_eq!(decision.reason, "allow rule matched");
    assert_eq!(harness.audit_repository.events()[0].environment, "prod east");
}
