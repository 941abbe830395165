use query_console_api::access_control::domain::{
    model::{
        commands::{
            assign_role_to_principal_command::{AssignRoleToPrincipalCommand, RoleBindingTarget},
            upsert_policy_document_command::UpsertPolicyDocumentCommand,
            upsert_role_command::UpsertRoleCommand,
        },
        enums::access_control_domain_error::AccessControlDomainError,
    },
    services::access_control_command_service::AccessControlCommandService,
};
use serde_json::json;

use crate::support::{PRINCIPAL_ID, create_command_harness};

#[tokio::test]
async fn upsert_policy_document_refreshes_snapshot() {
    let harness = create_command_harness();
    assert!(!harness.policy_snapshot.current().await.has_rules());

    let command = UpsertPolicyDocumentCommand::new(
        "analysts".to_string(),
        json!({
            "version": "1",
            "rules": [{
                "effect": "allow",
                "actions": ["query:read"],
                "resources": ["connection/*"],
                "conditions": { "maxRows": 50 }
            }]
        }),
    )
    .expect("valid command");

    harness
        .service
        .handle_upsert_policy_document(command)
        .await
        .expect("upsert");

    assert_eq!(harness.policy_repository.upsert_calls(), 1);
    let engine = harness.policy_snapshot.current().await;
    let evaluation = engine.evaluate("query:read", "connection/c1", "dev");
    assert!(evaluation.allowed);
    assert_eq!(evaluation.constraints.max_rows, 50);
}

#[tokio::test]
async fn upsert_policy_document_succeeds_when_refresh_fails() {
    let harness = create_command_harness();
    harness.policy_repository.fail_listing(true);

    let command = UpsertPolicyDocumentCommand::new(
        "analysts".to_string(),
        json!({ "rules": [{ "effect": "allow", "actions": ["query:read"], "resources": ["*"] }] }),
    )
    .expect("valid command");

    harness
        .service
        .handle_upsert_policy_document(command)
        .await
        .expect("upsert");

    assert_eq!(harness.policy_repository.upsert_calls(), 1);
    assert!(!harness.policy_snapshot.current().await.has_rules());
}

#[test]
fn policy_document_with_unknown_effect_is_rejected() {
    let result = UpsertPolicyDocumentCommand::new(
        "broken".to_string(),
        json!({ "rules": [{ "effect": "maybe", "actions": ["query:read"], "resources": ["*"] }] }),
    );

    assert!(matches!(
        result,
        Err(AccessControlDomainError::InvalidPolicyDocument(_))
    ));
}

#[tokio::test]
async fn upsert_role_stores_permissions() {
    let harness = create_command_harness();

    let command = UpsertRoleCommand::new(
        "analyst".to_string(),
        vec!["query:read".to_string(), "connection:*".to_string()],
    )
    .expect("valid command");

    harness
        .service
        .handle_upsert_role(command)
        .await
        .expect("upsert role");

    let roles = harness.role_repository.upserted_roles();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "analyst");
    assert_eq!(roles[0].permissions, vec!["query:read", "connection:*"]);
}

#[tokio::test]
async fn assign_role_to_group_passes_binding_target() {
    let harness = create_command_harness();

    let command =
        AssignRoleToPrincipalCommand::new(None, Some(" data-team ".to_string()), "analyst".to_string())
            .expect("valid command");

    harness
        .service
        .handle_assign_role(command)
        .await
        .expect("assign role");

    assert_eq!(harness.role_repository.assign_calls(), 1);
    assert_eq!(
        harness.role_repository.last_target(),
        Some(RoleBindingTarget::Group("data-team".to_string()))
    );
}

#[test]
fn role_binding_requires_exactly_one_target() {
    let both = AssignRoleToPrincipalCommand::new(
        Some(PRINCIPAL_ID.to_string()),
        Some("data-team".to_string()),
        "analyst".to_string(),
    );
    let neither = AssignRoleToPrincipalCommand::new(None, None, "analyst".to_string());

    assert!(matches!(both, Err(AccessControlDomainError::InvalidRoleBinding)));
    assert!(matches!(neither, Err(AccessControlDomainError::InvalidRoleBinding)));
}

#[test]
fn role_names_are_normalized_identifiers() {
    let command = UpsertRoleCommand::new(" Data.Analyst ".to_string(), vec![]).expect("valid role");

    assert_eq!(command.role_name().value(), "data.analyst");
    assert!(matches!(
        UpsertRoleCommand::new("data analyst".to_string(), vec![]),
        Err(AccessControlDomainError::InvalidRoleName)
    ));
}
