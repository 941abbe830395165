use chrono::{Duration, Utc};
use query_console_api::{
    config::feature_flags::FeatureFlags,
    query_console::domain::{
        model::{
            commands::submit_query_command::{SubmitQueryCommand, SubmitQueryCommandParts},
            enums::{backend_kind::BackendKind, query_console_domain_error::QueryConsoleDomainError},
            value_objects::{
                query_constraints::QueryConstraints, requester_identity::RequesterIdentity,
            },
        },
        services::query_submission_service::{QuerySubmissionService, SubmissionOutcome},
    },
};
use uuid::Uuid;

use crate::support::{
    CONNECTION_ID, GLOBAL_MAX_ROWS, admin_identity, create_harness, identity, stale_identity,
    submit_command,
};

fn step_up_flags() -> FeatureFlags {
    FeatureFlags {
        step_up_auth: true,
        ..FeatureFlags::default()
    }
}

#[tokio::test]
async fn accepted_read_creates_job_with_resolved_options() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Relational);
    harness.access_control_facade.set_constraints(QueryConstraints {
        max_rows: 250,
        ..QueryConstraints::default()
    });
    let requester = identity();

    let outcome = harness
        .submission_service
        .handle_submit(&requester, submit_command("select * from orders"))
        .await
        .expect("submit");

    let SubmissionOutcome::Ready { query_id } = outcome else {
        panic!("expected ready outcome");
    };
    let job = harness.job_registry.get(&query_id).await.expect("job stored");
    assert_eq!(job.user_id, requester.user_id);
    assert_eq!(job.action, "query:read");
    assert_eq!(job.resource, format!("connection/{CONNECTION_ID}/db/*"));
    assert_eq!(job.options.max_rows, 250);

    let requests = harness.access_control_facade.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].environment, "dev");
    assert_eq!(requests[0].action_name, "query:read");
}

#[tokio::test]
async fn unknown_connection_is_not_found() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Relational);
    let command = SubmitQueryCommand::new(SubmitQueryCommandParts {
        connection_id: Uuid::new_v4().to_string(),
        statement: "select 1".to_string(),
        approval_id: None,
        max_rows: None,
        timeout_ms: None,
    })
    .expect("valid command");

    let result = harness.submission_service.handle_submit(&identity(), command).await;

    assert!(matches!(result, Err(QueryConsoleDomainError::ConnectionNotFound)));
}

#[tokio::test]
async fn denied_authorization_creates_no_job() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Relational);
    harness.access_control_facade.deny_all();

    let result = harness
        .submission_service
        .handle_submit(&identity(), submit_command("select 1"))
        .await;

    assert!(matches!(result, Err(QueryConsoleDomainError::AccessDenied)));
    assert!(harness.job_registry.is_empty().await);
}

#[tokio::test]
async fn read_only_constraint_rejects_writes() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Relational);
    harness.access_control_facade.set_constraints(QueryConstraints {
        read_only: true,
        ..QueryConstraints::default()
    });

    let result = harness
        .submission_service
        .handle_submit(&identity(), submit_command("update orders set paid = true where id = 1"))
        .await;

    assert!(matches!(result, Err(QueryConsoleDomainError::ReadOnlyViolation)));
    assert!(harness.job_registry.is_empty().await);
}

#[tokio::test]
async fn require_where_rejects_unfiltered_relational_writes() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Relational);
    harness.access_control_facade.set_constraints(QueryConstraints {
        require_where: true,
        ..QueryConstraints::default()
    });

    let rejected = harness
        .submission_service
        .handle_submit(&identity(), submit_command("delete from orders"))
        .await;
    let accepted = harness
        .submission_service
        .handle_submit(&identity(), submit_command("delete from orders where id = 3"))
        .await;

    assert!(matches!(rejected, Err(QueryConsoleDomainError::WhereClauseRequired)));
    assert!(matches!(accepted, Ok(SubmissionOutcome::Ready { .. })));
}

#[tokio::test]
async fn require_where_does_not_apply_to_document_writes() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Document);
    harness.access_control_facade.set_constraints(QueryConstraints {
        require_where: true,
        ..QueryConstraints::default()
    });

    let outcome = harness
        .submission_service
        .handle_submit(
            &identity(),
            submit_command(r#"{"action":"delete","collection":"orders","filter":{}}"#),
        )
        .await;

    assert!(matches!(outcome, Ok(SubmissionOutcome::Ready { .. })));
    assert_eq!(harness.access_control_facade.requests()[0].action_name, "query:write");
}

#[tokio::test]
async fn dangerous_statements_require_admin() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Relational);

    let rejected = harness
        .submission_service
        .handle_submit(&identity(), submit_command("DROP TABLE orders"))
        .await;
    let accepted = harness
        .submission_service
        .handle_submit(&admin_identity(), submit_command("DROP TABLE orders"))
        .await;

    assert!(matches!(rejected, Err(QueryConsoleDomainError::DangerousStatement)));
    assert!(matches!(accepted, Ok(SubmissionOutcome::Ready { .. })));
}

#[tokio::test]
async fn stale_authentication_blocks_production_writes() {
    let harness = create_harness(step_up_flags(), "prod", BackendKind::Relational);

    let result = harness
        .submission_service
        .handle_submit(&stale_identity(30), submit_command("update orders set paid = true where id = 1"))
        .await;

    assert!(matches!(result, Err(QueryConsoleDomainError::StepUpRequired)));
    assert!(harness.job_registry.is_empty().await);
}

#[tokio::test]
async fn mfa_users_need_recent_mfa_for_production_writes() {
    let harness = create_harness(step_up_flags(), "production", BackendKind::Relational);
    let without_mfa = RequesterIdentity {
        mfa_enabled: true,
        last_mfa_at: None,
        ..identity()
    };
    let with_mfa = RequesterIdentity {
        mfa_enabled: true,
        last_mfa_at: Some(Utc::now() - Duration::minutes(1)),
        ..identity()
    };
    let statement = "update orders set paid = true where id = 1";

    let rejected = harness
        .submission_service
        .handle_submit(&without_mfa, submit_command(statement))
        .await;
    let accepted = harness
        .submission_service
        .handle_submit(&with_mfa, submit_command(statement))
        .await;

    assert!(matches!(rejected, Err(QueryConsoleDomainError::MfaStepUpRequired)));
    assert!(matches!(accepted, Ok(SubmissionOutcome::Ready { .. })));
}

#[tokio::test]
async fn step_up_ignores_reads_and_non_production_writes() {
    let prod = create_harness(step_up_flags(), "prod", BackendKind::Relational);
    let staging = create_harness(step_up_flags(), "staging", BackendKind::Relational);

    let read = prod
        .submission_service
        .handle_submit(&stale_identity(30), submit_command("select * from orders"))
        .await;
    let staging_write = staging
        .submission_service
        .handle_submit(&stale_identity(30), submit_command("update orders set paid = true where id = 1"))
        .await;

    assert!(matches!(read, Ok(SubmissionOutcome::Ready { .. })));
    assert!(matches!(staging_write, Ok(SubmissionOutcome::Ready { .. })));
}

#[tokio::test]
async fn global_cap_applies_without_policy_limit() {
    let harness = create_harness(FeatureFlags::default(), "dev", BackendKind::Relational);

    let outcome = harness
        .submission_service
        .handle_submit(&identity(), submit_command("select 1"))
        .await
        .expect("submit");

    let SubmissionOutcome::Ready { query_id } = outcome else {
        panic!("expected ready outcome");
    };
    let job = harness.job_registry.get(&query_id).await.expect("job stored");
    assert_eq!(job.options.max_rows, GLOBAL_MAX_ROWS);
}
