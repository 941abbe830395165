use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::feature_flags::FeatureFlagProvider,
    query_console::{
        application::registries::query_job_registry::QueryJobRegistry,
        domain::{
            model::{
                commands::submit_query_command::SubmitQueryCommand,
                entities::{
                    connection_descriptor::ConnectionDescriptor,
                    query_approval::QueryApproval,
                    query_history_entry::QueryHistoryEntry,
                    query_job::NewQueryJob,
                },
                enums::{
                    approval_status::ApprovalStatus, backend_kind::BackendKind,
                    query_audit_action::QueryAuditAction,
                    query_console_domain_error::QueryConsoleDomainError,
                    query_history_status::QueryHistoryStatus,
                },
                events::query_audited_event::QueryAuditedEvent,
                value_objects::{
                    query_constraints::QueryConstraints,
                    query_execution_options::QueryExecutionOptions,
                    requester_identity::RequesterIdentity,
                    statement_classification::StatementClassification,
                },
            },
            services::{
                query_submission_service::{QuerySubmissionService, SubmissionOutcome},
                statement_classifier, step_up_policy,
            },
        },
        infrastructure::persistence::repositories::{
            connection_repository::ConnectionRepository,
            query_approval_repository::QueryApprovalRepository,
            query_console_audit_log_repository::QueryConsoleAuditLogRepository,
            query_history_repository::QueryHistoryRepository,
        },
        interfaces::acl::access_control_facade::{
            AccessControlFacade, QueryConsoleAuthorizationRequest,
        },
    },
};

/// Process-wide caps applied on top of per-request constraints.
#[derive(Clone, Copy, Debug)]
pub struct QueryExecutionLimits {
    pub global_max_rows: u32,
    pub statement_timeout_ms: u64,
    pub step_up_max_age: Duration,
}

pub struct QuerySubmissionServiceDependencies {
    pub connection_repository: Arc<dyn ConnectionRepository>,
    pub approval_repository: Arc<dyn QueryApprovalRepository>,
    pub history_repository: Arc<dyn QueryHistoryRepository>,
    pub audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
    pub access_control_facade: Arc<dyn AccessControlFacade>,
    pub feature_flags: Arc<dyn FeatureFlagProvider>,
    pub job_registry: Arc<QueryJobRegistry>,
    pub limits: QueryExecutionLimits,
}

pub struct QuerySubmissionServiceImpl {
    connection_repository: Arc<dyn ConnectionRepository>,
    approval_repository: Arc<dyn QueryApprovalRepository>,
    history_repository: Arc<dyn QueryHistoryRepository>,
    audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
    access_control_facade: Arc<dyn AccessControlFacade>,
    feature_flags: Arc<dyn FeatureFlagProvider>,
    job_registry: Arc<QueryJobRegistry>,
    limits: QueryExecutionLimits,
}

impl QuerySubmissionServiceImpl {
    pub fn new(dependencies: QuerySubmissionServiceDependencies) -> Self {
        Self {
            connection_repository: dependencies.connection_repository,
            approval_repository: dependencies.approval_repository,
            history_repository: dependencies.history_repository,
            audit_repository: dependencies.audit_repository,
            access_control_facade: dependencies.access_control_facade,
            feature_flags: dependencies.feature_flags,
            job_registry: dependencies.job_registry,
            limits: dependencies.limits,
        }
    }

    fn enforce_constraints(
        identity: &RequesterIdentity,
        backend: BackendKind,
        classification: &StatementClassification,
        constraints: &QueryConstraints,
    ) -> Result<(), QueryConsoleDomainError> {
        if constraints.read_only && classification.is_write {
            return Err(QueryConsoleDomainError::ReadOnlyViolation);
        }

        if constraints.require_where
            && classification.is_write
            && backend == BackendKind::Relational
            && !classification.has_where
        {
            return Err(QueryConsoleDomainError::WhereClauseRequired);
        }

        if classification.is_dangerous && !identity.is_admin {
            return Err(QueryConsoleDomainError::DangerousStatement);
        }

        Ok(())
    }

    async fn request_approval(
        &self,
        identity: &RequesterIdentity,
        connection: &ConnectionDescriptor,
        statement: &str,
    ) -> Result<SubmissionOutcome, QueryConsoleDomainError> {
        let now = Utc::now();
        let approval = QueryApproval::new_pending(
            connection.id,
            identity.user_id,
            statement.to_string(),
            connection.environment().to_string(),
            now,
        );
        self.approval_repository.save(&approval).await?;

        let statement_hash = statement_classifier::statement_hash(statement);
        let history_entry = QueryHistoryEntry {
            id: Uuid::new_v4(),
            user_id: identity.user_id,
            connection_id: connection.id,
            statement_hash: statement_hash.clone(),
            status: QueryHistoryStatus::PendingApproval,
            approval_id: Some(approval.id),
            started_at: now,
        };
        if let Err(error) = self.history_repository.create(&history_entry).await {
            tracing::warn!(approval_id = %approval.id, %error, "failed to record pending approval history");
        }

        let _ = self
            .audit_repository
            .save_event(&QueryAuditedEvent {
                approval_id: Some(approval.id),
                statement_hash: Some(statement_hash),
                details: Some(serde_json::json!({ "environment": approval.environment })),
                ..QueryAuditedEvent::new(
                    QueryAuditAction::ApprovalRequested,
                    identity.user_id,
                    connection.id.value(),
                )
            })
            .await;

        tracing::info!(
            approval_id = %approval.id,
            user_id = %identity.user_id,
            connection_id = %connection.id.value(),
            "query approval requested"
        );

        Ok(SubmissionOutcome::PendingApproval {
            approval_id: approval.id,
        })
    }

    async fn verify_approval(
        &self,
        identity: &RequesterIdentity,
        connection: &ConnectionDescriptor,
        statement: &str,
        approval_id: Uuid,
    ) -> Result<(), QueryConsoleDomainError> {
        let approval = self
            .approval_repository
            .find_by_id(approval_id)
            .await?
            .ok_or(QueryConsoleDomainError::ApprovalNotFound)?;

        if !approval.covers(&connection.id, identity.user_id, statement) {
            return Err(QueryConsoleDomainError::ApprovalMismatch);
        }

        if approval.status != ApprovalStatus::Approved {
            return Err(QueryConsoleDomainError::ApprovalNotApproved);
        }

        Ok(())
    }
}

#[async_trait]
impl QuerySubmissionService for QuerySubmissionServiceImpl {
    async fn handle_submit(
        &self,
        identity: &RequesterIdentity,
        command: SubmitQueryCommand,
    ) -> Result<SubmissionOutcome, QueryConsoleDomainError> {
        let connection = self
            .connection_repository
            .find_by_id(command.connection_id())
            .await?
            .ok_or(QueryConsoleDomainError::ConnectionNotFound)?;

        let statement = command.statement().value();
        let classification = statement_classifier::classify(connection.backend, statement);
        let action = classification.action_name();
        let resource = connection.query_resource();

        let constraints = self
            .access_control_facade
            .authorize(QueryConsoleAuthorizationRequest {
                principal_id: identity.user_id,
                is_admin: identity.is_admin,
                action_name: action.to_string(),
                resource_name: resource.clone(),
                environment: connection.environment().to_string(),
            })
            .await?;

        Self::enforce_constraints(identity, connection.backend, &classification, &constraints)?;

        let flags = self.feature_flags.current();
        let sensitive_write = classification.is_write && connection.is_production();

        if flags.step_up_auth && sensitive_write {
            let max_age = chrono::Duration::from_std(self.limits.step_up_max_age)
                .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;
            step_up_policy::ensure_recent_authentication(identity, Utc::now(), max_age)?;
        }

        let mut approval_id = None;
        if flags.query_approval && sensitive_write {
            match command.approval_id() {
                None => return self.request_approval(identity, &connection, statement).await,
                Some(id) => {
                    self.verify_approval(identity, &connection, statement, id)
                        .await?;
                    approval_id = Some(id);
                }
            }
        }

        let options = QueryExecutionOptions::resolve(
            self.limits.global_max_rows,
            self.limits.statement_timeout_ms,
            &constraints,
            command.max_rows(),
            command.timeout_ms(),
        );

        let job = self
            .job_registry
            .create(NewQueryJob {
                connection_id: connection.id,
                backend: connection.backend,
                statement: statement.to_string(),
                action: action.to_string(),
                resource,
                user_id: identity.user_id,
                approval_id,
                options,
            })
            .await;

        tracing::info!(
            query_id = %job.id,
            user_id = %identity.user_id,
            connection_id = %connection.id.value(),
            action,
            max_rows = options.max_rows,
            timeout_ms = options.timeout_ms,
            "query accepted"
        );

        Ok(SubmissionOutcome::Ready { query_id: job.id })
    }
}
