use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    config::feature_flags::FeatureFlagProvider,
    query_console::{
        domain::{
            model::{
                commands::decide_query_approval_command::{
                    ApprovalDecision, DecideQueryApprovalCommand,
                },
                entities::query_approval::QueryApproval,
                enums::{
                    query_audit_action::QueryAuditAction,
                    query_console_domain_error::QueryConsoleDomainError,
                },
                events::query_audited_event::QueryAuditedEvent,
                value_objects::requester_identity::RequesterIdentity,
            },
            services::{
                query_approval_command_service::QueryApprovalCommandService,
                statement_classifier,
            },
        },
        infrastructure::persistence::repositories::{
            query_approval_repository::QueryApprovalRepository,
            query_console_audit_log_repository::QueryConsoleAuditLogRepository,
        },
        interfaces::acl::access_control_facade::{
            AccessControlFacade, QueryConsoleAuthorizationRequest,
        },
    },
};

pub const APPROVAL_ADMIN_ACTION: &str = "query:admin";
pub const APPROVAL_RESOURCE: &str = "approvals";

/// Admins pass; anyone else needs `query:admin` on `approvals`.
pub async fn ensure_approver(
    access_control_facade: &dyn AccessControlFacade,
    identity: &RequesterIdentity,
) -> Result<(), QueryConsoleDomainError> {
    if identity.is_admin {
        return Ok(());
    }

    access_control_facade
        .authorize(QueryConsoleAuthorizationRequest {
            principal_id: identity.user_id,
            is_admin: false,
            action_name: APPROVAL_ADMIN_ACTION.to_string(),
            resource_name: APPROVAL_RESOURCE.to_string(),
            environment: String::new(),
        })
        .await
        .map(|_| ())
}

pub struct QueryApprovalCommandServiceImpl {
    approval_repository: Arc<dyn QueryApprovalRepository>,
    audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
    access_control_facade: Arc<dyn AccessControlFacade>,
    feature_flags: Arc<dyn FeatureFlagProvider>,
}

impl QueryApprovalCommandServiceImpl {
    pub fn new(
        approval_repository: Arc<dyn QueryApprovalRepository>,
        audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
        access_control_facade: Arc<dyn AccessControlFacade>,
        feature_flags: Arc<dyn FeatureFlagProvider>,
    ) -> Self {
        Self {
            approval_repository,
            audit_repository,
            access_control_facade,
            feature_flags,
        }
    }
}

#[async_trait]
impl QueryApprovalCommandService for QueryApprovalCommandServiceImpl {
    async fn handle_decide(
        &self,
        identity: &RequesterIdentity,
        command: DecideQueryApprovalCommand,
    ) -> Result<QueryApproval, QueryConsoleDomainError> {
        if !self.feature_flags.current().query_approval {
            return Err(QueryConsoleDomainError::ApprovalDisabled);
        }

        ensure_approver(self.access_control_facade.as_ref(), identity).await?;

        let mut approval = self
            .approval_repository
            .find_by_id(command.approval_id())
            .await?
            .ok_or(QueryConsoleDomainError::ApprovalNotFound)?;

        let now = Utc::now();
        let action = match command.decision() {
            ApprovalDecision::Approve => {
                approval.approve(identity.user_id, now)?;
                QueryAuditAction::ApprovalApproved
            }
            ApprovalDecision::Deny => {
                approval.deny(identity.user_id, now)?;
                QueryAuditAction::ApprovalDenied
            }
        };

        if !self.approval_repository.save_decision(&approval).await? {
            return Err(QueryConsoleDomainError::ApprovalAlreadyDecided);
        }

        let _ = self
            .audit_repository
            .save_event(&QueryAuditedEvent {
                approval_id: Some(approval.id),
                statement_hash: Some(statement_classifier::statement_hash(&approval.statement)),
                details: Some(serde_json::json!({ "requestedBy": approval.user_id })),
                ..QueryAuditedEvent::new(action, identity.user_id, approval.connection_id.value())
            })
            .await;

        tracing::info!(
            approval_id = %approval.id,
            decided_by = %identity.user_id,
            status = approval.status.as_str(),
            "query approval decided"
        );

        Ok(approval)
    }
}
