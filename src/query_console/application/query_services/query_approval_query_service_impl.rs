use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::feature_flags::FeatureFlagProvider,
    query_console::{
        application::command_services::query_approval_command_service_impl::ensure_approver,
        domain::{
            model::{
                entities::query_approval::QueryApproval,
                enums::{
                    query_audit_action::QueryAuditAction,
                    query_console_domain_error::QueryConsoleDomainError,
                },
                events::query_audited_event::QueryAuditedEvent,
                value_objects::requester_identity::RequesterIdentity,
            },
            services::query_approval_query_service::QueryApprovalQueryService,
        },
        infrastructure::persistence::repositories::{
            query_approval_repository::QueryApprovalRepository,
            query_console_audit_log_repository::QueryConsoleAuditLogRepository,
        },
        interfaces::acl::access_control_facade::AccessControlFacade,
    },
};

pub struct QueryApprovalQueryServiceImpl {
    approval_repository: Arc<dyn QueryApprovalRepository>,
    access_control_facade: Arc<dyn AccessControlFacade>,
    audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
    feature_flags: Arc<dyn FeatureFlagProvider>,
}

impl QueryApprovalQueryServiceImpl {
    pub fn new(
        approval_repository: Arc<dyn QueryApprovalRepository>,
        access_control_facade: Arc<dyn AccessControlFacade>,
        audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
        feature_flags: Arc<dyn FeatureFlagProvider>,
    ) -> Self {
        Self {
            approval_repository,
            access_control_facade,
            audit_repository,
            feature_flags,
        }
    }
}

#[async_trait]
impl QueryApprovalQueryService for QueryApprovalQueryServiceImpl {
    async fn handle_list_pending(
        &self,
        identity: &RequesterIdentity,
    ) -> Result<Vec<QueryApproval>, QueryConsoleDomainError> {
        if !self.feature_flags.current().query_approval {
            return Err(QueryConsoleDomainError::ApprovalDisabled);
        }

        ensure_approver(self.access_control_facade.as_ref(), identity).await?;

        let pending = self.approval_repository.list_pending().await?;

        let _ = self
            .audit_repository
            .save_event(&QueryAuditedEvent {
                details: Some(serde_json::json!({ "pendingCount": pending.len() })),
                ..QueryAuditedEvent::for_user(QueryAuditAction::ApprovalsListed, identity.user_id)
            })
            .await;

        Ok(pending)
    }
}
