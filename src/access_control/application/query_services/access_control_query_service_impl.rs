use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::access_control::{
    application::snapshots::policy_engine_snapshot::PolicyEngineSnapshot,
    domain::{
        model::{
            enums::access_control_domain_error::AccessControlDomainError,
            events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
            queries::authorize_query::AuthorizeQuery,
            value_objects::policy_constraints::PolicyConstraints,
        },
        services::{
            access_control_query_service::{AccessControlQueryService, AuthorizationDecisionResult},
            role_gate,
        },
    },
    infrastructure::persistence::repositories::{
        authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
        role_assignment_repository::RoleAssignmentRepository,
    },
};

pub struct AccessControlQueryServiceImpl {
    policy_snapshot: Arc<PolicyEngineSnapshot>,
    role_assignment_repository: Arc<dyn RoleAssignmentRepository>,
    decision_audit_repository: Arc<dyn AuthorizationDecisionAuditRepository>,
}

impl AccessControlQueryServiceImpl {
    pub fn new(
        policy_snapshot: Arc<PolicyEngineSnapshot>,
        role_assignment_repository: Arc<dyn RoleAssignmentRepository>,
        decision_audit_repository: Arc<dyn AuthorizationDecisionAuditRepository>,
    ) -> Self {
        Self {
            policy_snapshot,
            role_assignment_repository,
            decision_audit_repository,
        }
    }

    fn decision(allowed: bool, reason: &str, constraints: PolicyConstraints) -> AuthorizationDecisionResult {
        AuthorizationDecisionResult {
            allowed,
            reason: reason.to_string(),
            constraints,
        }
    }

    async fn audit(&self, query: &AuthorizeQuery, decision: &AuthorizationDecisionResult) {
        let _ = self
            .decision_audit_repository
            .save_decision(&AuthorizationDecisionAuditedEvent {
                principal_id: query.principal_id().value(),
                request_id: query.request_id().map(str::to_string),
                resource_name: query.resource_name().value().to_string(),
                action_name: query.action_name().value().to_string(),
                environment: query.environment().value().to_string(),
                allowed: decision.allowed,
                reason: decision.reason.clone(),
                constraints: decision.constraints,
                occurred_at: Utc::now(),
            })
            .await;
    }
}

#[async_trait]
impl AccessControlQueryService for AccessControlQueryServiceImpl {
    async fn handle_authorize(
        &self,
        query: AuthorizeQuery,
    ) -> Result<AuthorizationDecisionResult, AccessControlDomainError> {
        if query.is_admin() {
            let decision = Self::decision(true, "admin bypass", PolicyConstraints::default());
            self.audit(&query, &decision).await;
            return Ok(decision);
        }

        let roles = self
            .role_assignment_repository
            .find_roles_by_principal(query.principal_id())
            .await?;

        if !role_gate::roles_allow(&roles, query.action_name().value()) {
            let decision = Self::decision(false, "role gate denied", PolicyConstraints::default());
            self.audit(&query, &decision).await;
            return Ok(decision);
        }

        let engine = self.policy_snapshot.current().await;
        if !engine.has_rules() {
            let decision = Self::decision(true, "no policy configured", PolicyConstraints::default());
            self.audit(&query, &decision).await;
            return Ok(decision);
        }

        let evaluation = engine.evaluate(
            query.action_name().value(),
            query.resource_name().value(),
            query.environment().value(),
        );

        let decision = if evaluation.allowed {
            Self::decision(true, "allow rule matched", evaluation.constraints)
        } else {
            Self::decision(false, "no matching policy rule", PolicyConstraints::default())
        };

        self.audit(&query, &decision).await;
        Ok(decision)
    }
}
