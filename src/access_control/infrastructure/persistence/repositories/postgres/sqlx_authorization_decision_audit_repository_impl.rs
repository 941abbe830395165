use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::access_control::{
    domain::model::{
        enums::access_control_domain_error::AccessControlDomainError,
        events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
    },
    infrastructure::persistence::repositories::authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
};

pub struct SqlxAuthorizationDecisionAuditRepositoryImpl {
    pool: PgPool,
}

impl SqlxAuthorizationDecisionAuditRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationDecisionAuditRepository for SqlxAuthorizationDecisionAuditRepositoryImpl {
    async fn save_decision(
        &self,
        event: &AuthorizationDecisionAuditedEvent,
    ) -> Result<(), AccessControlDomainError> {
        let statement = r#"
            INSERT INTO access_authorization_decision_audit (
                principal_id,
                request_id,
                resource_name,
                action_name,
                environment,
                allowed,
                reason,
                granted_max_rows,
                granted_timeout_ms,
                constraints,
                occurred_at
            )
            VALUES ($1, $2, $3, $4, NULLIF($5, ''), $6, $7, $8, $9, $10, $11)
        "#;

        sqlx::query(statement)
            .bind(event.principal_id)
            .bind(&event.request_id)
            .bind(&event.resource_name)
            .bind(&event.action_name)
            .bind(&event.environment)
            .bind(event.allowed)
            .bind(&event.reason)
            .bind(i64::from(event.constraints.max_rows))
            .bind(i64::try_from(event.constraints.timeout_ms).unwrap_or(i64::MAX))
            .bind(Json(&event.constraints))
            .bind(event.occurred_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }
}
