use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::query_console::{
    domain::model::{
        enums::query_console_domain_error::QueryConsoleDomainError,
        events::query_audited_event::QueryAuditedEvent,
    },
    infrastructure::persistence::repositories::query_console_audit_log_repository::QueryConsoleAuditLogRepository,
};

pub struct SqlxQueryConsoleAuditLogRepositoryImpl {
    pool: PgPool,
}

impl SqlxQueryConsoleAuditLogRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryConsoleAuditLogRepository for SqlxQueryConsoleAuditLogRepositoryImpl {
    async fn save_event(&self, event: &QueryAuditedEvent) -> Result<(), QueryConsoleDomainError> {
        let statement = r#"
            INSERT INTO query_console_audit_logs (
                action,
                user_id,
                connection_id,
                query_id,
                approval_id,
                statement_hash,
                details,
                occurred_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(statement)
            .bind(event.action.as_str())
            .bind(event.user_id)
            .bind(event.connection_id)
            .bind(&event.query_id)
            .bind(event.approval_id)
            .bind(&event.statement_hash)
            .bind(event.details.as_ref().map(Json))
            .bind(event.occurred_at)
            .execute(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }
}
