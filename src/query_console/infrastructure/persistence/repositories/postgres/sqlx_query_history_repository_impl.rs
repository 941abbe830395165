use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::query_console::{
    domain::model::{
        entities::query_history_entry::{QueryHistoryCompletion, QueryHistoryEntry},
        enums::query_console_domain_error::QueryConsoleDomainError,
    },
    infrastructure::persistence::repositories::query_history_repository::QueryHistoryRepository,
};

pub struct SqlxQueryHistoryRepositoryImpl {
    pool: PgPool,
}

impl SqlxQueryHistoryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryHistoryRepository for SqlxQueryHistoryRepositoryImpl {
    async fn create(&self, entry: &QueryHistoryEntry) -> Result<(), QueryConsoleDomainError> {
        let statement = r#"
            INSERT INTO query_history (
                id, user_id, connection_id, statement_hash, status, approval_id, started_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(statement)
            .bind(entry.id)
            .bind(entry.user_id)
            .bind(entry.connection_id.value())
            .bind(&entry.statement_hash)
            .bind(entry.status.as_str())
            .bind(entry.approval_id)
            .bind(entry.started_at)
            .execute(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }

    async fn complete(
        &self,
        history_id: Uuid,
        completion: &QueryHistoryCompletion,
    ) -> Result<(), QueryConsoleDomainError> {
        let statement = r#"
            UPDATE query_history
            SET status = $2, row_count = $3, duration_ms = $4, ended_at = $5, error_id = $6
            WHERE id = $1
        "#;

        sqlx::query(statement)
            .bind(history_id)
            .bind(completion.status.as_str())
            .bind(i64::try_from(completion.row_count).unwrap_or(i64::MAX))
            .bind(i64::try_from(completion.duration_ms).unwrap_or(i64::MAX))
            .bind(completion.ended_at)
            .bind(&completion.error_id)
            .execute(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }
}
