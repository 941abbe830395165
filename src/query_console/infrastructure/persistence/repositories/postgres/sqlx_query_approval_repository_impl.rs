use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::query_console::{
    domain::model::{
        entities::query_approval::QueryApproval,
        enums::{
            approval_status::ApprovalStatus, query_console_domain_error::QueryConsoleDomainError,
        },
        value_objects::connection_id::ConnectionId,
    },
    infrastructure::persistence::repositories::query_approval_repository::QueryApprovalRepository,
};

pub struct SqlxQueryApprovalRepositoryImpl {
    pool: PgPool,
}

impl SqlxQueryApprovalRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type ApprovalRow = (
    Uuid,
    Uuid,
    Uuid,
    String,
    String,
    String,
    DateTime<Utc>,
    Option<Uuid>,
    Option<DateTime<Utc>>,
);

const APPROVAL_COLUMNS: &str = "id, connection_id, user_id, statement, status, environment, created_at, decided_by, decided_at";

fn map_row(row: ApprovalRow) -> Result<QueryApproval, QueryConsoleDomainError> {
    let (id, connection_id, user_id, statement, status, environment, created_at, decided_by, decided_at) =
        row;

    Ok(QueryApproval {
        id,
        connection_id: ConnectionId::from(connection_id),
        user_id,
        statement,
        status: status.parse::<ApprovalStatus>()?,
        environment,
        created_at,
        decided_by,
        decided_at,
    })
}

#[async_trait]
impl QueryApprovalRepository for SqlxQueryApprovalRepositoryImpl {
    async fn save(&self, approval: &QueryApproval) -> Result<(), QueryConsoleDomainError> {
        let statement = r#"
            INSERT INTO query_approvals (
                id, connection_id, user_id, statement, status, environment, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(statement)
            .bind(approval.id)
            .bind(approval.connection_id.value())
            .bind(approval.user_id)
            .bind(&approval.statement)
            .bind(approval.status.as_str())
            .bind(&approval.environment)
            .bind(approval.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        approval_id: Uuid,
    ) -> Result<Option<QueryApproval>, QueryConsoleDomainError> {
        let statement = format!("SELECT {APPROVAL_COLUMNS} FROM query_approvals WHERE id = $1");

        sqlx::query_as::<_, ApprovalRow>(&statement)
            .bind(approval_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?
            .map(map_row)
            .transpose()
    }

    async fn list_pending(&self) -> Result<Vec<QueryApproval>, QueryConsoleDomainError> {
        let statement = format!(
            "SELECT {APPROVAL_COLUMNS} FROM query_approvals WHERE status = 'pending' ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, ApprovalRow>(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?
            .into_iter()
            .map(map_row)
            .collect()
    }

    async fn save_decision(&self, approval: &QueryApproval) -> Result<bool, QueryConsoleDomainError> {
        let statement = r#"
            UPDATE query_approvals
            SET status = $2, decided_by = $3, decided_at = $4
            WHERE id = $1 AND status = 'pending'
        "#;

        let result = sqlx::query(statement)
            .bind(approval.id)
            .bind(approval.status.as_str())
            .bind(approval.decided_by)
            .bind(approval.decided_at)
            .execute(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
