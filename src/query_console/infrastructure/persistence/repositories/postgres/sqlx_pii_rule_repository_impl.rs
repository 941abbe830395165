use async_trait::async_trait;
use sqlx::PgPool;

use crate::query_console::{
    domain::model::{
        entities::pii_rule::PiiRule, enums::query_console_domain_error::QueryConsoleDomainError,
        value_objects::connection_id::ConnectionId,
    },
    infrastructure::persistence::repositories::pii_rule_repository::PiiRuleRepository,
};

pub struct SqlxPiiRuleRepositoryImpl {
    pool: PgPool,
}

impl SqlxPiiRuleRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PiiRuleRepository for SqlxPiiRuleRepositoryImpl {
    async fn list_by_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<PiiRule>, QueryConsoleDomainError> {
        let statement = r#"
            SELECT resource, field, mask_type
            FROM pii_rules
            WHERE connection_id = $1
            ORDER BY resource, field
        "#;

        let rows = sqlx::query_as::<_, (String, String, String)>(statement)
            .bind(connection_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(resource, field, mask_type)| PiiRule {
                connection_id: *connection_id,
                resource,
                field,
                mask_type,
            })
            .collect())
    }
}
