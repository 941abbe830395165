use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::access_control::{
    domain::model::{
        entities::policy_document::PolicyDocument,
        enums::access_control_domain_error::AccessControlDomainError,
    },
    infrastructure::persistence::repositories::policy_document_repository::{
        PolicyDocumentRecord, PolicyDocumentRepository,
    },
};

pub struct SqlxPolicyDocumentRepositoryImpl {
    pool: PgPool,
}

impl SqlxPolicyDocumentRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PolicyDocumentRepository for SqlxPolicyDocumentRepositoryImpl {
    async fn upsert_document(
        &self,
        record: PolicyDocumentRecord,
    ) -> Result<(), AccessControlDomainError> {
        let statement = r#"
            INSERT INTO access_policy_documents (name, document, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (name)
            DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = NOW()
        "#;

        sqlx::query(statement)
            .bind(&record.name)
            .bind(Json(&record.document))
            .execute(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<PolicyDocumentRecord>, AccessControlDomainError> {
        let statement = r#"
            SELECT name, document
            FROM access_policy_documents
            ORDER BY name
        "#;

        let rows = sqlx::query_as::<_, (String, Json<PolicyDocument>)>(statement)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(name, Json(document))| PolicyDocumentRecord { name, document })
            .collect())
    }
}
