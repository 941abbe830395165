use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::query_console::{
    domain::model::{
        entities::connection_descriptor::ConnectionDescriptor,
        enums::{backend_kind::BackendKind, query_console_domain_error::QueryConsoleDomainError},
        value_objects::connection_id::ConnectionId,
    },
    infrastructure::persistence::repositories::connection_repository::ConnectionRepository,
};

pub struct SqlxConnectionRepositoryImpl {
    pool: PgPool,
}

impl SqlxConnectionRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type ConnectionRow = (
    Uuid,
    String,
    String,
    Json<HashMap<String, String>>,
    Option<String>,
);

#[async_trait]
impl ConnectionRepository for SqlxConnectionRepositoryImpl {
    async fn find_by_id(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<ConnectionDescriptor>, QueryConsoleDomainError> {
        let statement = r#"
            SELECT id, name, backend, tags, credential_ref
            FROM connections
            WHERE id = $1
        "#;

        let row = sqlx::query_as::<_, ConnectionRow>(statement)
            .bind(connection_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QueryConsoleDomainError::InfrastructureError(e.to_string()))?;

        row.map(|(id, name, backend, Json(tags), credential_ref)| {
            Ok(ConnectionDescriptor {
                id: ConnectionId::from(id),
                name,
                backend: backend.parse::<BackendKind>()?,
                tags,
                credential_ref,
            })
        })
        .transpose()
    }
}
