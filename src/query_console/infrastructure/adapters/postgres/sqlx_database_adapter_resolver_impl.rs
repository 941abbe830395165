use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::sync::RwLock;

use crate::query_console::{
    domain::model::{
        entities::connection_descriptor::ConnectionDescriptor, enums::backend_kind::BackendKind,
    },
    infrastructure::adapters::{
        database_adapter::{AdapterError, DatabaseAdapter, DatabaseAdapterResolver},
        postgres::sqlx_postgres_adapter_impl::SqlxPostgresAdapterImpl,
    },
};

const MAX_CONNECTIONS_PER_TARGET: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves adapters for registered connections, keeping one pool per target URL.
pub struct SqlxDatabaseAdapterResolverImpl {
    pools: Arc<RwLock<HashMap<String, PgPool>>>,
}

impl SqlxDatabaseAdapterResolverImpl {
    pub fn new() -> Self {
        Self {
            pools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn database_url(connection: &ConnectionDescriptor) -> Result<String, AdapterError> {
        let credential_ref = connection.credential_ref.as_deref().ok_or_else(|| {
            AdapterError::Unavailable("connection has no credential reference".to_string())
        })?;

        std::env::var(credential_ref)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AdapterError::Unavailable(format!("credential {credential_ref} is not set"))
            })
    }

    async fn get_or_create_pool(&self, database_url: &str) -> Result<PgPool, AdapterError> {
        {
            let read_guard = self.pools.read().await;
            if let Some(pool) = read_guard.get(database_url) {
                return Ok(pool.clone());
            }
        }

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS_PER_TARGET)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(|e| AdapterError::Unavailable(e.to_string()))?;

        let mut write_guard = self.pools.write().await;
        if let Some(existing) = write_guard.get(database_url) {
            return Ok(existing.clone());
        }

        write_guard.insert(database_url.to_string(), pool.clone());
        Ok(pool)
    }
}

impl Default for SqlxDatabaseAdapterResolverImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseAdapterResolver for SqlxDatabaseAdapterResolverImpl {
    async fn resolve(
        &self,
        connection: &ConnectionDescriptor,
    ) -> Result<Arc<dyn DatabaseAdapter>, AdapterError> {
        match connection.backend {
            BackendKind::Relational => {
                let database_url = Self::database_url(connection)?;
                let pool = self.get_or_create_pool(&database_url).await?;
                Ok(Arc::new(SqlxPostgresAdapterImpl::new(pool)))
            }
            BackendKind::Document => Err(AdapterError::Unsupported(format!(
                "no bundled adapter for {}",
                connection.backend.as_str()
            ))),
        }
    }
}
