use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use serde_json::Value;
use sqlx::{Executor, PgPool, Statement};
use tokio::sync::{mpsc, oneshot};

use crate::query_console::{
    domain::model::{
        entities::entity_info::EntityInfo, value_objects::column_descriptor::ColumnDescriptor,
    },
    infrastructure::adapters::{
        database_adapter::{
            AdapterError, AdapterQueryOptions, BrowseOptions, DatabaseAdapter, ResultStream,
            ResultUnit,
        },
        postgres::pg_row_json::{describe_columns, row_to_values},
    },
};

const UNIT_BUFFER: usize = 64;
const EXPLAIN_TIMEOUT: Duration = Duration::from_secs(10);
const BROWSE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SqlxPostgresAdapterImpl {
    pool: PgPool,
}

impl SqlxPostgresAdapterImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn quote_ident(value: &str) -> String {
        value
            .split('.')
            .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Prepares the statement, reports its result columns through `header`, then
/// streams rows into `units`.
///
/// Statements without a result set (plain writes, DDL) report no columns.
/// When the consumer drops its receiver the loop ends quietly.
async fn produce_rows(
    pool: PgPool,
    statement: String,
    max_rows: u32,
    header: oneshot::Sender<Vec<ColumnDescriptor>>,
    units: mpsc::Sender<ResultUnit>,
) -> Result<(), AdapterError> {
    let mut connection = pool
        .acquire()
        .await
        .map_err(|e| AdapterError::Unavailable(e.to_string()))?;

    let prepared = (&mut *connection)
        .prepare(statement.as_str())
        .await
        .map_err(|e| AdapterError::Execution(e.to_string()))?;

    let _ = header.send(describe_columns(prepared.columns()));

    let mut rows = prepared.query().fetch(&mut *connection);
    let mut produced: u32 = 0;

    while let Some(row) = rows
        .try_next()
        .await
        .map_err(|e| AdapterError::Execution(e.to_string()))?
    {
        if units.send(ResultUnit::Row(row_to_values(&row))).await.is_err() {
            return Ok(());
        }

        produced += 1;
        if max_rows > 0 && produced >= max_rows {
            break;
        }
    }

    Ok(())
}

#[async_trait]
impl DatabaseAdapter for SqlxPostgresAdapterImpl {
    async fn query(
        &self,
        statement: &str,
        options: AdapterQueryOptions,
    ) -> Result<ResultStream, AdapterError> {
        let (header_tx, header_rx) = oneshot::channel();
        let (units_tx, units_rx) = mpsc::channel(UNIT_BUFFER);
        let (completion_tx, completion_rx) = oneshot::channel();

        let pool = self.pool.clone();
        let statement = statement.to_string();
        tokio::spawn(async move {
            let production = produce_rows(pool, statement, options.max_rows, header_tx, units_tx);
            let outcome = if options.timeout.is_zero() {
                production.await
            } else {
                tokio::time::timeout(options.timeout, production)
                    .await
                    .unwrap_or(Err(AdapterError::Timeout))
            };
            let _ = completion_tx.send(outcome);
        });

        match header_rx.await {
            Ok(columns) => Ok(ResultStream {
                columns,
                units: units_rx,
                completion: completion_rx,
            }),
            // The producer failed before describing the statement; its completion carries the reason.
            Err(_) => match completion_rx.await {
                Ok(Err(error)) => Err(error),
                _ => Err(AdapterError::Execution(
                    "query ended without a result header".to_string(),
                )),
            },
        }
    }

    async fn browse(
        &self,
        namespace: &str,
        entity: &str,
        options: BrowseOptions,
    ) -> Result<ResultStream, AdapterError> {
        let offset = u64::from(options.page.saturating_sub(1)) * u64::from(options.page_size);
        let order_by = options
            .sort
            .as_deref()
            .map(|column| format!(" ORDER BY {}", Self::quote_ident(column)))
            .unwrap_or_default();

        let statement = format!(
            "SELECT * FROM {}.{}{} LIMIT {} OFFSET {}",
            Self::quote_ident(namespace),
            Self::quote_ident(entity),
            order_by,
            options.page_size,
            offset
        );

        self.query(
            &statement,
            AdapterQueryOptions {
                max_rows: options.page_size,
                timeout: BROWSE_TIMEOUT,
            },
        )
        .await
    }

    async fn explain(&self, statement: &str) -> Result<Value, AdapterError> {
        let explain = format!("EXPLAIN (FORMAT JSON) {statement}");
        let plan = sqlx::query_scalar::<_, Value>(&explain).fetch_one(&self.pool);

        tokio::time::timeout(EXPLAIN_TIMEOUT, plan)
            .await
            .map_err(|_| AdapterError::Timeout)?
            .map_err(|e| AdapterError::Execution(e.to_string()))
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, AdapterError> {
        sqlx::query_scalar::<_, String>(
            "SELECT schema_name::text FROM information_schema.schemata ORDER BY schema_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AdapterError::Execution(e.to_string()))
    }

    async fn list_entities(&self, namespace: &str) -> Result<Vec<String>, AdapterError> {
        let statement = r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        sqlx::query_scalar::<_, String>(statement)
            .bind(namespace)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AdapterError::Execution(e.to_string()))
    }

    async fn get_entity_info(
        &self,
        namespace: &str,
        entity: &str,
    ) -> Result<EntityInfo, AdapterError> {
        let columns_statement = r#"
            SELECT column_name::text, data_type::text
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position
        "#;

        let columns = sqlx::query_as::<_, (String, String)>(columns_statement)
            .bind(namespace)
            .bind(entity)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AdapterError::Execution(e.to_string()))?
            .into_iter()
            .map(|(name, data_type)| ColumnDescriptor { name, data_type })
            .collect();

        let indexes_statement = r#"
            SELECT indexname::text
            FROM pg_indexes
            WHERE schemaname = $1 AND tablename = $2
            ORDER BY indexname
        "#;

        let indexes = sqlx::query_scalar::<_, String>(indexes_statement)
            .bind(namespace)
            .bind(entity)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AdapterError::Execution(e.to_string()))?;

        Ok(EntityInfo { columns, indexes })
    }
}
