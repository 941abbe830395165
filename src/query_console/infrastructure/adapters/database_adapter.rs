use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot};

use crate::query_console::domain::model::{
    entities::{connection_descriptor::ConnectionDescriptor, entity_info::EntityInfo},
    value_objects::column_descriptor::ColumnDescriptor,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdapterError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("execution failed: {0}")]
    Execution(String),

    #[error("statement timed out")]
    Timeout,

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// One produced result unit: a positional row or a keyed document.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultUnit {
    Row(Vec<Value>),
    Document(Map<String, Value>),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AdapterQueryOptions {
    /// 0 means uncapped.
    pub max_rows: u32,
    /// Zero means no timeout.
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct BrowseOptions {
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<String>,
}

/// Bounded producer/consumer handoff from an adapter task.
///
/// `units` closes when production stops; `completion` then reports the terminal
/// outcome. Dropping the stream stops the producer at its next send.
pub struct ResultStream {
    pub columns: Vec<ColumnDescriptor>,
    pub units: mpsc::Receiver<ResultUnit>,
    pub completion: oneshot::Receiver<Result<(), AdapterError>>,
}

#[async_trait]
pub trait DatabaseAdapter: Send + Sync {
    async fn query(
        &self,
        statement: &str,
        options: AdapterQueryOptions,
    ) -> Result<ResultStream, AdapterError>;

    async fn browse(
        &self,
        namespace: &str,
        entity: &str,
        options: BrowseOptions,
    ) -> Result<ResultStream, AdapterError>;

    async fn explain(&self, statement: &str) -> Result<Value, AdapterError>;

    async fn list_namespaces(&self) -> Result<Vec<String>, AdapterError>;

    async fn list_entities(&self, namespace: &str) -> Result<Vec<String>, AdapterError>;

    async fn get_entity_info(&self, namespace: &str, entity: &str)
    -> Result<EntityInfo, AdapterError>;
}

#[async_trait]
pub trait DatabaseAdapterResolver: Send + Sync {
    async fn resolve(
        &self,
        connection: &ConnectionDescriptor,
    ) -> Result<Arc<dyn DatabaseAdapter>, AdapterError>;
}
