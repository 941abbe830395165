use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query_console::domain::model::{
    enums::backend_kind::BackendKind,
    value_objects::{connection_id::ConnectionId, query_execution_options::QueryExecutionOptions},
};

/// Validated, constraint-bound execution request waiting to be streamed.
#[derive(Clone, Debug)]
pub struct QueryJob {
    pub id: String,
    pub connection_id: ConnectionId,
    pub backend: BackendKind,
    pub statement: String,
    pub action: String,
    pub resource: String,
    pub user_id: Uuid,
    pub approval_id: Option<Uuid>,
    pub options: QueryExecutionOptions,
    pub created_at: DateTime<Utc>,
}

/// Job contents before the registry assigns an id and creation time.
#[derive(Clone, Debug)]
pub struct NewQueryJob {
    pub connection_id: ConnectionId,
    pub backend: BackendKind,
    pub statement: String,
    pub action: String,
    pub resource: String,
    pub user_id: Uuid,
    pub approval_id: Option<Uuid>,
    pub options: QueryExecutionOptions,
}
