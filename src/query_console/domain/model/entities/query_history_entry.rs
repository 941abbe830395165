use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query_console::domain::model::{
    enums::query_history_status::QueryHistoryStatus, value_objects::connection_id::ConnectionId,
};

/// Lifecycle record of one submission. Only the statement hash is stored.
#[derive(Clone, Debug)]
pub struct QueryHistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub connection_id: ConnectionId,
    pub statement_hash: String,
    pub status: QueryHistoryStatus,
    pub approval_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct QueryHistoryCompletion {
    pub status: QueryHistoryStatus,
    pub row_count: u64,
    pub duration_ms: u64,
    pub ended_at: DateTime<Utc>,
    pub error_id: Option<String>,
}
