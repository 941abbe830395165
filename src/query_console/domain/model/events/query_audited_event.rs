use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::query_console::domain::model::enums::query_audit_action::QueryAuditAction;

#[derive(Clone, Debug)]
pub struct QueryAuditedEvent {
    pub action: QueryAuditAction,
    pub user_id: Uuid,
    pub connection_id: Option<Uuid>,
    pub query_id: Option<String>,
    pub approval_id: Option<Uuid>,
    pub statement_hash: Option<String>,
    pub details: Option<Value>,
    pub occurred_at: DateTime<Utc>,
}

impl QueryAuditedEvent {
    pub fn new(action: QueryAuditAction, user_id: Uuid, connection_id: Uuid) -> Self {
        Self {
            connection_id: Some(connection_id),
            ..Self::for_user(action, user_id)
        }
    }

    /// Event that is not tied to a single connection, such as listing approvals.
    pub fn for_user(action: QueryAuditAction, user_id: Uuid) -> Self {
        Self {
            action,
            user_id,
            connection_id: None,
            query_id: None,
            approval_id: None,
            statement_hash: None,
            details: None,
            occurred_at: Utc::now(),
        }
    }
}
