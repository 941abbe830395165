use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query_console::domain::model::{
    enums::{approval_status::ApprovalStatus, query_console_domain_error::QueryConsoleDomainError},
    value_objects::connection_id::ConnectionId,
};

#[derive(Clone, Debug)]
pub struct QueryApproval {
    pub id: Uuid,
    pub connection_id: ConnectionId,
    pub user_id: Uuid,
    pub statement: String,
    pub status: ApprovalStatus,
    pub environment: String,
    pub created_at: DateTime<Utc>,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl QueryApproval {
    pub fn new_pending(
        connection_id: ConnectionId,
        user_id: Uuid,
        statement: String,
        environment: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            connection_id,
            user_id,
            statement,
            status: ApprovalStatus::Pending,
            environment,
            created_at: now,
            decided_by: None,
            decided_at: None,
        }
    }

    /// pending -> approved. Any already-decided approval is rejected.
    pub fn approve(&mut self, approver: Uuid, now: DateTime<Utc>) -> Result<(), QueryConsoleDomainError> {
        self.decide(ApprovalStatus::Approved, approver, now)
    }

    /// pending -> denied. Any already-decided approval is rejected.
    pub fn deny(&mut self, denier: Uuid, now: DateTime<Utc>) -> Result<(), QueryConsoleDomainError> {
        self.decide(ApprovalStatus::Denied, denier, now)
    }

    fn decide(
        &mut self,
        status: ApprovalStatus,
        decided_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), QueryConsoleDomainError> {
        if self.status != ApprovalStatus::Pending {
            return Err(QueryConsoleDomainError::ApprovalAlreadyDecided);
        }

        self.status = status;
        self.decided_by = Some(decided_by);
        self.decided_at = Some(now);
        Ok(())
    }

    /// Whether this approval authorizes exactly the given submission.
    pub fn covers(&self, connection_id: &ConnectionId, user_id: Uuid, statement: &str) -> bool {
        self.connection_id == *connection_id && self.user_id == user_id && self.statement == statement
    }
}
