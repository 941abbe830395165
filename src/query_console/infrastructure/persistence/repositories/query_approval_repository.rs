use async_trait::async_trait;
use uuid::Uuid;

use crate::query_console::domain::model::{
    entities::query_approval::QueryApproval,
    enums::query_console_domain_error::QueryConsoleDomainError,
};

#[async_trait]
pub trait QueryApprovalRepository: Send + Sync {
    async fn save(&self, approval: &QueryApproval) -> Result<(), QueryConsoleDomainError>;

    async fn find_by_id(&self, approval_id: Uuid)
    -> Result<Option<QueryApproval>, QueryConsoleDomainError>;

    async fn list_pending(&self) -> Result<Vec<QueryApproval>, QueryConsoleDomainError>;

    /// Persists a decision only if the stored approval is still pending.
    /// Returns `false` when another decision got there first.
    async fn save_decision(&self, approval: &QueryApproval) -> Result<bool, QueryConsoleDomainError>;
}
