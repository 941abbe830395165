use async_trait::async_trait;

use crate::query_console::domain::model::{
    entities::query_approval::QueryApproval,
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::requester_identity::RequesterIdentity,
};

#[async_trait]
pub trait QueryApprovalQueryService: Send + Sync {
    /// Pending approvals, newest first.
    async fn handle_list_pending(
        &self,
        identity: &RequesterIdentity,
    ) -> Result<Vec<QueryApproval>, QueryConsoleDomainError>;
}
