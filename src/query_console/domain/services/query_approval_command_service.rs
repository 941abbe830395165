use async_trait::async_trait;

use crate::query_console::domain::model::{
    commands::decide_query_approval_command::DecideQueryApprovalCommand,
    entities::query_approval::QueryApproval,
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::requester_identity::RequesterIdentity,
};

#[async_trait]
pub trait QueryApprovalCommandService: Send + Sync {
    async fn handle_decide(
        &self,
        identity: &RequesterIdentity,
        command: DecideQueryApprovalCommand,
    ) -> Result<QueryApproval, QueryConsoleDomainError>;
}
