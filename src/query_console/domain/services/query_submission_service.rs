use async_trait::async_trait;
use uuid::Uuid;

use crate::query_console::domain::model::{
    commands::submit_query_command::SubmitQueryCommand,
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::requester_identity::RequesterIdentity,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionOutcome {
    Ready { query_id: String },
    PendingApproval { approval_id: Uuid },
}

#[async_trait]
pub trait QuerySubmissionService: Send + Sync {
    async fn handle_submit(
        &self,
        identity: &RequesterIdentity,
        command: SubmitQueryCommand,
    ) -> Result<SubmissionOutcome, QueryConsoleDomainError>;
}
