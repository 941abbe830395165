use uuid::Uuid;

use crate::query_console::domain::model::enums::query_console_domain_error::QueryConsoleDomainError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApprovalDecision {
    Approve,
    Deny,
}

#[derive(Clone, Debug)]
pub struct DecideQueryApprovalCommand {
    approval_id: Uuid,
    decision: ApprovalDecision,
}

impl DecideQueryApprovalCommand {
    pub fn new(approval_id: String, decision: ApprovalDecision) -> Result<Self, QueryConsoleDomainError> {
        Ok(Self {
            approval_id: Uuid::parse_str(approval_id.trim())
                .map_err(|_| QueryConsoleDomainError::InvalidApprovalId)?,
            decision,
        })
    }

    pub fn approval_id(&self) -> Uuid {
        self.approval_id
    }
    pub fn decision(&self) -> ApprovalDecision {
        self.decision
    }
}
