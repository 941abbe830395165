use uuid::Uuid;

use crate::query_console::domain::model::{
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::{connection_id::ConnectionId, statement_text::StatementText},
};

#[derive(Clone, Debug)]
pub struct SubmitQueryCommand {
    connection_id: ConnectionId,
    statement: StatementText,
    approval_id: Option<Uuid>,
    max_rows: Option<u32>,
    timeout_ms: Option<u64>,
}

pub struct SubmitQueryCommandParts {
    pub connection_id: String,
    pub statement: String,
    pub approval_id: Option<String>,
    pub max_rows: Option<u32>,
    pub timeout_ms: Option<u64>,
}

impl SubmitQueryCommand {
    pub fn new(parts: SubmitQueryCommandParts) -> Result<Self, QueryConsoleDomainError> {
        let approval_id = parts
            .approval_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(|id| Uuid::parse_str(&id).map_err(|_| QueryConsoleDomainError::InvalidApprovalId))
            .transpose()?;

        Ok(Self {
            connection_id: ConnectionId::new(parts.connection_id)?,
            statement: StatementText::new(parts.statement)?,
            approval_id,
            max_rows: parts.max_rows,
            timeout_ms: parts.timeout_ms,
        })
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }
    pub fn statement(&self) -> &StatementText {
        &self.statement
    }
    pub fn approval_id(&self) -> Option<Uuid> {
        self.approval_id
    }
    pub fn max_rows(&self) -> Option<u32> {
        self.max_rows
    }
    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }
}
