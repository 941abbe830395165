use crate::query_console::domain::model::enums::query_console_domain_error::QueryConsoleDomainError;

const MAX_STATEMENT_BYTES: usize = 256 * 1024;

/// Raw statement as submitted. Kept verbatim so approvals and hashes match exactly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatementText(String);

impl StatementText {
    pub fn new(value: String) -> Result<Self, QueryConsoleDomainError> {
        if value.trim().is_empty() || value.len() > MAX_STATEMENT_BYTES {
            return Err(QueryConsoleDomainError::InvalidStatement);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
