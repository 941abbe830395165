use crate::query_console::domain::model::{
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::{connection_id::ConnectionId, statement_text::StatementText},
};

#[derive(Clone, Debug)]
pub struct ExplainStatementQuery {
    connection_id: ConnectionId,
    statement: StatementText,
}

impl ExplainStatementQuery {
    pub fn new(connection_id: String, statement: String) -> Result<Self, QueryConsoleDomainError> {
        Ok(Self {
            connection_id: ConnectionId::new(connection_id)?,
            statement: StatementText::new(statement)?,
        })
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }
    pub fn statement(&self) -> &StatementText {
        &self.statement
    }
}
