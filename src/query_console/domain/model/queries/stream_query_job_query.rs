use crate::query_console::domain::model::{
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::connection_id::ConnectionId,
};

#[derive(Clone, Debug)]
pub struct StreamQueryJobQuery {
    connection_id: ConnectionId,
    query_id: String,
}

impl StreamQueryJobQuery {
    pub fn new(connection_id: String, query_id: String) -> Result<Self, QueryConsoleDomainError> {
        let query_id = query_id.trim().to_string();
        if query_id.is_empty() || query_id.len() > 64 {
            return Err(QueryConsoleDomainError::InvalidQueryId);
        }

        Ok(Self {
            connection_id: ConnectionId::new(connection_id)?,
            query_id,
        })
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }
    pub fn query_id(&self) -> &str {
        &self.query_id
    }
}
