use uuid::Uuid;

use crate::query_console::domain::model::enums::query_console_domain_error::QueryConsoleDomainError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, QueryConsoleDomainError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| QueryConsoleDomainError::InvalidConnectionId)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}
