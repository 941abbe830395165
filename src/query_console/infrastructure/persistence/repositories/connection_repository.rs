use async_trait::async_trait;

use crate::query_console::domain::model::{
    entities::connection_descriptor::ConnectionDescriptor,
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::connection_id::ConnectionId,
};

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn find_by_id(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<ConnectionDescriptor>, QueryConsoleDomainError>;
}
