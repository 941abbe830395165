use async_trait::async_trait;

use crate::query_console::domain::model::{
    entities::pii_rule::PiiRule, enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::connection_id::ConnectionId,
};

#[async_trait]
pub trait PiiRuleRepository: Send + Sync {
    async fn list_by_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<PiiRule>, QueryConsoleDomainError>;
}
