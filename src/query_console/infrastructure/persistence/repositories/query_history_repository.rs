use async_trait::async_trait;
use uuid::Uuid;

use crate::query_console::domain::model::{
    entities::query_history_entry::{QueryHistoryCompletion, QueryHistoryEntry},
    enums::query_console_domain_error::QueryConsoleDomainError,
};

#[async_trait]
pub trait QueryHistoryRepository: Send + Sync {
    async fn create(&self, entry: &QueryHistoryEntry) -> Result<(), QueryConsoleDomainError>;

    async fn complete(
        &self,
        history_id: Uuid,
        completion: &QueryHistoryCompletion,
    ) -> Result<(), QueryConsoleDomainError>;
}
