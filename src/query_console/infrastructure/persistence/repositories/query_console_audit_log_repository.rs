use async_trait::async_trait;

use crate::query_console::domain::model::{
    enums::query_console_domain_error::QueryConsoleDomainError,
    events::query_audited_event::QueryAuditedEvent,
};

#[async_trait]
pub trait QueryConsoleAuditLogRepository: Send + Sync {
    async fn save_event(&self, event: &QueryAuditedEvent) -> Result<(), QueryConsoleDomainError>;
}
