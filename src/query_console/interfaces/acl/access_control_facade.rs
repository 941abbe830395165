use async_trait::async_trait;
use uuid::Uuid;

use crate::query_console::domain::model::{
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::query_constraints::QueryConstraints,
};

#[derive(Clone, Debug)]
pub struct QueryConsoleAuthorizationRequest {
    pub principal_id: Uuid,
    pub is_admin: bool,
    pub action_name: String,
    pub resource_name: String,
    pub environment: String,
}

#[async_trait]
pub trait AccessControlFacade: Send + Sync {
    /// Returns the constraints of an allowed request, or `AccessDenied`.
    async fn authorize(
        &self,
        request: QueryConsoleAuthorizationRequest,
    ) -> Result<QueryConstraints, QueryConsoleDomainError>;
}
