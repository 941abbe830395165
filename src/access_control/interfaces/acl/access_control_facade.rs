use async_trait::async_trait;
use uuid::Uuid;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

#[derive(Clone, Debug)]
pub struct AccessControlAuthorizationRequest {
    pub principal_id: Uuid,
    pub is_admin: bool,
    pub action_name: String,
    pub resource_name: String,
    pub environment: String,
    pub request_id: Option<String>,
}

/// Flattened decision so other contexts never depend on access-control value objects.
#[derive(Clone, Debug)]
pub struct AccessControlAuthorizationDecision {
    pub allowed: bool,
    pub reason: String,
    pub require_where: bool,
    pub read_only: bool,
    pub max_rows: u32,
    pub timeout_ms: u64,
}

#[async_trait]
pub trait AccessControlFacade: Send + Sync {
    async fn authorize(
        &self,
        request: AccessControlAuthorizationRequest,
    ) -> Result<AccessControlAuthorizationDecision, AccessControlDomainError>;
}
