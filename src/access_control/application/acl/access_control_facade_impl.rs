use std::sync::Arc;

use async_trait::async_trait;

use crate::access_control::{
    domain::{
        model::{
            enums::access_control_domain_error::AccessControlDomainError,
            queries::authorize_query::{AuthorizeQuery, AuthorizeQueryParts},
        },
        services::access_control_query_service::AccessControlQueryService,
    },
    interfaces::acl::access_control_facade::{
        AccessControlAuthorizationDecision, AccessControlAuthorizationRequest, AccessControlFacade,
    },
};

pub struct AccessControlFacadeImpl {
    query_service: Arc<dyn AccessControlQueryService>,
}

impl AccessControlFacadeImpl {
    pub fn new(query_service: Arc<dyn AccessControlQueryService>) -> Self {
        Self { query_service }
    }
}

#[async_trait]
impl AccessControlFacade for AccessControlFacadeImpl {
    async fn authorize(
        &self,
        request: AccessControlAuthorizationRequest,
    ) -> Result<AccessControlAuthorizationDecision, AccessControlDomainError> {
        let query = AuthorizeQuery::new(AuthorizeQueryParts {
            principal_id: request.principal_id.to_string(),
            is_admin: request.is_admin,
            action_name: request.action_name,
            resource_name: request.resource_name,
            environment: request.environment,
            request_id: request.request_id,
        })?;

        let result = self.query_service.handle_authorize(query).await?;

        Ok(AccessControlAuthorizationDecision {
            allowed: result.allowed,
            reason: result.reason,
            require_where: result.constraints.require_where,
            read_only: result.constraints.read_only,
            max_rows: result.constraints.max_rows,
            timeout_ms: result.constraints.timeout_ms,
        })
    }
}
