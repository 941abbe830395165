use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    access_control::{
        domain::model::enums::access_control_domain_error::AccessControlDomainError,
        interfaces::acl::access_control_facade::{
            AccessControlAuthorizationRequest, AccessControlFacade as AccessControlBcFacade,
        },
    },
    query_console::{
        domain::model::{
            enums::query_console_domain_error::QueryConsoleDomainError,
            value_objects::query_constraints::QueryConstraints,
        },
        interfaces::acl::access_control_facade::{
            AccessControlFacade, QueryConsoleAuthorizationRequest,
        },
    },
};

pub struct AccessControlFacadeRealImpl {
    facade: Arc<dyn AccessControlBcFacade>,
}

impl AccessControlFacadeRealImpl {
    pub fn new(facade: Arc<dyn AccessControlBcFacade>) -> Self {
        Self { facade }
    }
}

#[async_trait]
impl AccessControlFacade for AccessControlFacadeRealImpl {
    async fn authorize(
        &self,
        request: QueryConsoleAuthorizationRequest,
    ) -> Result<QueryConstraints, QueryConsoleDomainError> {
        let decision = self
            .facade
            .authorize(AccessControlAuthorizationRequest {
                principal_id: request.principal_id,
                is_admin: request.is_admin,
                action_name: request.action_name,
                resource_name: request.resource_name,
                environment: request.environment,
                request_id: None,
            })
            .await
            .map_err(map_access_control_error)?;

        if !decision.allowed {
            return Err(QueryConsoleDomainError::AccessDenied);
        }

        Ok(QueryConstraints {
            require_where: decision.require_where,
            read_only: decision.read_only,
            max_rows: decision.max_rows,
            timeout_ms: decision.timeout_ms,
        })
    }
}

fn map_access_control_error(error: AccessControlDomainError) -> QueryConsoleDomainError {
    match error {
        AccessControlDomainError::AccessDenied => QueryConsoleDomainError::AccessDenied,
        AccessControlDomainError::InfrastructureError(detail) => {
            QueryConsoleDomainError::InfrastructureError(detail)
        }
        other => QueryConsoleDomainError::InvalidAuthorizationRequest(other.to_string()),
    }
}
