use async_trait::async_trait;

use crate::access_control::domain::model::{
    enums::access_control_domain_error::AccessControlDomainError,
    queries::authorize_query::AuthorizeQuery,
    value_objects::policy_constraints::PolicyConstraints,
};

#[derive(Clone, Debug)]
pub struct AuthorizationDecisionResult {
    pub allowed: bool,
    pub reason: String,
    pub constraints: PolicyConstraints,
}

#[async_trait]
pub trait AccessControlQueryService: Send + Sync {
    async fn handle_authorize(
        &self,
        query: AuthorizeQuery,
    ) -> Result<AuthorizationDecisionResult, AccessControlDomainError>;
}
