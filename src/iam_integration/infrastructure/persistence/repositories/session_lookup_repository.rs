use async_trait::async_trait;

use crate::iam_integration::{
    domain::model::entities::authenticated_session::AuthenticatedSession,
    interfaces::acl::iam_authentication_facade::IamIntegrationError,
};

#[async_trait]
pub trait SessionLookupRepository: Send + Sync {
    /// Active (not revoked, not expired) session for the given token hash.
    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<AuthenticatedSession>, IamIntegrationError>;
}
