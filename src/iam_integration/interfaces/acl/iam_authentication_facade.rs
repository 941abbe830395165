use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::iam_integration::domain::model::entities::authenticated_session::AuthenticatedSession;

#[derive(Debug, thiserror::Error)]
pub enum IamIntegrationError {
    #[error("authentication required")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("iam unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait IamAuthenticationFacade: Send + Sync {
    async fn resolve_session(
        &self,
        access_token: &str,
    ) -> Result<AuthenticatedSession, IamIntegrationError>;
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, IamIntegrationError> {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(IamIntegrationError::MissingToken)?;

    let token = authorization
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| IamIntegrationError::InvalidToken("expected bearer token".to_string()))?;

    Ok(token.to_string())
}
