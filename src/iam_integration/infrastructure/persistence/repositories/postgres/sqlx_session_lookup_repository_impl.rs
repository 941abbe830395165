use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::iam_integration::{
    domain::model::{
        entities::authenticated_session::AuthenticatedSession,
        value_objects::authenticated_user_id::AuthenticatedUserId,
    },
    infrastructure::persistence::repositories::session_lookup_repository::SessionLookupRepository,
    interfaces::acl::iam_authentication_facade::IamIntegrationError,
};

pub struct SqlxSessionLookupRepositoryImpl {
    pool: PgPool,
}

impl SqlxSessionLookupRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type SessionRow = (
    Uuid,
    String,
    bool,
    bool,
    DateTime<Utc>,
    Option<DateTime<Utc>>,
);

#[async_trait]
impl SessionLookupRepository for SqlxSessionLookupRepositoryImpl {
    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<AuthenticatedSession>, IamIntegrationError> {
        let statement = r#"
            SELECT u.id, u.username, u.is_admin, u.mfa_enabled, s.last_auth_at, s.last_mfa_at
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1
              AND s.revoked_at IS NULL
              AND s.expires_at > NOW()
              AND u.disabled = FALSE
        "#;

        let row = sqlx::query_as::<_, SessionRow>(statement)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IamIntegrationError::Unavailable(e.to_string()))?;

        Ok(row.map(
            |(user_id, username, is_admin, mfa_enabled, last_auth_at, last_mfa_at)| {
                AuthenticatedSession {
                    user_id: AuthenticatedUserId::new(user_id),
                    username,
                    is_admin,
                    mfa_enabled,
                    last_auth_at,
                    last_mfa_at,
                }
            },
        ))
    }
}
