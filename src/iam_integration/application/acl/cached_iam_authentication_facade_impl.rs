use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::iam_integration::{
    domain::model::entities::authenticated_session::AuthenticatedSession,
    infrastructure::persistence::repositories::session_lookup_repository::SessionLookupRepository,
    interfaces::acl::iam_authentication_facade::{IamAuthenticationFacade, IamIntegrationError},
};

#[derive(Clone)]
struct CachedSession {
    session: AuthenticatedSession,
    expires_at: Instant,
}

pub struct CachedIamAuthenticationFacadeImpl {
    session_lookup_repository: Arc<dyn SessionLookupRepository>,
    cache_ttl: Duration,
    cache: Arc<RwLock<HashMap<String, CachedSession>>>,
}

impl CachedIamAuthenticationFacadeImpl {
    pub fn new(
        session_lookup_repository: Arc<dyn SessionLookupRepository>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            session_lookup_repository,
            cache_ttl,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn token_hash(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    async fn get_cached(&self, token_hash: &str) -> Option<AuthenticatedSession> {
        let guard = self.cache.read().await;
        guard.get(token_hash).and_then(|entry| {
            if entry.expires_at > Instant::now() {
                Some(entry.session.clone())
            } else {
                None
            }
        })
    }

    async fn set_cache(&self, token_hash: String, session: AuthenticatedSession) {
        let mut guard = self.cache.write().await;
        let now = Instant::now();
        guard.retain(|_, entry| entry.expires_at > now);
        guard.insert(
            token_hash,
            CachedSession {
                session,
                expires_at: now + self.cache_ttl,
            },
        );
    }
}

#[async_trait]
impl IamAuthenticationFacade for CachedIamAuthenticationFacadeImpl {
    async fn resolve_session(
        &self,
        access_token: &str,
    ) -> Result<AuthenticatedSession, IamIntegrationError> {
        if access_token.trim().is_empty() {
            return Err(IamIntegrationError::MissingToken);
        }

        let token_hash = Self::token_hash(access_token);

        if let Some(cached) = self.get_cached(&token_hash).await {
            return Ok(cached);
        }

        let session = self
            .session_lookup_repository
            .find_active_session(&token_hash)
            .await?
            .ok_or_else(|| IamIntegrationError::InvalidToken("session not found".to_string()))?;

        self.set_cache(token_hash, session.clone()).await;

        Ok(session)
    }
}
