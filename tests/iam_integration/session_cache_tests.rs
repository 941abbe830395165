use std::{sync::Arc, time::Duration};

use axum::http::{HeaderMap, HeaderValue};
use chrono::Utc;
use query_console_api::iam_integration::{
    application::acl::cached_iam_authentication_facade_impl::CachedIamAuthenticationFacadeImpl,
    domain::model::{
        entities::authenticated_session::AuthenticatedSession,
        value_objects::authenticated_user_id::AuthenticatedUserId,
    },
    interfaces::acl::iam_authentication_facade::{
        IamAuthenticationFacade, IamIntegrationError, bearer_token,
    },
};
use uuid::Uuid;

use crate::support::FakeSessionLookupRepository;

const TOKEN: &str = "session-token-1";

fn session() -> AuthenticatedSession {
    AuthenticatedSession {
        user_id: AuthenticatedUserId::new(Uuid::new_v4()),
        username: "analyst".to_string(),
        is_admin: false,
        mfa_enabled: false,
        last_auth_at: Utc::now(),
        last_mfa_at: None,
    }
}

fn facade(ttl: Duration) -> (Arc<FakeSessionLookupRepository>, CachedIamAuthenticationFacadeImpl) {
    let repository = Arc::new(FakeSessionLookupRepository::new());
    let facade = CachedIamAuthenticationFacadeImpl::new(repository.clone(), ttl);
    (repository, facade)
}

#[tokio::test]
async fn sessions_are_looked_up_by_token_hash_and_cached() {
    let (repository, facade) = facade(Duration::from_secs(60));
    let expected = session();
    repository.insert(
        CachedIamAuthenticationFacadeImpl::token_hash(TOKEN),
        expected.clone(),
    );

    let first = facade.resolve_session(TOKEN).await.expect("session");
    repository.revoke_all();
    let second = facade.resolve_session(TOKEN).await.expect("cached session");

    assert_eq!(first.user_id, expected.user_id);
    assert_eq!(second.user_id, expected.user_id);
    assert_eq!(repository.lookups(), 1);
}

#[tokio::test]
async fn expired_cache_entries_are_looked_up_again() {
    let (repository, facade) = facade(Duration::from_millis(20));
    repository.insert(CachedIamAuthenticationFacadeImpl::token_hash(TOKEN), session());

    facade.resolve_session(TOKEN).await.expect("session");
    tokio::time::sleep(Duration::from_millis(50)).await;
    repository.revoke_all();

    let result = facade.resolve_session(TOKEN).await;

    assert!(matches!(result, Err(IamIntegrationError::InvalidToken(_))));
    assert_eq!(repository.lookups(), 2);
}

#[tokio::test]
async fn blank_and_unknown_tokens_are_rejected() {
    let (repository, facade) = facade(Duration::from_secs(60));

    assert!(matches!(
        facade.resolve_session("  ").await,
        Err(IamIntegrationError::MissingToken)
    ));
    assert!(matches!(
        facade.resolve_session("unknown").await,
        Err(IamIntegrationError::InvalidToken(_))
    ));

    repository.set_unavailable(true);
    assert!(matches!(
        facade.resolve_session("unknown").await,
        Err(IamIntegrationError::Unavailable(_))
    ));
}

#[test]
fn bearer_token_requires_bearer_scheme() {
    let mut headers = HeaderMap::new();
    assert!(matches!(bearer_token(&headers), Err(IamIntegrationError::MissingToken)));

    headers.insert("authorization", HeaderValue::from_static("Basic abc"));
    assert!(matches!(bearer_token(&headers), Err(IamIntegrationError::InvalidToken(_))));

    headers.insert("authorization", HeaderValue::from_static("Bearer  abc123 "));
    assert_eq!(bearer_token(&headers).expect("token"), "abc123");
}
