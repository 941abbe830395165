use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use query_console_api::iam_integration::{
    domain::model::entities::authenticated_session::AuthenticatedSession,
    infrastructure::persistence::repositories::session_lookup_repository::SessionLookupRepository,
    interfaces::acl::iam_authentication_facade::IamIntegrationError,
};

#[derive(Default)]
struct FakeSessionLookupState {
    sessions: HashMap<String, AuthenticatedSession>,
    lookups: usize,
    unavailable: bool,
}

pub struct FakeSessionLookupRepository {
    state: Mutex<FakeSessionLookupState>,
}

impl FakeSessionLookupRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeSessionLookupState::default()),
        }
    }

    pub fn insert(&self, token_hash: String, session: AuthenticatedSession) {
        self.state
            .lock()
            .expect("mutex poisoned")
            .sessions
            .insert(token_hash, session);
    }

    pub fn revoke_all(&self) {
        self.state.lock().expect("mutex poisoned").sessions.clear();
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().expect("mutex poisoned").unavailable = unavailable;
    }

    pub fn lookups(&self) -> usize {
        self.state.lock().expect("mutex poisoned").lookups
    }
}

#[async_trait]
impl SessionLookupRepository for FakeSessionLookupRepository {
    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<AuthenticatedSession>, IamIntegrationError> {
        let mut state = self.state.lock().expect("mutex poisoned");
        state.lookups += 1;
        if state.unavailable {
            return Err(IamIntegrationError::Unavailable("session store offline".to_string()));
        }
        Ok(state.sessions.get(token_hash).cloned())
    }
}
