use std::{sync::Arc, time::Duration};

use tokio::sync::RwLock;

use crate::access_control::{
    domain::{
        model::enums::access_control_domain_error::AccessControlDomainError,
        services::policy_engine::PolicyEngine,
    },
    infrastructure::persistence::repositories::policy_document_repository::PolicyDocumentRepository,
};

/// Immutable policy engine view shared by concurrent authorizations.
///
/// Refreshes build a new engine and swap the whole `Arc`; readers keep whatever
/// snapshot they already cloned. A failed reload leaves the previous snapshot in place.
pub struct PolicyEngineSnapshot {
    policy_document_repository: Arc<dyn PolicyDocumentRepository>,
    current: RwLock<Arc<PolicyEngine>>,
}

impl PolicyEngineSnapshot {
    pub fn new(policy_document_repository: Arc<dyn PolicyDocumentRepository>) -> Self {
        Self {
            policy_document_repository,
            current: RwLock::new(Arc::new(PolicyEngine::default())),
        }
    }

    pub async fn current(&self) -> Arc<PolicyEngine> {
        self.current.read().await.clone()
    }

    pub async fn refresh(&self) -> Result<(), AccessControlDomainError> {
        let records = self.policy_document_repository.list_documents().await?;
        let engine = PolicyEngine::new(records.into_iter().map(|r| r.document).collect());

        *self.current.write().await = Arc::new(engine);
        Ok(())
    }

    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let snapshot = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = snapshot.refresh().await {
                    tracing::warn!(error = %e, "policy refresh failed; keeping previous snapshot");
                }
            }
        })
    }
}
