use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{sync::Mutex, task::JoinHandle};
use uuid::Uuid;

use crate::query_console::domain::model::entities::query_job::{NewQueryJob, QueryJob};

/// Short-lived handoff between submission and streaming.
///
/// Entries expire `ttl` after creation whether or not they were streamed.
/// Expired entries are dropped lazily on `get` and by the optional sweeper.
pub struct QueryJobRegistry {
    jobs: Mutex<HashMap<String, QueryJob>>,
    ttl: Duration,
}

impl QueryJobRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn create(&self, new_job: NewQueryJob) -> QueryJob {
        let job = QueryJob {
            id: Uuid::new_v4().to_string(),
            connection_id: new_job.connection_id,
            backend: new_job.backend,
            statement: new_job.statement,
            action: new_job.action,
            resource: new_job.resource,
            user_id: new_job.user_id,
            approval_id: new_job.approval_id,
            options: new_job.options,
            created_at: Utc::now(),
        };

        self.jobs.lock().await.insert(job.id.clone(), job.clone());
        job
    }

    pub async fn get(&self, job_id: &str) -> Option<QueryJob> {
        let mut jobs = self.jobs.lock().await;
        let expired = jobs.get(job_id).map(|job| self.is_expired(job))?;

        if expired {
            jobs.remove(job_id);
            return None;
        }

        jobs.get(job_id).cloned()
    }

    pub async fn delete(&self, job_id: &str) {
        self.jobs.lock().await.remove(job_id);
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let mut jobs = self.jobs.lock().await;
        let before = jobs.len();
        jobs.retain(|_, job| !self.is_expired(job));
        before - jobs.len()
    }

    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }

    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = registry.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "expired query jobs removed");
                }
            }
        })
    }

    fn is_expired(&self, job: &QueryJob) -> bool {
        (Utc::now() - job.created_at)
            .to_std()
            .is_ok_and(|age| age > self.ttl)
    }
}
