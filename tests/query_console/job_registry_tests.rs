use std::time::Duration;

use query_console_api::query_console::{
    application::registries::query_job_registry::QueryJobRegistry,
    domain::model::{
        entities::query_job::NewQueryJob,
        enums::backend_kind::BackendKind,
        value_objects::{
            query_constraints::QueryConstraints, query_execution_options::QueryExecutionOptions,
        },
    },
};
use uuid::Uuid;

use crate::support::connection_id;

fn new_job() -> NewQueryJob {
    NewQueryJob {
        connection_id: connection_id(),
        backend: BackendKind::Relational,
        statement: "select 1".to_string(),
        action: "query:read".to_string(),
        resource: "connection/c1/db/*".to_string(),
        user_id: Uuid::new_v4(),
        approval_id: None,
        options: QueryExecutionOptions::default(),
    }
}

#[tokio::test]
async fn create_assigns_unique_ids() {
    let registry = QueryJobRegistry::new(Duration::from_secs(60));

    let first = registry.create(new_job()).await;
    let second = registry.create(new_job()).await;

    assert_ne!(first.id, second.id);
    assert_eq!(registry.len().await, 2);
    let fetched = registry.get(&first.id).await.expect("job stored");
    assert_eq!(fetched.statement, "select 1");
}

#[tokio::test]
async fn delete_removes_job() {
    let registry = QueryJobRegistry::new(Duration::from_secs(60));
    let job = registry.create(new_job()).await;

    registry.delete(&job.id).await;

    assert!(registry.get(&job.id).await.is_none());
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn expired_job_is_evicted_on_get() {
    let registry = QueryJobRegistry::new(Duration::from_millis(20));
    let job = registry.create(new_job()).await;

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(registry.get(&job.id).await.is_none());
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn purge_drops_only_expired_jobs() {
    let registry = QueryJobRegistry::new(Duration::from_millis(40));
    registry.create(new_job()).await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    let fresh = registry.create(new_job()).await;

    assert_eq!(registry.purge_expired().await, 1);
    assert!(registry.get(&fresh.id).await.is_some());
}

#[test]
fn options_take_smallest_positive_cap() {
    let constraints = QueryConstraints {
        max_rows: 200,
        timeout_ms: 0,
        read_only: true,
        require_where: false,
    };

    let options = QueryExecutionOptions::resolve(1000, 30_000, &constraints, Some(500), Some(5_000));
    assert_eq!(options.max_rows, 200);
    assert_eq!(options.timeout_ms, 5_000);
    assert!(options.read_only);

    let options = QueryExecutionOptions::resolve(1000, 30_000, &constraints, Some(0), Some(60_000));
    assert_eq!(options.max_rows, 200);
    assert_eq!(options.timeout_ms, 30_000);

    let open = QueryExecutionOptions::resolve(0, 0, &QueryConstraints::default(), Some(10), None);
    assert_eq!(open.max_rows, 10);
    assert_eq!(open.timeout_ms, 0);
}
