use crate::support::{allow_rule, create_query_harness, document};

#[tokio::test]
async fn failed_refresh_keeps_previous_engine() {
    let harness = create_query_harness();
    harness.policy_repository.set_documents(vec![document(
        "analysts",
        vec![allow_rule(&["query:read"], &["*"])],
    )]);
    harness.policy_snapshot.refresh().await.expect("refresh");

    let before = harness.policy_snapshot.current().await;
    harness.policy_repository.fail_listing(true);

    assert!(harness.policy_snapshot.refresh().await.is_err());
    let after = harness.policy_snapshot.current().await;
    assert!(after.has_rules());
    assert!(std::sync::Arc::ptr_eq(&before, &after));
    assert_eq!(harness.policy_repository.list_calls(), 2);
}

#[tokio::test]
async fn refresh_replaces_engine_for_new_readers() {
    let harness = create_query_harness();
    let empty = harness.policy_snapshot.current().await;

    harness.policy_repository.set_documents(vec![document(
        "analysts",
        vec![allow_rule(&["query:read"], &["*"])],
    )]);
    harness.policy_snapshot.refresh().await.expect("refresh");

    assert!(!empty.has_rules());
    assert!(harness.policy_snapshot.current().await.has_rules());
}
