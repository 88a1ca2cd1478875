//! Token lifecycle tests against the directory service.
//!
//! These cover the caching contract: one credential exchange serves many
//! operations and many concurrent callers, a rejected token is replaced
//! exactly once per operation, and exchange failures follow the retry
//! budget.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{org_fixture, service_for};
use dingtalk_mcp_server::error::DirectoryError;
use futures::future::join_all;

#[tokio::test]
async fn concurrent_requests_share_one_exchange() {
    let mock = Arc::new(org_fixture());
    let service = service_for(&mock);

    let tokens = join_all((0..8).map(|_| service.access_token())).await;

    for token in tokens {
        assert_eq!(token.unwrap(), "mock-token-0");
    }
    assert_eq!(
        mock.token_calls.load(Ordering::SeqCst),
        1,
        "all callers must share a single credential exchange"
    );
}

#[tokio::test]
async fn cached_token_serves_subsequent_operations() {
    let mock = Arc::new(org_fixture());
    let service = service_for(&mock);

    service.access_token().await.unwrap();
    service.department_users(2).await.unwrap();
    service.department_users(3).await.unwrap();

    assert_eq!(mock.token_calls.load(Ordering::SeqCst), 1);
    let seen = mock.tokens_seen.lock().unwrap();
    assert_eq!(seen.as_slice(), ["mock-token-0", "mock-token-0"]);
}

#[tokio::test]
async fn walk_reuses_one_token_for_the_whole_tree() {
    let mock = Arc::new(org_fixture());
    let service = service_for(&mock);

    let departments = service.department_list(true).await.unwrap();

    assert_eq!(departments.len(), 4);
    assert_eq!(mock.token_calls.load(Ordering::SeqCst), 1);
    // One child listing per visited department: root, Engineering, Sales, Platform
    assert_eq!(mock.list_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn rejected_token_is_replaced_once() {
    let mock = Arc::new(org_fixture().fail_members_with_auth(1));
    let service = service_for(&mock);

    let users = service.department_users(2).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(mock.token_calls.load(Ordering::SeqCst), 2);
    assert_eq!(mock.member_calls.load(Ordering::SeqCst), 2);

    let seen = mock.tokens_seen.lock().unwrap();
    assert_ne!(
        seen[0], seen[1],
        "the retry must carry a freshly exchanged token"
    );
}

#[tokio::test]
async fn persistent_rejection_surfaces_after_one_refresh() {
    let mock = Arc::new(org_fixture().fail_members_with_auth(3));
    let service = service_for(&mock);

    let err = service.department_users(2).await.unwrap_err();

    assert!(matches!(err, DirectoryError::Auth { .. }));
    assert_eq!(
        mock.member_calls.load(Ordering::SeqCst),
        2,
        "exactly one refresh attempt, never a refresh loop"
    );
}

#[tokio::test]
async fn rejected_exchange_is_retried_once() {
    let mock = Arc::new(org_fixture().fail_token_with_auth(1));
    let service = service_for(&mock);

    let token = service.access_token().await.unwrap();

    assert_eq!(token, "mock-token-1");
    assert_eq!(mock.token_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn transient_exchange_failures_stay_within_budget() {
    // Two failures fit the quick profile's two retries
    let mock = Arc::new(org_fixture().fail_token_with_transient(2));
    let service = service_for(&mock);

    let token = service.access_token().await.unwrap();

    assert_eq!(token, "mock-token-2");
    assert_eq!(mock.token_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exhausted_exchange_budget_surfaces_transient_error() {
    let mock = Arc::new(org_fixture().fail_token_with_transient(3));
    let service = service_for(&mock);

    let err = service.access_token().await.unwrap_err();

    assert!(matches!(err, DirectoryError::Transient { .. }));
    assert_eq!(
        mock.token_calls.load(Ordering::SeqCst),
        3,
        "initial attempt plus two retries, then stop"
    );
}
