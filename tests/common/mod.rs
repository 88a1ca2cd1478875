//! Shared test doubles for the directory integration tests.
//!
//! `MockDirectory` is an in-memory `DirectoryApi` with scriptable failures:
//! the organization is described up front with builder methods, and each
//! failure script consumes itself as calls arrive, so "fail twice then
//! succeed" is expressed as a plain count.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dingtalk_mcp_server::client::{
    Credentials, Department, DirectoryApi, IssuedToken, ROOT_DEPARTMENT_ID, User, UserSummary,
};
use dingtalk_mcp_server::directory::DirectoryService;
use dingtalk_mcp_server::error::{DirectoryError, DirectoryResult};
use dingtalk_mcp_server::retry::RetryConfig;

#[derive(Default)]
pub struct MockDirectory {
    children: HashMap<i64, Vec<Department>>,
    members: HashMap<i64, Vec<UserSummary>>,
    details: HashMap<String, User>,
    broken_listings: HashSet<i64>,
    broken_members: HashSet<i64>,

    pub token_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub member_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    /// Token values observed by member listings, in call order.
    pub tokens_seen: Mutex<Vec<String>>,

    token_auth_failures: AtomicUsize,
    token_transient_failures: AtomicUsize,
    member_auth_failures: AtomicUsize,
    member_rate_limit_failures: AtomicUsize,
    member_transient_failures: AtomicUsize,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the children listed under `parent_id`.
    pub fn with_children(mut self, parent_id: i64, children: Vec<Department>) -> Self {
        self.children.insert(parent_id, children);
        self
    }

    /// Declare the member listing of one department.
    pub fn with_users(mut self, department_id: i64, users: Vec<UserSummary>) -> Self {
        self.members.insert(department_id, users);
        self
    }

    /// Declare the detail record returned for `user.id`.
    pub fn with_detail(mut self, user: User) -> Self {
        self.details.insert(user.id.clone(), user);
        self
    }

    /// Reject the next `times` credential exchanges as unauthorized.
    pub fn fail_token_with_auth(self, times: usize) -> Self {
        self.token_auth_failures.store(times, Ordering::SeqCst);
        self
    }

    /// Fail the next `times` credential exchanges with a transient error.
    pub fn fail_token_with_transient(self, times: usize) -> Self {
        self.token_transient_failures.store(times, Ordering::SeqCst);
        self
    }

    /// Reject the next `times` member listings as unauthorized.
    pub fn fail_members_with_auth(self, times: usize) -> Self {
        self.member_auth_failures.store(times, Ordering::SeqCst);
        self
    }

    /// Rate-limit the next `times` member listings.
    pub fn fail_members_with_rate_limit(self, times: usize) -> Self {
        self.member_rate_limit_failures.store(times, Ordering::SeqCst);
        self
    }

    /// Fail the next `times` member listings with a transient error.
    pub fn fail_members_with_transient(self, times: usize) -> Self {
        self.member_transient_failures.store(times, Ordering::SeqCst);
        self
    }

    /// Make every child listing of `department_id` fail permanently.
    pub fn break_listing(mut self, department_id: i64) -> Self {
        self.broken_listings.insert(department_id);
        self
    }

    /// Make every member listing of `department_id` fail permanently.
    pub fn break_members(mut self, department_id: i64) -> Self {
        self.broken_members.insert(department_id);
        self
    }
}

/// Consume one unit from a scripted failure budget.
fn consume(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

impl DirectoryApi for MockDirectory {
    async fn fetch_token(&self, _credentials: &Credentials) -> DirectoryResult<IssuedToken> {
        // Widen the race window so concurrent callers overlap the exchange
        tokio::time::sleep(Duration::from_millis(10)).await;
        let call = self.token_calls.fetch_add(1, Ordering::SeqCst);
        if consume(&self.token_auth_failures) {
            return Err(DirectoryError::auth(
                "token_fetch",
                40001,
                "invalid appkey or appsecret",
            ));
        }
        if consume(&self.token_transient_failures) {
            return Err(DirectoryError::transient("token_fetch", "scripted outage"));
        }
        Ok(IssuedToken {
            value: format!("mock-token-{call}"),
            expires_in: 7200,
        })
    }

    async fn list_departments(
        &self,
        _token: &str,
        department_id: Option<i64>,
        _include_children: bool,
    ) -> DirectoryResult<Vec<Department>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let id = department_id.unwrap_or(ROOT_DEPARTMENT_ID);
        if self.broken_listings.contains(&id) {
            return Err(DirectoryError::protocol(
                "department_list",
                "scripted failure",
            ));
        }
        self.children
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::department_not_found(id))
    }

    async fn list_users(
        &self,
        token: &str,
        department_id: i64,
    ) -> DirectoryResult<Vec<UserSummary>> {
        self.member_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(token.to_string());
        if consume(&self.member_auth_failures) {
            return Err(DirectoryError::auth(
                "user_list",
                40014,
                "invalid access token",
            ));
        }
        if consume(&self.member_rate_limit_failures) {
            return Err(DirectoryError::rate_limited(
                "user_list",
                Some(Duration::from_millis(5)),
            ));
        }
        if consume(&self.member_transient_failures) {
            return Err(DirectoryError::transient("user_list", "scripted surge"));
        }
        if self.broken_members.contains(&department_id) {
            return Err(DirectoryError::protocol("user_list", "scripted failure"));
        }
        self.members
            .get(&department_id)
            .cloned()
            .ok_or_else(|| DirectoryError::department_not_found(department_id))
    }

    async fn get_user(&self, _token: &str, user_id: &str) -> DirectoryResult<User> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(user_id)
            .cloned()
            .ok_or_else(|| DirectoryError::user_not_found(user_id))
    }
}

/// Member listing entry.
pub fn summary(id: &str, name: &str) -> UserSummary {
    UserSummary {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Detail record with a predictable email and no optional contact fields.
pub fn detail(id: &str, name: &str, department_ids: &[i64]) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        mobile: None,
        email: Some(format!("{}@example.com", id)),
        title: None,
        department_ids: department_ids.iter().copied().collect(),
    }
}

/// Fixed organization used by most tests:
///
/// ```text
/// root (1)
/// ├── Engineering (2): Alice (u100), Bob (u200)
/// │   └── Platform (4): Bob (u200)
/// └── Sales (3): Carol (u300), Alice (u101)
/// ```
///
/// Two distinct people are named Alice; Bob sits in two departments.
pub fn org_fixture() -> MockDirectory {
    MockDirectory::new()
        .with_children(
            1,
            vec![
                Department::new(2, "Engineering", Some(1)),
                Department::new(3, "Sales", Some(1)),
            ],
        )
        .with_children(2, vec![Department::new(4, "Platform", Some(2))])
        .with_children(3, vec![])
        .with_children(4, vec![])
        .with_users(1, vec![])
        .with_users(2, vec![summary("u100", "Alice"), summary("u200", "Bob")])
        .with_users(3, vec![summary("u300", "Carol"), summary("u101", "Alice")])
        .with_users(4, vec![summary("u200", "Bob")])
        .with_detail(detail("u100", "Alice", &[2]))
        .with_detail(detail("u101", "Alice", &[3]))
        .with_detail(detail("u200", "Bob", &[2, 4]))
        .with_detail(detail("u300", "Carol", &[3]))
}

/// Service over `mock` with the fast retry profile the tests rely on.
pub fn service_for(mock: &Arc<MockDirectory>) -> DirectoryService<MockDirectory> {
    DirectoryService::new(Arc::clone(mock), Credentials::new("test-key", "test-secret"))
        .with_retry_config(RetryConfig::quick())
}
