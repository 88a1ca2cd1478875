//! Authorized call execution.
//!
//! Every upstream round trip issued by the service goes through
//! [`DirectoryService::call`], which pairs the cached token with the request
//! and applies the shared failure policy: one token refresh when
//! authorization is rejected (covering both a rejected cached token and a
//! failing credential exchange), bounded exponential backoff for transient
//! and rate-limit failures, and immediate surfacing of everything else.

use std::future::Future;
use std::sync::Arc;

use log::{debug, warn};
use tokio::time::sleep;

use crate::client::{Department, DirectoryApi, User, UserSummary};
use crate::error::DirectoryResult;

use super::core::DirectoryService;

impl<C: DirectoryApi> DirectoryService<C> {
    /// Run one upstream call with a fresh token under the retry policy.
    ///
    /// `make` receives the client and the token value and performs exactly
    /// one client call; this wrapper owns all repetition. The auth-refresh
    /// and backoff budgets are per invocation, never shared across calls.
    pub(super) async fn call<T, F, Fut>(&self, operation: &'static str, make: F) -> DirectoryResult<T>
    where
        F: Fn(Arc<C>, String) -> Fut,
        Fut: Future<Output = DirectoryResult<T>> + Send,
    {
        let mut refreshed = false;
        let mut attempt: u32 = 0;
        loop {
            let token = match self.tokens.access_token().await {
                Ok(token) => token,
                Err(err) if err.is_auth() && !refreshed => {
                    refreshed = true;
                    warn!("{operation}: credential exchange rejected, retrying once ({err})");
                    self.tokens.invalidate().await;
                    continue;
                }
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff_delay(attempt, err.retry_after());
                    warn!(
                        "{operation}: token fetch failed ({err}), retry {} of {} in {delay:?}",
                        attempt + 1,
                        self.retry.max_retries
                    );
                    attempt += 1;
                    sleep(delay).await;
                    continue;
                }
                Err(err) => return Err(err),
            };

            match make(Arc::clone(&self.client), token).await {
                Ok(value) => {
                    if attempt > 0 || refreshed {
                        debug!("{operation}: succeeded after recovery");
                    }
                    return Ok(value);
                }
                Err(err) if err.is_auth() && !refreshed => {
                    refreshed = true;
                    warn!("{operation}: access token rejected upstream, refreshing once ({err})");
                    self.tokens.invalidate().await;
                }
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff_delay(attempt, err.retry_after());
                    warn!(
                        "{operation}: failed ({err}), retry {} of {} in {delay:?}",
                        attempt + 1,
                        self.retry.max_retries
                    );
                    attempt += 1;
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Departments directly under `parent_id` (absent means the top level).
    pub(crate) async fn list_children(
        &self,
        parent_id: Option<i64>,
    ) -> DirectoryResult<Vec<Department>> {
        self.call("list_departments", move |client, token| async move {
            client.list_departments(&token, parent_id, false).await
        })
        .await
    }

    /// Members of one department.
    pub(crate) async fn users_in(&self, department_id: i64) -> DirectoryResult<Vec<UserSummary>> {
        self.call("list_users", move |client, token| async move {
            client.list_users(&token, department_id).await
        })
        .await
    }

    /// Full record for one user id.
    pub(crate) async fn user_detail(&self, user_id: &str) -> DirectoryResult<User> {
        let user_id = user_id.to_owned();
        self.call("get_user", move |client, token| {
            let user_id = user_id.clone();
            async move { client.get_user(&token, &user_id).await }
        })
        .await
    }
}
