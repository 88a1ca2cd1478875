//! Typed interface to the upstream directory API.
//!
//! `DirectoryApi` is the seam between the traversal/search layers and the
//! network: production code talks to [`HttpDirectoryClient`](super::http::HttpDirectoryClient),
//! tests substitute in-memory doubles. Implementations map every upstream
//! failure into the [`DirectoryError`](crate::error::DirectoryError) taxonomy
//! and never retry; the retry and token-refresh policy lives one layer up in
//! the operations service.

use std::future::Future;

use crate::error::DirectoryResult;

use super::types::{Credentials, Department, IssuedToken, User, UserSummary};

/// Async client for the four upstream directory calls.
///
/// Token parameters are plain strings: acquiring and caching tokens is the
/// token provider's job, and implementations treat the value as opaque.
pub trait DirectoryApi: Send + Sync {
    /// Exchange application credentials for a short-lived access token.
    fn fetch_token(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = DirectoryResult<IssuedToken>> + Send;

    /// List departments under `department_id` (absent means the top level).
    ///
    /// With `include_children` the upstream expands the whole subtree in one
    /// response; the lazy walker always asks for a single level instead.
    fn list_departments(
        &self,
        token: &str,
        department_id: Option<i64>,
        include_children: bool,
    ) -> impl Future<Output = DirectoryResult<Vec<Department>>> + Send;

    /// List the members of one department, in upstream order.
    ///
    /// Implementations follow upstream pagination internally and return the
    /// complete sequence.
    fn list_users(
        &self,
        token: &str,
        department_id: i64,
    ) -> impl Future<Output = DirectoryResult<Vec<UserSummary>>> + Send;

    /// Fetch the full record for one user id.
    fn get_user(
        &self,
        token: &str,
        user_id: &str,
    ) -> impl Future<Output = DirectoryResult<User>> + Send;
}
