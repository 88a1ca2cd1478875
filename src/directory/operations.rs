//! Public directory operations.
//!
//! One method per exposed tool (the name search lives in
//! [`resolver`](super::resolver)). Each operation gets a generated request id
//! so concurrent invocations stay distinguishable in the logs.

use log::info;
use uuid::Uuid;

use crate::client::{Department, DirectoryApi, UserSummary};
use crate::error::DirectoryResult;

use super::core::DirectoryService;

impl<C: DirectoryApi> DirectoryService<C> {
    /// Current access token value, cached or freshly fetched.
    pub async fn access_token(&self) -> DirectoryResult<String> {
        let request_id = Uuid::new_v4().to_string();
        info!("get_access_token started (request: '{request_id}')");
        let value = self
            .call("get_access_token", |_client, token| async move { Ok(token) })
            .await?;
        info!("get_access_token succeeded (request: '{request_id}')");
        Ok(value)
    }

    /// Department listing: the full walked tree, or only the top level.
    ///
    /// With `fetch_child` the result is the complete hierarchy in walk
    /// order, synthesized root entry first. Without it, only the root's
    /// immediate children are listed.
    pub async fn department_list(&self, fetch_child: bool) -> DirectoryResult<Vec<Department>> {
        let request_id = Uuid::new_v4().to_string();
        info!("get_department_list (fetch_child: {fetch_child}) started (request: '{request_id}')");
        let departments = if fetch_child {
            self.walk_tree().collect().await?
        } else {
            self.list_children(None).await?
        };
        info!(
            "get_department_list returned {} departments (request: '{request_id}')",
            departments.len()
        );
        Ok(departments)
    }

    /// Members of one department, in upstream order.
    pub async fn department_users(&self, department_id: i64) -> DirectoryResult<Vec<UserSummary>> {
        let request_id = Uuid::new_v4().to_string();
        info!(
            "get_department_users (department: {department_id}) started (request: '{request_id}')"
        );
        let users = self.users_in(department_id).await?;
        info!(
            "get_department_users returned {} users (request: '{request_id}')",
            users.len()
        );
        Ok(users)
    }
}
