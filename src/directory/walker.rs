//! Lazy breadth-first traversal of the department hierarchy.
//!
//! The hierarchy is discovered incrementally: the upstream API only answers
//! "list the children of X", so the walk maintains a FIFO frontier and a
//! visited-id set. The set makes the traversal immune to cyclic or repeated
//! upstream data, which directory backends do produce after reorganizations.

use std::collections::{HashSet, VecDeque};

use crate::client::{Department, DirectoryApi};
use crate::error::DirectoryResult;

use super::core::DirectoryService;

/// Pull-based cursor over the hierarchy in level order.
///
/// Created by [`DirectoryService::walk`] or [`DirectoryService::walk_tree`].
/// Child listings are fetched on demand: the children of the department
/// yielded by one [`next`](DepartmentWalk::next) call are requested no
/// earlier than the following call, so a caller that stops early issues no
/// surplus upstream traffic.
pub struct DepartmentWalk<'a, C: DirectoryApi> {
    service: &'a DirectoryService<C>,
    frontier: VecDeque<Department>,
    visited: HashSet<i64>,
    unexpanded: Option<i64>,
}

impl<C: DirectoryApi> DirectoryService<C> {
    /// Start a walk at an arbitrary department; `start` is yielded first.
    pub fn walk(&self, start: Department) -> DepartmentWalk<'_, C> {
        DepartmentWalk {
            service: self,
            visited: HashSet::from([start.id]),
            frontier: VecDeque::from([start]),
            unexpanded: None,
        }
    }

    /// Walk the whole tenant tree from the synthesized root entry.
    pub fn walk_tree(&self) -> DepartmentWalk<'_, C> {
        self.walk(Department::root())
    }
}

impl<C: DirectoryApi> DepartmentWalk<'_, C> {
    /// Yield the next department in level order, `None` once exhausted.
    ///
    /// Visit order is deterministic for a fixed upstream tree: siblings keep
    /// upstream order, levels are exhausted before deeper ones. Errors carry
    /// the id of the department whose children were being fetched; the walk
    /// is not restartable after one.
    pub async fn next(&mut self) -> DirectoryResult<Option<Department>> {
        if let Some(parent_id) = self.unexpanded.take() {
            let children = self
                .service
                .list_children(Some(parent_id))
                .await
                .map_err(|err| err.in_department(parent_id))?;
            for child in children {
                // A cycle or a duplicate listing resolves to a no-op here
                if self.visited.insert(child.id) {
                    self.frontier.push_back(child);
                }
            }
        }
        match self.frontier.pop_front() {
            Some(department) => {
                self.unexpanded = Some(department.id);
                Ok(Some(department))
            }
            None => Ok(None),
        }
    }

    /// Drain the remaining walk into a vector.
    pub async fn collect(mut self) -> DirectoryResult<Vec<Department>> {
        let mut departments = Vec::new();
        while let Some(department) = self.next().await? {
            departments.push(department);
        }
        Ok(departments)
    }
}
