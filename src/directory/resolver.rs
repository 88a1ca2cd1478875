//! Name-based user search across the department hierarchy.
//!
//! The upstream API has no server-side name search, so resolution is a
//! client-side scan: walk the hierarchy, list each department's members,
//! keep the ones whose name matches. A user listed under several departments
//! is reported once, annotated with every department the name was found in.

use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;
use uuid::Uuid;

use crate::client::{Department, DirectoryApi, User};
use crate::error::DirectoryResult;

use super::core::DirectoryService;

/// Tunables for the search operation.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Stop walking as soon as the first previously-unseen user matches.
    ///
    /// Off by default: the exhaustive scan is what makes the department
    /// annotations complete. Early exit trades that completeness for
    /// latency on large tenants.
    pub stop_on_first_match: bool,
}

/// Department a match was sighted in (id plus display name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentRef {
    pub id: i64,
    pub name: String,
}

impl From<&Department> for DepartmentRef {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
        }
    }
}

/// One matched user with every department the name was found under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserMatch {
    pub user: User,
    pub departments: Vec<DepartmentRef>,
}

impl UserMatch {
    fn new(user: User, department: &Department) -> Self {
        Self {
            user,
            departments: vec![department.into()],
        }
    }

    fn note_department(&mut self, department: &Department) {
        if self.departments.iter().all(|seen| seen.id != department.id) {
            self.departments.push(department.into());
        }
    }
}

/// Outcome of a name search.
///
/// An empty `matches` is a successful "nobody by that name", not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub matches: Vec<UserMatch>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

impl<C: DirectoryApi> DirectoryService<C> {
    /// Find every user whose name equals `name` exactly (case-sensitive),
    /// deduplicated by user id.
    ///
    /// Walks the hierarchy in level order. The first sighting of a user
    /// costs one detail fetch; repeat sightings under other departments only
    /// extend that user's department annotations. With
    /// [`stop_on_first_match`](SearchOptions::stop_on_first_match) the walk
    /// ends right after the first new match is enriched.
    ///
    /// Any failure while listing members, fetching details, or advancing the
    /// walk aborts the search, annotated with the department being processed.
    pub async fn find_user_by_name(&self, name: &str) -> DirectoryResult<SearchResult> {
        let request_id = Uuid::new_v4().to_string();
        info!("search_user_by_name (name: '{name}') started (request: '{request_id}')");

        let mut matches: Vec<UserMatch> = Vec::new();
        let mut index_by_id: HashMap<String, usize> = HashMap::new();
        let mut walk = self.walk_tree();

        'walk: while let Some(department) = walk.next().await? {
            let members = self
                .users_in(department.id)
                .await
                .map_err(|err| err.in_department(department.id))?;
            for member in members {
                if member.name != name {
                    continue;
                }
                match index_by_id.get(&member.id) {
                    Some(&at) => matches[at].note_department(&department),
                    None => {
                        let user = self
                            .user_detail(&member.id)
                            .await
                            .map_err(|err| err.in_department(department.id))?;
                        index_by_id.insert(member.id.clone(), matches.len());
                        matches.push(UserMatch::new(user, &department));
                        if self.search.stop_on_first_match {
                            debug!(
                                "search_user_by_name stopping at first match (request: '{request_id}')"
                            );
                            break 'walk;
                        }
                    }
                }
            }
        }

        info!(
            "search_user_by_name found {} matching users (request: '{request_id}')",
            matches.len()
        );
        Ok(SearchResult {
            query: name.to_string(),
            matches,
        })
    }
}
