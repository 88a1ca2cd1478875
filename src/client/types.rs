//! Wire and domain types for the upstream directory.
//!
//! Field attributes translate DingTalk's wire names (`parentid`, `userid`,
//! `position`) into the names the rest of the crate speaks, so serialized
//! tool output never leaks upstream spelling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Fixed id of the tenant root department.
///
/// The upstream listing only ever describes children, so traversals start
/// from a synthesized entry with this id (see [`Department::root`]).
pub const ROOT_DEPARTMENT_ID: i64 = 1;

/// Application credentials identifying this integration to the upstream API.
///
/// Immutable after construction. The `Debug` rendering redacts the secret so
/// the pair can appear in diagnostics without leaking it; nothing in this
/// crate logs the secret in any form.
#[derive(Clone)]
pub struct Credentials {
    pub app_key: String,
    pub app_secret: String,
}

impl Credentials {
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Token grant as issued by the upstream token endpoint.
#[derive(Clone, Deserialize)]
pub struct IssuedToken {
    #[serde(rename = "access_token")]
    pub value: String,
    /// Lifetime in seconds from the moment of issue (upstream grants 7200).
    pub expires_in: u64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// One node of the department hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(
        rename(deserialize = "parentid"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<i64>,
}

impl Department {
    pub fn new(id: i64, name: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }

    /// The synthesized tenant root the upstream never lists.
    pub fn root() -> Self {
        Self {
            id: ROOT_DEPARTMENT_ID,
            name: "root".to_string(),
            parent_id: None,
        }
    }
}

/// Membership listing entry: just enough to match a name against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename(deserialize = "userid"))]
    pub id: String,
    pub name: String,
}

/// Full user record from the detail endpoint.
///
/// `department_ids` is a set because upstream may list a user under the same
/// department more than once; the set keeps output deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename(deserialize = "userid"))]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        rename(deserialize = "position"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(rename(deserialize = "department"), default)]
    pub department_ids: BTreeSet<i64>,
}
