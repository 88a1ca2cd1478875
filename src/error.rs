//! Error types for directory operations.
//!
//! This module provides the error taxonomy shared by the upstream client, the
//! token provider, and the traversal/search layers. Retry decisions are made
//! from the variant alone, so every upstream failure must map into exactly one
//! of these cases.

use std::time::Duration;

/// Main error type for directory operations.
///
/// Variants separate failures by how callers must react: authorization
/// failures get a single token refresh, rate limits and transient faults are
/// retried with backoff, and the rest surface immediately. No variant ever
/// carries credential or token material.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Upstream rejected the credentials or the access token
    #[error("Authorization rejected during {operation}: {message} (upstream code {code})")]
    Auth {
        operation: &'static str,
        code: i64,
        message: String,
    },

    /// Upstream throttled the call; `retry_after` is the suggested pause when
    /// the response carried one
    #[error("Upstream rate limit during {operation} (suggested backoff: {retry_after:?})")]
    RateLimited {
        operation: &'static str,
        retry_after: Option<Duration>,
    },

    /// Department id unknown to the upstream directory
    #[error("Department {department_id} not found upstream")]
    DepartmentNotFound { department_id: i64 },

    /// User id unknown to the upstream directory
    #[error("User '{user_id}' not found upstream")]
    UserNotFound { user_id: String },

    /// Network-level or upstream-availability failure worth retrying
    #[error("Transient upstream failure during {operation}: {message}")]
    Transient {
        operation: &'static str,
        message: String,
    },

    /// Response the client could not interpret, or an upstream error code
    /// outside the known taxonomy
    #[error("Protocol error during {operation}: {message}")]
    Protocol {
        operation: &'static str,
        message: String,
    },

    /// A traversal or search failure annotated with the department being
    /// processed when it happened
    #[error("Failed while processing department {department_id}: {source}")]
    InDepartment {
        department_id: i64,
        #[source]
        source: Box<DirectoryError>,
    },
}

// Convenience methods for creating common errors
impl DirectoryError {
    /// Create an authorization error carrying the upstream error code
    pub fn auth(operation: &'static str, code: i64, message: impl Into<String>) -> Self {
        Self::Auth {
            operation,
            code,
            message: message.into(),
        }
    }

    /// Create a rate limit error with an optional suggested backoff
    pub fn rate_limited(operation: &'static str, retry_after: Option<Duration>) -> Self {
        Self::RateLimited {
            operation,
            retry_after,
        }
    }

    /// Create a department not found error
    pub fn department_not_found(department_id: i64) -> Self {
        Self::DepartmentNotFound { department_id }
    }

    /// Create a user not found error
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    /// Create a transient upstream error
    pub fn transient(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transient {
            operation,
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Protocol {
            operation,
            message: message.into(),
        }
    }

    /// Annotate this error with the department being processed when it
    /// occurred. Already-annotated errors keep their original department.
    pub fn in_department(self, department_id: i64) -> Self {
        match self {
            annotated @ Self::InDepartment { .. } => annotated,
            other => Self::InDepartment {
                department_id,
                source: Box::new(other),
            },
        }
    }

    /// True for authorization failures, which earn a single token refresh
    /// before the call is retried once.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// True for failures worth retrying with backoff. Annotated failures
    /// are final: the retry budget was already spent on the underlying call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transient { .. })
    }

    /// Suggested pause before the next attempt, when upstream provided one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            Self::InDepartment { source, .. } => source.retry_after(),
            _ => None,
        }
    }

    /// Stable machine-readable code for tool error payloads.
    ///
    /// Annotated failures report the underlying failure's code; the
    /// department context travels separately via [`department_id`](Self::department_id).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "AUTH_REJECTED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::DepartmentNotFound { .. } => "DEPARTMENT_NOT_FOUND",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::Transient { .. } => "UPSTREAM_UNAVAILABLE",
            Self::Protocol { .. } => "PROTOCOL_ERROR",
            Self::InDepartment { source, .. } => source.code(),
        }
    }

    /// Department id attached to this error, if any.
    pub fn department_id(&self) -> Option<i64> {
        match self {
            Self::DepartmentNotFound { department_id }
            | Self::InDepartment { department_id, .. } => Some(*department_id),
            _ => None,
        }
    }
}

// Result type alias for convenience
pub type DirectoryResult<T> = Result<T, DirectoryError>;
