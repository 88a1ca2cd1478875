//! MCP integration handlers
//!
//! This module contains all the handler implementations for MCP tool execution.
//! Handlers are organized by functional area to maintain clear separation of
//! concerns and enable focused testing and maintenance.

pub mod departments;
pub mod search;
pub mod token;

// Re-export handler functions for convenience
pub use departments::*;
pub use search::*;
pub use token::*;

use crate::error::DirectoryError;
use serde_json::{Value, json};

/// Shape a directory failure into the error payload handlers return.
///
/// Every payload carries a human-readable message and a stable error code.
/// Department and rate-limit context is attached when the error has it, so
/// AI agents can decide whether to retry, wait, or give up.
pub(super) fn error_content(error: &DirectoryError) -> Value {
    let mut content = json!({
        "error": error.to_string(),
        "error_code": error.code(),
    });
    if let Some(department_id) = error.department_id() {
        content["department_id"] = json!(department_id);
    }
    if let Some(retry_after) = error.retry_after() {
        content["retry_after_secs"] = json!(retry_after.as_secs());
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn error_content_includes_code_and_message() {
        let error = DirectoryError::protocol("department_list", "errcode 999: unexpected");
        let content = error_content(&error);

        assert_eq!(content["error_code"], "PROTOCOL_ERROR");
        assert!(content["error"].as_str().unwrap().contains("errcode 999"));
        assert!(content.get("department_id").is_none());
    }

    #[test]
    fn error_content_attaches_department_context() {
        let error = DirectoryError::department_not_found(42);
        let content = error_content(&error);

        assert_eq!(content["error_code"], "DEPARTMENT_NOT_FOUND");
        assert_eq!(content["department_id"], 42);
    }

    #[test]
    fn error_content_attaches_retry_hint() {
        let error = DirectoryError::rate_limited("user_list", Some(Duration::from_secs(30)));
        let content = error_content(&error);

        assert_eq!(content["error_code"], "RATE_LIMITED");
        assert_eq!(content["retry_after_secs"], 30);
    }
}
