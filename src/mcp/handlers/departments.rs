//! Department operation handlers for MCP integration
//!
//! This module contains the handlers behind the organization structure
//! tools. Both provide read-only access to the department hierarchy with
//! structured responses for AI agent processing.

use super::error_content;
use crate::client::DirectoryApi;
use crate::mcp::core::{DirectoryMcpServer, ToolResult};
use serde_json::{Value, json};

/// Handle department listing through MCP
///
/// Lists departments with an optional recursive expansion of the whole
/// hierarchy. `fetch_child` defaults to true: agents overwhelmingly want
/// the full tree, and the upstream default matches.
pub async fn handle_get_department_list<C: DirectoryApi + 'static>(
    server: &DirectoryMcpServer<C>,
    arguments: Value,
) -> ToolResult {
    let fetch_child = arguments
        .get("fetch_child")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);

    match server.service.department_list(fetch_child).await {
        Ok(departments) => {
            let total = departments.len();
            ToolResult {
                success: true,
                content: json!({
                    "departments": departments,
                    "total": total,
                }),
                metadata: Some(json!({
                    "operation": "get_department_list",
                    "fetch_child": fetch_child
                })),
            }
        }
        Err(error) => ToolResult {
            success: false,
            content: error_content(&error),
            metadata: None,
        },
    }
}

/// Handle department membership listing through MCP
///
/// Returns the users directly assigned to one department. Requires a
/// department id; an unknown id surfaces as a DEPARTMENT_NOT_FOUND failure
/// rather than an empty list.
pub async fn handle_get_department_users<C: DirectoryApi + 'static>(
    server: &DirectoryMcpServer<C>,
    arguments: Value,
) -> ToolResult {
    let department_id = match arguments.get("department_id").and_then(|v| v.as_i64()) {
        Some(id) => id,
        None => {
            return ToolResult {
                success: false,
                content: json!({"error": "Missing department_id parameter"}),
                metadata: None,
            };
        }
    };

    match server.service.department_users(department_id).await {
        Ok(users) => {
            let total = users.len();
            ToolResult {
                success: true,
                content: json!({
                    "department_id": department_id,
                    "users": users,
                    "total": total,
                }),
                metadata: Some(json!({
                    "operation": "get_department_users",
                    "department_id": department_id
                })),
            }
        }
        Err(error) => ToolResult {
            success: false,
            content: error_content(&error),
            metadata: None,
        },
    }
}
