//! User search handler for MCP integration
//!
//! Implements the organization-wide name lookup tool. The handler drives
//! the hierarchy walk in the directory service and shapes the matches into
//! a structured response an AI agent can reason about.

use super::error_content;
use crate::client::DirectoryApi;
use crate::mcp::core::{DirectoryMcpServer, ToolResult};
use serde_json::{Value, json};

/// Handle organization-wide user search through MCP
///
/// Walks every department looking for users whose name matches exactly.
/// An empty match list is a successful response, not an error; agents use
/// `total_matches` to distinguish "not found" from a failed search.
pub async fn handle_search_user_by_name<C: DirectoryApi + 'static>(
    server: &DirectoryMcpServer<C>,
    arguments: Value,
) -> ToolResult {
    let name = match arguments.get("name").and_then(|v| v.as_str()) {
        Some(name) => name,
        None => {
            return ToolResult {
                success: false,
                content: json!({"error": "Missing name parameter"}),
                metadata: None,
            };
        }
    };

    match server.service.find_user_by_name(name).await {
        Ok(result) => {
            let total = result.len();
            ToolResult {
                success: true,
                content: json!({
                    "query": result.query,
                    "matches": result.matches,
                    "total_matches": total,
                }),
                metadata: Some(json!({
                    "operation": "search_user_by_name",
                    "matched": total > 0
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
