//! Token operation handler for MCP integration
//!
//! Exposes manual access token retrieval through the MCP protocol. The
//! other tools manage tokens transparently; this handler exists so agents
//! and operators can verify credentials without a directory round trip.

use super::error_content;
use crate::client::DirectoryApi;
use crate::mcp::core::{DirectoryMcpServer, ToolResult};
use serde_json::{Value, json};

/// Handle manual access token retrieval through MCP
///
/// Returns the cached token when it is still fresh, fetching a new one
/// otherwise. The token value is returned to the caller and never logged.
pub async fn handle_get_access_token<C: DirectoryApi + 'static>(
    server: &DirectoryMcpServer<C>,
    _arguments: Value,
) -> ToolResult {
    match server.service.access_token().await {
        Ok(token) => ToolResult {
            success: true,
            content: json!({"access_token": token}),
            metadata: Some(json!({
                "operation": "get_access_token"
            })),
        },
        Err(error) => ToolResult {
            success: false,
            content: error_content(&error),
            metadata: None,
        },
    }
}
