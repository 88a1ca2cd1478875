//! Core MCP integration infrastructure
//!
//! This module contains the foundational types and constructors for MCP integration.
//! It provides the basic building blocks that other MCP modules depend on.

use crate::client::DirectoryApi;
use crate::directory::DirectoryService;
use serde_json::Value;

/// Information about the MCP server for AI agent discovery
///
/// This structure provides metadata that AI agents use to understand
/// the capabilities and context of the directory server.
///
/// # Examples
///
/// ```rust
/// use dingtalk_mcp_server::mcp::McpServerInfo;
///
/// let server_info = McpServerInfo {
///     name: "Corporate Directory".to_string(),
///     version: "1.0.0".to_string(),
///     description: "DingTalk directory access for the HR assistant".to_string(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct McpServerInfo {
    /// Human-readable name of the directory server
    pub name: String,
    /// Version string for the server implementation
    pub version: String,
    /// Description of the server's purpose and capabilities
    pub description: String,
}

impl Default for McpServerInfo {
    fn default() -> Self {
        Self {
            name: "DingTalk Directory MCP Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Read-only access to the DingTalk enterprise directory".to_string(),
        }
    }
}

/// Tool execution result for MCP clients
///
/// Represents the outcome of an AI agent's tool execution request.
/// Provides structured feedback that AI agents can use for decision making.
///
/// # Examples
///
/// ```rust
/// use dingtalk_mcp_server::mcp::ToolResult;
/// use serde_json::json;
///
/// // Successful operation result
/// let success_result = ToolResult {
///     success: true,
///     content: json!({"departments": [{"id": 1, "name": "root"}]}),
///     metadata: Some(json!({"operation": "get_department_list"})),
/// };
///
/// // Error result
/// let error_result = ToolResult {
///     success: false,
///     content: json!({"error": "department 42 not found"}),
///     metadata: None,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Whether the tool execution was successful
    pub success: bool,
    /// The main result content (directory data or error information)
    pub content: Value,
    /// Optional metadata providing additional context about the operation
    pub metadata: Option<Value>,
}

/// MCP server wrapper for directory operations
///
/// This is the main entry point for MCP integration. It wraps a directory
/// service and exposes its operations as MCP tools that AI agents can
/// discover and execute over stdio.
///
/// # Type Parameters
///
/// * `C` - The directory API implementation that performs upstream calls
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use dingtalk_mcp_server::client::{Credentials, HttpDirectoryClient, DEFAULT_BASE_URL};
/// use dingtalk_mcp_server::directory::DirectoryService;
/// use dingtalk_mcp_server::mcp::DirectoryMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let client = Arc::new(HttpDirectoryClient::new(DEFAULT_BASE_URL)?);
///     let credentials = Credentials::new("app-key", "app-secret");
///     let service = DirectoryService::new(client, credentials);
///     let mcp_server = DirectoryMcpServer::new(service);
///
///     // Get available tools
///     let tools = mcp_server.get_tools();
///     println!("Available tools: {}", tools.len());
///
///     // Run MCP server
///     mcp_server.run_stdio().await?;
///     Ok(())
/// }
/// ```
pub struct DirectoryMcpServer<C: DirectoryApi> {
    pub(crate) service: DirectoryService<C>,
    pub(crate) server_info: McpServerInfo,
}

impl<C: DirectoryApi + 'static> DirectoryMcpServer<C> {
    /// Create a new MCP server with default configuration
    ///
    /// # Arguments
    /// * `service` - The directory service instance to wrap
    pub fn new(service: DirectoryService<C>) -> Self {
        Self {
            service,
            server_info: McpServerInfo::default(),
        }
    }

    /// Create a new MCP server with custom server information
    ///
    /// # Arguments
    /// * `service` - The directory service instance to wrap
    /// * `server_info` - Custom server metadata for AI agent discovery
    pub fn with_info(service: DirectoryService<C>, server_info: McpServerInfo) -> Self {
        Self {
            service,
            server_info,
        }
    }

    /// Get server information for introspection
    ///
    /// Returns a reference to the server metadata that AI agents use for
    /// discovery. This is primarily used for testing and debugging purposes.
    pub fn server_info(&self) -> &McpServerInfo {
        &self.server_info
    }
}
