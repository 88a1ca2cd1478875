//! MCP protocol layer for tool discovery and dispatch
//!
//! This module handles the core MCP protocol functionality including tool
//! discovery, execution dispatch, and the stdio request loop. It serves as
//! the interface between AI agents and the directory operations.

use super::core::{DirectoryMcpServer, ToolResult};
use super::handlers::{departments, search, token};
use super::tools::directory_schemas;
use super::wire::{self, McpRequest, McpResponse};
use crate::client::DirectoryApi;
use log::{debug, info, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// MCP protocol version implemented by this server.
const PROTOCOL_VERSION: &str = "2024-11-05";

impl<C: DirectoryApi + 'static> DirectoryMcpServer<C> {
    /// Get the list of available MCP tools as JSON
    ///
    /// Returns all tool definitions that AI agents can discover and execute.
    /// Each tool includes its schema, parameters, and documentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dingtalk_mcp_server::mcp::DirectoryMcpServer;
    /// # use dingtalk_mcp_server::client::HttpDirectoryClient;
    /// # async fn example(mcp_server: DirectoryMcpServer<HttpDirectoryClient>) {
    /// let tools = mcp_server.get_tools();
    /// println!("Available tools: {}", tools.len());
    /// # }
    /// ```
    pub fn get_tools(&self) -> Vec<Value> {
        vec![
            directory_schemas::get_access_token_tool(),
            directory_schemas::get_department_list_tool(),
            directory_schemas::get_department_users_tool(),
            directory_schemas::search_user_by_name_tool(),
        ]
    }

    /// Execute a tool by name with arguments
    ///
    /// This is the main dispatch function that routes tool execution requests
    /// to the appropriate handler based on the tool name.
    ///
    /// # Arguments
    /// * `tool_name` - The name of the tool to execute
    /// * `arguments` - JSON arguments for the tool execution
    ///
    /// # Returns
    /// A `ToolResult` containing the execution outcome
    pub async fn execute_tool(&self, tool_name: &str, arguments: Value) -> ToolResult {
        debug!("Executing MCP tool: {} with args: {}", tool_name, arguments);

        match tool_name {
            "get_access_token" => token::handle_get_access_token(self, arguments).await,
            "get_department_list" => {
                departments::handle_get_department_list(self, arguments).await
            }
            "get_department_users" => {
                departments::handle_get_department_users(self, arguments).await
            }
            "search_user_by_name" => search::handle_search_user_by_name(self, arguments).await,

            // Unknown tool
            _ => ToolResult {
                success: false,
                content: json!({
                    "error": "Unknown tool",
                    "tool_name": tool_name
                }),
                metadata: None,
            },
        }
    }

    /// Process one JSON-RPC message and produce the response to write back
    ///
    /// Returns `None` for notifications, which never receive a response.
    /// A payload that fails to parse is answered with a `-32700` error
    /// carrying a null id, since the request id is unrecoverable from a
    /// malformed message.
    pub async fn handle_mcp_request(&self, line: &str) -> Option<McpResponse> {
        let request: McpRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(error) => {
                warn!("Discarding unparseable MCP message: {}", error);
                return Some(McpResponse::failure(
                    Value::Null,
                    wire::PARSE_ERROR,
                    "Parse error",
                ));
            }
        };

        if request.is_notification() {
            debug!("Ignoring notification: {}", request.method);
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => McpResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": self.server_info.name,
                        "version": self.server_info.version,
                    }
                }),
            ),
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => McpResponse::success(id, json!({"tools": self.get_tools()})),
            "tools/call" => self.handle_tool_call(id, &request.params).await,
            _ => {
                debug!("Unknown MCP method: {}", request.method);
                McpResponse::failure(id, wire::METHOD_NOT_FOUND, "Method not found")
            }
        };

        Some(response)
    }

    /// Execute a `tools/call` request and wrap the outcome the way MCP
    /// clients expect.
    ///
    /// Successful results are serialized into a single text content block.
    /// Failures become a `-32000` error with the handler's structured error
    /// payload attached as `data`.
    async fn handle_tool_call(&self, id: Value, params: &Value) -> McpResponse {
        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name,
            None => {
                return McpResponse::failure(id, wire::INVALID_PARAMS, "Missing tool name");
            }
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        let result = self.execute_tool(tool_name, arguments).await;

        if result.success {
            McpResponse::success(
                id,
                json!({
                    "content": [{
                        "type": "text",
                        "text": result.content.to_string(),
                    }]
                }),
            )
        } else {
            McpResponse::failure_with_data(
                id,
                wire::TOOL_EXECUTION_ERROR,
                "Tool execution failed",
                result.content,
            )
        }
    }

    /// Run the MCP server using stdio communication
    ///
    /// Reads newline-delimited JSON-RPC requests from standard input and
    /// writes one response per line to standard output, the standard MCP
    /// transport. Returns when stdin closes.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use dingtalk_mcp_server::mcp::DirectoryMcpServer;
    /// # use dingtalk_mcp_server::client::HttpDirectoryClient;
    /// # async fn example(mcp_server: DirectoryMcpServer<HttpDirectoryClient>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    /// // Run MCP server
    /// mcp_server.run_stdio().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_stdio(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Directory MCP server ready for stdio communication");
        info!(
            "Available tools: {:?}",
            self.get_tools()
                .iter()
                .filter_map(|t| t.get("name").and_then(Value::as_str).map(String::from))
                .collect::<Vec<_>>()
        );

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_mcp_request(line).await {
                let payload = serde_json::to_string(&response)?;
                stdout.write_all(payload.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }
}
