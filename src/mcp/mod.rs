//! MCP (Model Context Protocol) Integration for the DingTalk Directory
//!
//! This module exposes the directory operations as structured tools for AI
//! agents. The integration enables AI systems to look up enterprise
//! directory data through a standardized protocol interface.
//!
//! ## Overview
//!
//! The MCP integration transforms directory operations into discoverable
//! tools that AI agents can understand and execute. This enables:
//!
//! - **Organization Exploration**: AI agents can map the department tree
//! - **People Lookup**: name searches resolve to full user profiles
//! - **Automatic Token Management**: agents never handle credentials
//! - **Error Handling**: structured error responses for AI decision making
//! - **Real-time Operations**: async operations suitable for AI workflows
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   AI Agent      │───▶│  MCP Protocol    │───▶│  Directory      │
//! │   (Client)      │    │  (This Module)   │    │  Service        │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!          │                        │                       │
//!          ▼                        ▼                       ▼
//!    Tool Discovery          Tool Execution        Token Caching
//!    Schema Learning         JSON Validation       Hierarchy Walking
//!    Error Handling          JSON-RPC Framing      Retry Policy
//! ```
//!
//! ## Module Structure
//!
//! - `core` - Core types and infrastructure (McpServerInfo, ToolResult, DirectoryMcpServer)
//! - `wire` - JSON-RPC 2.0 request/response envelopes
//! - `protocol` - Tool discovery, dispatch, and the stdio request loop
//! - `tools/` - JSON schema definitions for MCP tool discovery
//!   - `directory_schemas` - Directory operation tool schemas
//! - `handlers/` - Tool execution handlers
//!   - `token` - Manual token retrieval handler
//!   - `departments` - Department list and membership handlers
//!   - `search` - Organization-wide user search handler
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dingtalk_mcp_server::client::{Credentials, HttpDirectoryClient, DEFAULT_BASE_URL};
//! use dingtalk_mcp_server::directory::DirectoryService;
//! use dingtalk_mcp_server::mcp::DirectoryMcpServer;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create directory service
//!     let client = Arc::new(HttpDirectoryClient::new(DEFAULT_BASE_URL)?);
//!     let credentials = Credentials::new("app-key", "app-secret");
//!     let service = DirectoryService::new(client, credentials);
//!
//!     // Create MCP server
//!     let mcp_server = DirectoryMcpServer::new(service);
//!
//!     // Execute tool (simulating AI agent)
//!     let result = mcp_server
//!         .execute_tool("search_user_by_name", json!({"name": "Alice"}))
//!         .await;
//!
//!     if result.success {
//!         println!("Search completed");
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod handlers;
pub mod protocol;
pub mod tools;
pub mod wire;


// Re-export core types for convenience
pub use core::{DirectoryMcpServer, McpServerInfo, ToolResult};
pub use wire::{McpRequest, McpResponse};

// Protocol functions are accessed through DirectoryMcpServer methods
// No need to re-export protocol internals
