//! DingTalk directory MCP server library.
//!
//! Exposes the DingTalk enterprise directory (departments and users) to AI
//! agents as MCP tools, with cached token management, typed upstream errors,
//! and a bounded retry policy.
//!
//! # Core Components
//!
//! - [`DirectoryService`] - Directory operations with token and retry handling
//! - [`DirectoryApi`] - Trait for implementing upstream transports
//! - [`DirectoryMcpServer`] - MCP tool surface over a directory service
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dingtalk_mcp_server::client::{Credentials, HttpDirectoryClient, DEFAULT_BASE_URL};
//! use dingtalk_mcp_server::directory::DirectoryService;
//! use dingtalk_mcp_server::mcp::DirectoryMcpServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpDirectoryClient::new(DEFAULT_BASE_URL)?);
//! let credentials = Credentials::new("app-key", "app-secret");
//! let service = DirectoryService::new(client, credentials);
//! let mcp_server = DirectoryMcpServer::new(service);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
/// Model Context Protocol integration for AI agents.
pub mod mcp;
pub mod retry;

// Re-export commonly used types for convenience
pub use auth::{Token, TokenProvider};
pub use client::{
    Credentials, DEFAULT_BASE_URL, Department, DirectoryApi, HttpDirectoryClient, IssuedToken,
    ROOT_DEPARTMENT_ID, User, UserSummary,
};
pub use config::{AppConfig, ConfigError};
pub use directory::{
    DepartmentRef, DepartmentWalk, DirectoryService, SearchOptions, SearchResult, UserMatch,
};
pub use error::{DirectoryError, DirectoryResult};
pub use retry::RetryConfig;

// MCP integration re-exports
pub use mcp::{DirectoryMcpServer, McpServerInfo, ToolResult};
