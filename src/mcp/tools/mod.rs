//! MCP tool schema definitions
//!
//! This module contains all the JSON schema definitions for MCP tools that
//! AI agents can discover and execute. The schemas provide structured metadata
//! that enables automatic tool discovery and parameter validation.
//!
//! Each schema defines:
//! - Tool name for AI agent discovery
//! - Human-readable description of functionality
//! - JSON Schema validation for input parameters
//!
//! These schemas are consumed by the MCP protocol layer and are not intended
//! for direct use by application developers. They are automatically registered
//! when the MCP server initializes and provide the foundation for AI agent
//! tool discovery and execution.

pub mod directory_schemas;

// Re-export commonly used schema functions for convenience
pub use directory_schemas::*;
