//! Directory tool schema definitions for MCP integration
//!
//! This module contains JSON schema definitions that enable AI agents to
//! discover and understand the available directory operations. The schemas
//! define parameter validation and provide structured metadata for tool
//! execution.
//!
//! **Available Tools**:
//! - [`get_access_token_tool`] - Manual token retrieval for debugging
//! - [`get_department_list_tool`] - Organization structure listing
//! - [`get_department_users_tool`] - Department membership listing
//! - [`search_user_by_name_tool`] - Organization-wide user lookup
//!
//! The descriptions are written for AI agent consumption: they spell out
//! when a tool is the right choice and what the response contains, so an
//! agent can plan multi-step directory queries without trial and error.

use serde_json::{Value, json};

/// Schema definition for the access token retrieval tool
pub fn get_access_token_tool() -> Value {
    json!({
        "name": "get_access_token",
        "description": "Retrieves an access token from the DingTalk API for authentication purposes. \
            Use this tool when you need to manually obtain an access token for testing or debugging. \
            Note: all other tools handle token management automatically, so you rarely need to call this directly. \
            Returns a valid access token string.",
        "inputSchema": {
            "type": "object",
            "properties": {},
            "required": []
        }
    })
}

/// Schema definition for the department listing tool
pub fn get_department_list_tool() -> Value {
    json!({
        "name": "get_department_list",
        "description": "Retrieves a list of departments in the organization. \
            Use this tool to get an overview of the organization structure, find department IDs \
            for other calls, check the hierarchy of departments, or verify that a department exists. \
            The response includes department IDs, names, and parent department IDs. \
            Set fetch_child=false if you only need the top-level departments.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "fetch_child": {
                    "type": "boolean",
                    "description": "Whether to include child departments in the response. Default is true.",
                    "default": true
                }
            },
            "required": []
        }
    })
}

/// Schema definition for the department membership tool
pub fn get_department_users_tool() -> Value {
    json!({
        "name": "get_department_users",
        "description": "Retrieves the list of users in a specific department. \
            Use this tool to get all members of a department, check whether a user belongs to it, \
            or find user IDs for follow-up queries. \
            Requires a valid department ID (obtainable from get_department_list). \
            Returns basic user information: user ID and name.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "department_id": {
                    "type": "integer",
                    "description": "The ID of the department to query. Must be a valid department ID from get_department_list."
                }
            },
            "required": ["department_id"]
        }
    })
}

/// Schema definition for the organization-wide user search tool
pub fn search_user_by_name_tool() -> Value {
    json!({
        "name": "search_user_by_name",
        "description": "Searches for a user across all departments by their name. \
            Use this tool to find detailed information about a specific user, verify that a user \
            exists in the organization, get their contact information, or check which departments \
            they belong to. \
            Returns comprehensive details for every user whose name matches exactly: user ID, name, \
            mobile, email, title, and the departments where the user was found. \
            Note: this operation walks the whole department tree and may take longer.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The exact name of the user to search for. Must match the user's name in DingTalk exactly."
                }
            },
            "required": ["name"]
        }
    })
}
