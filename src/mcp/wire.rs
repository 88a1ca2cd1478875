//! JSON-RPC 2.0 message types for the MCP stdio transport
//!
//! MCP frames every exchange as a JSON-RPC 2.0 message, one per line on
//! stdin/stdout. This module defines the request envelope the server reads
//! and the response envelope it writes, plus the error codes the protocol
//! layer reports.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// JSON-RPC error code for payloads that do not parse as a request.
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC error code for methods the server does not implement.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC error code for requests missing required parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// Implementation-defined code for a tool that executed and failed.
pub const TOOL_EXECUTION_ERROR: i64 = -32000;

/// A single JSON-RPC request or notification read from stdin.
///
/// Notifications carry no `id` and must never be answered; everything
/// else gets exactly one [`McpResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub jsonrpc: String,
    /// Present on requests, absent on notifications.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl McpRequest {
    /// Whether this message is a notification (no response expected).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// A single JSON-RPC response written to stdout.
///
/// Exactly one of `result` and `error` is set; the other is omitted from
/// the serialized form entirely.
#[derive(Debug, Clone, Serialize)]
pub struct McpResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl McpResponse {
    /// Build a success response carrying `result`.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response with the given JSON-RPC error code.
    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(json!({
                "code": code,
                "message": message.into(),
            })),
        }
    }

    /// Build an error response that attaches structured `data` for the client.
    pub fn failure_with_data(
        id: Value,
        code: i64,
        message: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(json!({
                "code": code,
                "message": message.into(),
                "data": data,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_with_defaulted_params() {
        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#)
                .expect("request should parse");

        assert_eq!(request.method, "tools/list");
        assert_eq!(request.id, Some(json!(7)));
        assert!(request.params.is_null());
        assert!(!request.is_notification());
    }

    #[test]
    fn notification_has_no_id() {
        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .expect("notification should parse");

        assert!(request.is_notification());
    }

    #[test]
    fn success_response_omits_error_field() {
        let response = McpResponse::success(json!(1), json!({"ok": true}));
        let serialized = serde_json::to_string(&response).expect("response should serialize");

        assert!(serialized.contains("\"result\""));
        assert!(!serialized.contains("\"error\""));
    }

    #[test]
    fn failure_response_carries_code_and_message() {
        let response = McpResponse::failure(json!(2), METHOD_NOT_FOUND, "Method not found");

        let error = response.error.expect("error should be set");
        assert_eq!(error["code"], METHOD_NOT_FOUND);
        assert_eq!(error["message"], "Method not found");
        assert!(response.result.is_none());
    }

    #[test]
    fn failure_with_data_embeds_payload() {
        let response = McpResponse::failure_with_data(
            json!(3),
            TOOL_EXECUTION_ERROR,
            "Tool execution failed",
            json!({"error": "department 42 not found"}),
        );

        let error = response.error.expect("error should be set");
        assert_eq!(error["data"]["error"], "department 42 not found");
    }
}
