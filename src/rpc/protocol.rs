/// JSON-RPC 2.0 message structures and error-code mapping
///
/// Clients send one request per line and receive one response per line.
/// Dates inside params and results are always yyyy-MM-dd strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::EngineError;

/// JSON-RPC 2.0 request message
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// Unique identifier for this request
    pub id: Value,
    /// The operation to call (e.g. "streaks/compute")
    pub method: String,
    /// Parameters for the operation
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response message
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID this responds to
    pub id: Value,
    /// Successful result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (standard JSON-RPC codes plus application codes)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
}

/// JSON-RPC error codes
pub mod error_codes {
    /// Parse error - invalid JSON was received
    pub const PARSE_ERROR: i32 = -32700;
    /// Method not found
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application-specific codes, in the JSON-RPC reserved -32000..-32099
    // range.
    /// Caller has no valid user identity
    pub const UNAUTHENTICATED: i32 = -32001;
    /// Habit missing or owned by another user
    pub const HABIT_NOT_FOUND: i32 = -32002;
    /// Malformed date or other invalid domain input
    pub const INVALID_INPUT: i32 = -32003;
    /// Persistence layer failure
    pub const STORAGE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }

    /// Create an error response from an engine error
    pub fn engine_error(id: Value, err: &EngineError) -> Self {
        Self::error(id, engine_error_code(err), err.to_string())
    }
}

/// Map an engine error onto its wire code
pub fn engine_error_code(err: &EngineError) -> i32 {
    match err {
        EngineError::Unauthenticated => error_codes::UNAUTHENTICATED,
        EngineError::HabitNotFound { .. } => error_codes::HABIT_NOT_FOUND,
        EngineError::Domain(_) => error_codes::INVALID_INPUT,
        EngineError::Storage(_) => error_codes::STORAGE_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            engine_error_code(&EngineError::Unauthenticated),
            error_codes::UNAUTHENTICATED
        );
        assert_eq!(
            engine_error_code(&EngineError::HabitNotFound {
                habit_id: "x".to_string()
            }),
            error_codes::HABIT_NOT_FOUND
        );
        assert_eq!(
            engine_error_code(&EngineError::Domain(DomainError::MalformedDate(
                "nope".to_string()
            ))),
            error_codes::INVALID_INPUT
        );
    }

    #[test]
    fn test_success_response_shape() {
        let response = JsonRpcResponse::success(serde_json::json!(1), serde_json::json!({"ok": true}));
        let encoded = serde_json::to_string(&response).unwrap();

        assert!(encoded.contains("\"jsonrpc\":\"2.0\""));
        assert!(encoded.contains("\"result\""));
        assert!(!encoded.contains("\"error\""));
    }
}
