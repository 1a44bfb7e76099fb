use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version carried in every message.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request.
///
/// Every member is optional on the wire: a missing `id` is echoed as `null`,
/// a missing `method` is answered as an unknown method, and missing `params`
/// behave like an empty object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub method: String,
    #[serde(default = "empty_object")]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Create a request with the given id.
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;

/// Why an input line could not be turned into a request.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Decode one raw input line into a request.
pub fn decode_bytes(line: &[u8]) -> Result<JsonRpcRequest, DecodeError> {
    decode_line(std::str::from_utf8(line)?)
}

/// Decode one line of input into a request.
///
/// Only the top-level shape is checked here; members with unexpected types
/// are tolerated and handled by the dispatcher.
pub fn decode_line(line: &str) -> Result<JsonRpcRequest, DecodeError> {
    let value: Value = serde_json::from_str(line.trim())?;

    let Value::Object(mut map) = value else {
        return Err(DecodeError::NotAnObject(kind_of(&value)));
    };

    Ok(JsonRpcRequest {
        jsonrpc: match map.remove("jsonrpc") {
            Some(Value::String(v)) => v,
            _ => default_version(),
        },
        id: map.remove("id").unwrap_or(Value::Null),
        method: match map.remove("method") {
            Some(Value::String(m)) => m,
            _ => String::new(),
        },
        params: map.remove("params").unwrap_or_else(empty_object),
    })
}

/// Encode a response as a single line, without the trailing newline.
pub fn encode_response(response: &JsonRpcResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string(response)
}

/// Encode a request as a single line, without the trailing newline.
pub fn encode_request(request: &JsonRpcRequest) -> Result<String, serde_json::Error> {
    serde_json::to_string(request)
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
