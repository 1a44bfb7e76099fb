use serde_json::{json, Value};

use linetool_core::{Error, ToolArguments};

use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use crate::tools::ToolRegistry;

pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";

pub const UNKNOWN_METHOD: &str = "Unknown method";
pub const UNKNOWN_TOOL: &str = "Unknown tool";

/// Turns decoded requests into responses against a fixed registry.
///
/// Every outcome, including failures, is reported inside `result`; the
/// response always echoes the request id.
#[derive(Debug)]
pub struct Dispatcher {
    registry: ToolRegistry,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Handle one request.
    #[must_use]
    pub fn dispatch(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %req.method, id = %req.id, "dispatching request");

        let result = match req.method.as_str() {
            METHOD_TOOLS_LIST => self.handle_tools_list(),
            METHOD_TOOLS_CALL => self.handle_tools_call(&req.params),
            _ => error_result(UNKNOWN_METHOD),
        };

        JsonRpcResponse::success(req.id.clone(), result)
    }

    fn handle_tools_list(&self) -> Value {
        json!({ "tools": self.registry.list() })
    }

    fn handle_tools_call(&self, params: &Value) -> Value {
        let Some(tool) = params
            .get("name")
            .and_then(Value::as_str)
            .and_then(|name| self.registry.resolve(name))
        else {
            return error_result(UNKNOWN_TOOL);
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match call_tool(&tool.name, tool.handler.as_ref(), &arguments) {
            Ok(message) => json!({ "message": message }),
            Err(err) => {
                tracing::debug!(tool = %tool.name, error = %err, "tool call failed");
                error_result(format!("Tool execution failed: {err}"))
            }
        }
    }
}

fn call_tool(
    name: &str,
    handler: &dyn linetool_core::Tool,
    arguments: &Value,
) -> Result<String, Error> {
    let args = ToolArguments::from_json(name, arguments)?;
    args.bind(name, handler.parameters())?;
    handler.invoke(&args)
}

fn error_result(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}
