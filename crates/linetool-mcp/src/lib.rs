pub mod builtin;
pub mod dispatch;
pub mod jsonrpc;
pub mod tools;

pub use dispatch::Dispatcher;
pub use jsonrpc::{decode_bytes, decode_line, DecodeError, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use tools::ToolRegistry;
