use crate::error::Error;
use crate::types::ToolArguments;

/// A named callable exposed by the server.
///
/// Implementations declare their required string parameters; the dispatcher
/// binds incoming arguments against them before calling [`Tool::invoke`].
pub trait Tool: Send + Sync {
    /// Names of the required arguments, in declaration order.
    fn parameters(&self) -> &[&str];

    /// Human-readable description, if the tool documents itself.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Run the tool. Any error is reported in-band by the dispatcher.
    fn invoke(&self, args: &ToolArguments) -> Result<String, Error>;
}
