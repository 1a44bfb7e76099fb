/// Core error type for the linetool system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{tool}() missing required argument: '{argument}'")]
    MissingArgument { tool: String, argument: String },

    #[error("{tool}() got an unexpected argument '{argument}'")]
    UnexpectedArgument { tool: String, argument: String },

    #[error("{tool}() arguments must be an object, not {found}")]
    InvalidArguments { tool: String, found: String },

    #[error("{0}")]
    Execution(String),
}
