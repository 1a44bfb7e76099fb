use clap::ValueEnum;

/// What the serve loop does with a line that is not a JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MalformedLinePolicy {
    /// Emit nothing and keep reading.
    #[default]
    Drop,
    /// Emit a JSON-RPC parse error with a null id and keep reading.
    Respond,
}

/// Runtime settings for the serve loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerConfig {
    pub on_parse_error: MalformedLinePolicy,
}
