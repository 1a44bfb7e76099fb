pub mod config;
pub mod serve;

pub use config::{MalformedLinePolicy, ServerConfig};
pub use serve::{serve, serve_stdio, ServeError, ServeStats};
