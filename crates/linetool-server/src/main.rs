use clap::Parser;
use tracing_subscriber::EnvFilter;

use linetool_mcp::{Dispatcher, ToolRegistry};
use linetool_server::{MalformedLinePolicy, ServerConfig};

#[derive(Parser)]
#[command(
    name = "linetool-server",
    about = "Serve line-delimited JSON tool requests on stdin/stdout"
)]
struct Cli {
    /// What to do with input lines that are not JSON objects
    #[arg(
        long,
        env = "LINETOOL_ON_PARSE_ERROR",
        value_enum,
        default_value_t = MalformedLinePolicy::Drop
    )]
    on_parse_error: MalformedLinePolicy,
}

fn main() -> anyhow::Result<()> {
    // stdout is the protocol channel
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = ToolRegistry::with_builtins();
    tracing::info!("linetool server ready with {} tools", registry.len());

    let dispatcher = Dispatcher::new(registry);
    let config = ServerConfig {
        on_parse_error: cli.on_parse_error,
    };

    linetool_server::serve_stdio(&dispatcher, config)?;

    Ok(())
}
