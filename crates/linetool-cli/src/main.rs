use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use linetool_core::ToolArguments;

mod client;
mod repl;

use client::{ProcessClient, ToolClient};

#[derive(Parser)]
#[command(name = "linetool", about = "linetool CLI - call tools on a line-delimited JSON server")]
struct Cli {
    /// Server command line; defaults to the linetool-server binary next to this one
    #[arg(long, env = "LINETOOL_SERVER")]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt (the default)
    Repl,

    /// List the tools the server exposes
    List,

    /// Call one tool and print its message
    Call {
        /// Tool name
        tool: String,

        /// Tool argument as key=value; repeatable
        #[arg(long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    Ok((key.to_string(), value.to_string()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut client = match &cli.server {
        Some(command) => ProcessClient::from_command_line(command)?,
        None => ProcessClient::sibling_server()?,
    };

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            repl::run(&mut client, stdin.lock(), &mut stdout)?;
        }
        Commands::List => {
            for tool in client.list_tools()? {
                println!("{}: {}", tool.name, tool.description);
            }
        }
        Commands::Call { tool, args } => {
            let arguments: ToolArguments = args.into_iter().collect();
            let result = client.call_tool(&tool, &arguments)?;

            if let Some(message) = result.get("message").and_then(serde_json::Value::as_str) {
                println!("{message}");
            } else if let Some(error) = result.get("error").and_then(serde_json::Value::as_str) {
                anyhow::bail!("{error}");
            } else {
                anyhow::bail!("unexpected result: {result}");
            }
        }
    }

    Ok(())
}
