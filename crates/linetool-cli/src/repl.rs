//! Interactive prompt: `list`, `<tool_name> [<arg>]`, `quit`.

use std::io::{self, BufRead, Write};

use linetool_core::ToolArguments;

use crate::client::ToolClient;

const PROMPT: &str = "mcp> ";
const DEFAULT_ARG: &str = "test";

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Quit,
    List,
    Call { tool: String, arg: String },
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Empty,
            "quit" => Self::Quit,
            "list" => Self::List,
            _ => {
                let mut parts = line.split_whitespace();
                let tool = parts.next().unwrap_or_default().to_string();
                let arg = parts.next().unwrap_or(DEFAULT_ARG).to_string();
                Self::Call { tool, arg }
            }
        }
    }
}

/// Run the prompt until `quit` or end of input.
pub fn run<C, R, W>(client: &mut C, mut input: R, out: &mut W) -> io::Result<()>
where
    C: ToolClient,
    R: BufRead,
    W: Write,
{
    writeln!(out, "=== Interactive MCP Client ===")?;
    writeln!(out, "Commands: list, <tool_name> <arg>, quit")?;
    writeln!(out)?;

    let mut buf = Vec::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(out)?;
            break;
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::debug!("input line is not valid UTF-8");
            writeln!(out, "Error")?;
            continue;
        };

        match Command::parse(line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::List => match client.list_tools() {
                Ok(tools) => {
                    for tool in tools {
                        writeln!(out, "{}: {}", tool.name, tool.description)?;
                    }
                }
                Err(e) => {
                    tracing::debug!("list failed: {e:#}");
                    writeln!(out, "Error")?;
                }
            },
            Command::Call { tool, arg } => match call(client, &tool, &arg) {
                Ok(message) => writeln!(out, "{message}")?,
                Err(e) => {
                    tracing::debug!(tool = %tool, "call failed: {e:#}");
                    writeln!(out, "Error")?;
                }
            },
        }
    }

    Ok(())
}

fn call<C: ToolClient>(client: &mut C, tool: &str, arg: &str) -> anyhow::Result<String> {
    let arguments: ToolArguments = [("name", arg)].into_iter().collect();
    let result = client.call_tool(tool, &arguments)?;

    match result.get("message").and_then(serde_json::Value::as_str) {
        Some(message) => Ok(message.to_string()),
        None => anyhow::bail!("no message in result: {result}"),
    }
}
