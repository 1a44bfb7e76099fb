use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use anyhow::Context;
use serde_json::{json, Value};

use linetool_core::{ToolArguments, ToolSummary};
use linetool_mcp::dispatch::{METHOD_TOOLS_CALL, METHOD_TOOLS_LIST};
use linetool_mcp::jsonrpc::encode_request;
use linetool_mcp::{JsonRpcRequest, JsonRpcResponse};

/// Something that can carry a request to a tool server and bring back its
/// `result`.
pub trait ToolClient {
    /// Send one request and return the `result` member of the response.
    fn send_request(&mut self, method: &str, params: Value) -> anyhow::Result<Value>;

    /// Fetch the server's tool listing.
    fn list_tools(&mut self) -> anyhow::Result<Vec<ToolSummary>> {
        let result = self.send_request(METHOD_TOOLS_LIST, json!({}))?;
        let tools = result
            .get("tools")
            .cloned()
            .context("tools/list result has no 'tools' member")?;
        Ok(serde_json::from_value(tools)?)
    }

    /// Call a tool and return the raw result, which carries either a
    /// `message` or an `error`.
    fn call_tool(&mut self, name: &str, arguments: &ToolArguments) -> anyhow::Result<Value> {
        self.send_request(
            METHOD_TOOLS_CALL,
            json!({ "name": name, "arguments": arguments }),
        )
    }
}

/// Spawns a fresh server process for every request.
#[derive(Debug)]
pub struct ProcessClient {
    program: PathBuf,
    args: Vec<String>,
    next_id: i64,
}

impl ProcessClient {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            next_id: 1,
        }
    }

    /// Build a client from a whitespace-separated command line.
    pub fn from_command_line(command: &str) -> anyhow::Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().context("server command is empty")?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Client for the `linetool-server` binary installed beside this one.
    pub fn sibling_server() -> anyhow::Result<Self> {
        let exe = std::env::current_exe().context("cannot locate current executable")?;
        let dir = exe
            .parent()
            .context("current executable has no parent directory")?;
        let program = dir.join(format!("linetool-server{}", std::env::consts::EXE_SUFFIX));
        Ok(Self::new(program, Vec::new()))
    }
}

impl ToolClient for ProcessClient {
    fn send_request(&mut self, method: &str, params: Value) -> anyhow::Result<Value> {
        let request = JsonRpcRequest::new(self.next_id, method, params);
        self.next_id += 1;

        tracing::debug!(program = %self.program.display(), method, "spawning server");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to start {}", self.program.display()))?;

        let exchanged = exchange(&mut child, &request);

        // reap the child on every path, including a failed exchange
        drop(child.stdout.take());
        let status = child.wait()?;
        tracing::debug!(%status, "server exited");

        let line = exchanged?;

        if line.trim().is_empty() {
            anyhow::bail!("server closed without responding");
        }

        let response: JsonRpcResponse = serde_json::from_str(&line)?;
        if response.id != request.id {
            anyhow::bail!(
                "response id {} does not match request id {}",
                response.id,
                request.id
            );
        }

        if let Some(error) = response.error {
            anyhow::bail!("server error {}: {}", error.code, error.message);
        }

        response.result.context("response has no result")
    }
}

/// Write one request line, close stdin, and read one response line.
fn exchange(child: &mut Child, request: &JsonRpcRequest) -> anyhow::Result<String> {
    {
        let mut stdin = child.stdin.take().context("server stdin unavailable")?;
        writeln!(stdin, "{}", encode_request(request)?)?;
    }

    let stdout = child.stdout.take().context("server stdout unavailable")?;
    let mut line = String::new();
    BufReader::new(stdout).read_line(&mut line)?;
    Ok(line)
}
