//! Line-delimited stdio serve loop.
//!
//! Reads one request per line, dispatches it, writes one response line and
//! flushes before reading the next. Blocking, single-threaded.

use std::io::{self, BufRead, Write};

use serde_json::Value;

use linetool_mcp::jsonrpc::{encode_response, PARSE_ERROR};
use linetool_mcp::{decode_bytes, Dispatcher, JsonRpcResponse};

use crate::config::{MalformedLinePolicy, ServerConfig};

/// Failures that end the serve loop with an error.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to write response: {0}")]
    Write(#[from] io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub handled: usize,
    pub malformed: usize,
}

/// Serve requests from `reader` until end of input or a read failure.
pub fn serve<R, W>(
    dispatcher: &Dispatcher,
    config: ServerConfig,
    mut reader: R,
    mut writer: W,
) -> Result<ServeStats, ServeError>
where
    R: BufRead,
    W: Write,
{
    let mut stats = ServeStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("input stream failed: {e}");
                break;
            }
        }

        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let request = match decode_bytes(&line) {
            Ok(r) => r,
            Err(e) => {
                stats.malformed += 1;
                match config.on_parse_error {
                    MalformedLinePolicy::Drop => {
                        tracing::warn!("dropping malformed line: {e}");
                    }
                    MalformedLinePolicy::Respond => {
                        tracing::warn!("rejecting malformed line: {e}");
                        let resp = JsonRpcResponse::error(
                            Value::Null,
                            PARSE_ERROR,
                            format!("Parse error: {e}"),
                        );
                        write_response(&mut writer, &resp)?;
                    }
                }
                continue;
            }
        };

        let response = dispatcher.dispatch(&request);
        write_response(&mut writer, &response)?;
        stats.handled += 1;
    }

    tracing::info!(
        handled = stats.handled,
        malformed = stats.malformed,
        "input closed, shutting down"
    );
    Ok(stats)
}

fn write_response<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> Result<(), ServeError> {
    let line = encode_response(response)?;
    writeln!(writer, "{line}")?;
    writer.flush()?;
    Ok(())
}

/// Serve on the process's stdin and stdout.
pub fn serve_stdio(dispatcher: &Dispatcher, config: ServerConfig) -> Result<ServeStats, ServeError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(dispatcher, config, stdin.lock(), stdout.lock())
}
