use std::io::Cursor;
use std::sync::Arc;

use serde_json::{json, Value};

use linetool_core::{Error, Tool, ToolArguments};
use linetool_mcp::{Dispatcher, ToolRegistry};
use linetool_server::{serve, MalformedLinePolicy, ServerConfig};

struct Shout;

impl Tool for Shout {
    fn parameters(&self) -> &[&str] {
        &["text"]
    }

    fn invoke(&self, args: &ToolArguments) -> Result<String, Error> {
        Ok(args.require("shout", "text")?.to_uppercase())
    }
}

fn request(id: i64, method: &str, params: &Value) -> String {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}).to_string()
}

fn exchange(registry: ToolRegistry, policy: MalformedLinePolicy, lines: &[String]) -> Vec<Value> {
    let dispatcher = Dispatcher::new(registry);
    let config = ServerConfig {
        on_parse_error: policy,
    };

    let mut input = lines.join("\n");
    input.push('\n');

    let mut out = Vec::new();
    serve(&dispatcher, config, Cursor::new(input), &mut out).unwrap();

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn exchange_builtins(lines: &[String]) -> Vec<Value> {
    exchange(ToolRegistry::with_builtins(), MalformedLinePolicy::Drop, lines)
}

#[test]
fn list_has_one_entry_per_distinct_name_in_order() {
    let mut registry = ToolRegistry::new();
    registry.register("shout", Arc::new(Shout), None);
    registry.register("quiet", Arc::new(Shout), Some("Whispers.".to_string()));
    registry.register("shout", Arc::new(Shout), Some("Shouts.".to_string()));

    let out = exchange(
        registry,
        MalformedLinePolicy::Drop,
        &[request(1, "tools/list", &json!({}))],
    );

    assert_eq!(
        out[0]["result"],
        json!({"tools": [
            {"name": "shout", "description": "Shouts."},
            {"name": "quiet", "description": "Whispers."},
        ]})
    );
}

#[test]
fn every_response_echoes_its_request_id() {
    let lines = vec![
        request(10, "tools/list", &json!({})),
        request(11, "tools/call", &json!({"name": "gaslight", "arguments": {"name": "Sam"}})),
        request(12, "tools/call", &json!({"name": "nope"})),
        request(13, "ping", &json!({})),
        request(14, "tools/call", &json!({"name": "gaslight", "arguments": {}})),
    ];

    let out = exchange_builtins(&lines);
    let ids: Vec<i64> = out.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![10, 11, 12, 13, 14]);
    assert!(out.iter().all(|r| r["jsonrpc"] == "2.0"));
}

#[test]
fn gaslight_message_contains_name() {
    let out = exchange_builtins(&[request(
        1,
        "tools/call",
        &json!({"name": "gaslight", "arguments": {"name": "Sam"}}),
    )]);

    assert_eq!(
        out[0]["result"]["message"],
        "You are not enough, you are not ready, how did you enter this company, \
         see how others perform better than you, Sam, I said this for your own good"
    );
}

#[test]
fn unknown_tool_and_method_are_in_band() {
    let out = exchange_builtins(&[
        request(1, "tools/call", &json!({"name": "doesnotexist", "arguments": {}})),
        request(2, "ping", &json!({})),
    ]);

    assert_eq!(out[0]["result"], json!({"error": "Unknown tool"}));
    assert_eq!(out[1]["result"], json!({"error": "Unknown method"}));
}

#[test]
fn missing_argument_does_not_stop_the_server() {
    let out = exchange_builtins(&[
        request(1, "tools/call", &json!({"name": "gaslight", "arguments": {}})),
        request(2, "tools/call", &json!({"name": "anti_gaslight", "arguments": {"name": "Kim"}})),
    ]);

    assert_eq!(out.len(), 2);
    let error = out[0]["result"]["error"].as_str().unwrap();
    assert!(error.starts_with("Tool execution failed: "));
    assert!(out[1]["result"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Kim, "));
}

#[test]
fn malformed_line_is_dropped() {
    let out = exchange_builtins(&[
        request(1, "tools/list", &json!({})),
        "this is not json".to_string(),
    ]);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["id"], 1);
}

#[test]
fn non_object_line_is_dropped_and_serving_continues() {
    let out = exchange_builtins(&[
        "[1, 2, 3]".to_string(),
        "42".to_string(),
        request(2, "tools/list", &json!({})),
    ]);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["id"], 2);
}

#[test]
fn malformed_line_gets_parse_error_when_configured() {
    let out = exchange(
        ToolRegistry::with_builtins(),
        MalformedLinePolicy::Respond,
        &[
            request(1, "tools/list", &json!({})),
            "this is not json".to_string(),
        ],
    );

    assert_eq!(out.len(), 2);
    assert_eq!(out[1]["error"]["code"], -32700);
    assert!(out[1]["id"].is_null());
    assert!(out[1]["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Parse error: "));
}

#[test]
fn custom_tool_receives_arguments() {
    let mut registry = ToolRegistry::new();
    registry.register("shout", Arc::new(Shout), None);

    let out = exchange(
        registry,
        MalformedLinePolicy::Drop,
        &[request(1, "tools/call", &json!({"name": "shout", "arguments": {"text": "hey"}}))],
    );

    assert_eq!(out[0]["result"], json!({"message": "HEY"}));
}

#[test]
fn invalid_utf8_line_is_dropped_and_serving_continues() {
    let dispatcher = Dispatcher::new(ToolRegistry::with_builtins());

    let mut input = request(1, "tools/list", &json!({})).into_bytes();
    input.extend_from_slice(b"\n\xff\xfe garbage\n");
    input.extend_from_slice(request(2, "tools/list", &json!({})).as_bytes());
    input.push(b'\n');

    let mut out = Vec::new();
    let stats = serve(&dispatcher, ServerConfig::default(), input.as_slice(), &mut out).unwrap();

    let ids: Vec<i64> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(stats.malformed, 1);
}

#[test]
fn invalid_utf8_line_gets_parse_error_when_configured() {
    let dispatcher = Dispatcher::new(ToolRegistry::with_builtins());
    let config = ServerConfig {
        on_parse_error: MalformedLinePolicy::Respond,
    };

    let mut out = Vec::new();
    serve(&dispatcher, config, &b"\xc3\x28\n"[..], &mut out).unwrap();

    let resp: Value = serde_json::from_str(String::from_utf8(out).unwrap().trim()).unwrap();
    assert_eq!(resp["error"]["code"], -32700);
    assert!(resp["error"]["message"]
        .as_str()
        .unwrap()
        .contains("not valid UTF-8"));
}
