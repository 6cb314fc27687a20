//! Stdio transport: one JSON-RPC message per line in, one reply per line out.

use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};
use crate::tools::{ToolError, ToolHandler};

/// Routes requests to the tool handler.
pub struct McpServer {
    tools: ToolHandler,
}

impl McpServer {
    /// A server exposing `tools`.
    pub fn new(tools: ToolHandler) -> Self {
        Self { tools }
    }

    /// Serve stdin until EOF or a write failure.
    pub async fn run(&self) -> std::io::Result<()> {
        info!("tarot-mcp listening on stdin");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("stdin closed");
                    break;
                }
                Ok(_) => {
                    let Some(response) = self.handle_line(&line) else {
                        continue;
                    };
                    let encoded = serde_json::to_string(&response).or_else(|e| {
                        error!(error = %e, "failed to encode response");
                        serde_json::to_string(&JsonRpcResponse::error(
                            response.id.clone(),
                            JsonRpcError::internal_error(format!("Serialization error: {e}")),
                        ))
                    });
                    let Ok(encoded) = encoded else {
                        continue;
                    };
                    debug!(response = %encoded, "sending response");
                    stdout.write_all(encoded.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
                Err(e) => {
                    error!(error = %e, "failed to read stdin");
                    return Err(e);
                }
            }
        }

        info!("tarot-mcp shutting down");
        Ok(())
    }

    /// Answer one line. Blank lines and notifications get no reply.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        debug!(request = line, "received request");

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Invalid JSON: {e}")),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }

        Some(self.dispatch(request))
    }

    fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                request.id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "serverInfo": {
                        "name": "tarot-mcp",
                        "version": env!("CARGO_PKG_VERSION")
                    },
                    "capabilities": {
                        "tools": {}
                    }
                }),
            ),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => {
                JsonRpcResponse::success(request.id, json!({ "tools": self.tools.list_tools() }))
            }
            "tools/call" => self.call_tool(request),
            other => JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(other)),
        }
    }

    fn call_tool(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = request.params.as_object() else {
            return JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_params("params must be an object"),
            );
        };
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_params("missing 'name' field"),
            );
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        let (text, is_error) = match self.tools.execute(name, arguments) {
            Ok(text) => (text, false),
            Err(ToolError::UnknownTool(name)) => {
                return JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params(format!("Unknown tool: {name}")),
                );
            }
            Err(e) => {
                warn!(tool = name, error = %e, "tool failed");
                (e.to_string(), true)
            }
        };

        JsonRpcResponse::success(
            request.id,
            json!({
                "content": [{ "type": "text", "text": text }],
                "isError": is_error
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tarot_core::random::SecureRandom;
    use tarot_core::{Deck, TarotConfig, TarotService};

    fn server() -> McpServer {
        let service = TarotService::with_parts(
            TarotConfig::default(),
            Deck::builtin().unwrap(),
            SecureRandom::seeded(9),
        );
        McpServer::new(ToolHandler::new(Arc::new(service)))
    }

    fn reply(server: &McpServer, line: &str) -> Value {
        serde_json::to_value(server.handle_line(line).unwrap()).unwrap()
    }

    #[test]
    fn initialize_announces_tools() {
        let v = reply(
            &server(),
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        );
        assert_eq!(v["id"], 1);
        assert_eq!(v["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(v["result"]["serverInfo"]["name"], "tarot-mcp");
        assert!(v["result"]["capabilities"]["tools"].is_object());
    }

    #[test]
    fn notifications_and_blank_lines_are_silent() {
        let server = server();
        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .is_none());
        assert!(server.handle_line("   \n").is_none());
    }

    #[test]
    fn ping_answers_empty_object() {
        let v = reply(&server(), r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#);
        assert_eq!(v["id"], "p");
        assert_eq!(v["result"], json!({}));
    }

    #[test]
    fn protocol_errors() {
        let server = server();

        let v = reply(&server, "{not json");
        assert_eq!(v["error"]["code"], -32700);
        assert!(v["id"].is_null());

        let v = reply(&server, r#"{"jsonrpc":"1.0","id":2,"method":"ping"}"#);
        assert_eq!(v["error"]["code"], -32600);

        let v = reply(&server, r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#);
        assert_eq!(v["error"]["code"], -32601);

        let v = reply(&server, r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":[]}"#);
        assert_eq!(v["error"]["code"], -32602);

        let v = reply(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"nope"}}"#,
        );
        assert_eq!(v["error"]["code"], -32602);
        assert_eq!(v["error"]["message"], "Unknown tool: nope");
    }

    #[test]
    fn tools_list_has_schemas() {
        let v = reply(&server(), r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#);
        let tools = v["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 13);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[test]
    fn tool_call_returns_text_content() {
        let v = reply(
            &server(),
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"perform_reading","arguments":{"spreadType":"celtic_cross","question":"Where am I headed?"}}}"#,
        );
        assert_eq!(v["result"]["isError"], false);
        assert_eq!(v["result"]["content"][0]["type"], "text");
        let text = v["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Where am I headed?"));
        assert!(text.contains("Celtic Cross"));
    }

    #[test]
    fn bad_arguments_flag_is_error() {
        let v = reply(
            &server(),
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"get_card_info","arguments":{"cardName":"The Fool","orientation":"sideways"}}}"#,
        );
        assert_eq!(v["result"]["isError"], true);
        assert_eq!(
            v["result"]["content"][0]["text"],
            "Invalid arguments: unrecognized orientation: \"sideways\""
        );
    }

    #[test]
    fn missing_arguments_default_to_empty_object() {
        let v = reply(
            &server(),
            r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"list_available_spreads"}}"#,
        );
        assert_eq!(v["result"]["isError"], false);
    }
}
