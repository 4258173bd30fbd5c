/// JSON-RPC server loop
///
/// Reads one JSON-RPC request per line from stdin, dispatches it to the
/// matching operation handler, and writes one response per line to stdout.
/// Logs go to stderr so they never interleave with the protocol stream.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::ops;
use crate::rpc::protocol::*;
use crate::{ServerError, StreakServer};

/// RPC server wrapping the engine
pub struct RpcServer {
    server: StreakServer,
}

impl RpcServer {
    /// Create a new RPC server over an initialized engine
    pub fn new(server: StreakServer) -> Self {
        Self { server }
    }

    /// Run the server until stdin closes
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("RPC server started, waiting for requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("RPC server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        Some(self.handle_request(request))
    }

    /// Dispatch a request to its operation handler
    fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let params = request.params.unwrap_or(Value::Null);
        let store = self.server.store();

        match request.method.as_str() {
            "habits/register" => {
                Self::respond(id, params, |p| ops::register_habit(store, p))
            }
            "streaks/compute" => Self::respond(id, params, |p| ops::get_streaks(store, p)),
            "performance/compute" => {
                Self::respond(id, params, |p| ops::get_performance(store, p))
            }
            "bulk/complete" => Self::respond(id, params, |p| ops::bulk_complete(store, p)),
            "bulk/uncomplete" => Self::respond(id, params, |p| ops::bulk_uncomplete(store, p)),
            other => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", other),
            ),
        }
    }

    /// Decode params, run the handler, and encode the outcome
    fn respond<P, R>(
        id: Value,
        params: Value,
        handler: impl FnOnce(P) -> Result<R, crate::engine::EngineError>,
    ) -> JsonRpcResponse
    where
        P: serde::de::DeserializeOwned,
        R: serde::Serialize,
    {
        let parsed: P = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                );
            }
        };

        match handler(parsed) {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(
                    id,
                    error_codes::INTERNAL_ERROR,
                    format!("Failed to encode result: {}", e),
                ),
            },
            Err(e) => JsonRpcResponse::engine_error(id, &e),
        }
    }
}
