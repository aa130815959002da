//! Request router.
//!
//! Interprets the `method` of a decoded request and produces the response
//! body. Stateless between calls: every request is handled independently
//! with no session memory.

use log::debug;
use serde_json::{Map, Value, json};
use todo_mcp_protocol::{
    CallToolParams, InitializeResult, ListToolsResult, PROTOCOL_VERSION, ServerCapabilities,
    ServerInfo, ToolsCapability,
};

use crate::logging::targets;
use crate::registry::ToolRegistry;

/// Routes decoded requests to the registry and shapes result bodies.
pub struct Router {
    info: ServerInfo,
    registry: ToolRegistry,
}

impl Router {
    /// Creates a router advertising the given server identity.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        registry: ToolRegistry,
    ) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            registry,
        }
    }

    /// Dispatches one request, returning the response body.
    ///
    /// Semantic failures — unknown method, unknown tool, handler errors —
    /// are reported as an `{"error": <message>}` body; the call itself
    /// still succeeds at the protocol level.
    #[must_use]
    pub fn dispatch(&self, method: &str, params: Option<Value>) -> Map<String, Value> {
        debug!(target: targets::ROUTER, "dispatching '{method}'");
        match method {
            "initialize" => self.initialize(),
            "tools/list" => self.tools_list(),
            "tools/call" => self.tools_call(params),
            other => error_body(format!("Unknown method: {other}")),
        }
    }

    fn initialize(&self) -> Map<String, Value> {
        to_body(&InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            server_info: self.info.clone(),
        })
    }

    fn tools_list(&self) -> Map<String, Value> {
        to_body(&ListToolsResult {
            tools: self.registry.definitions(),
        })
    }

    fn tools_call(&self, params: Option<Value>) -> Map<String, Value> {
        let params: CallToolParams =
            match serde_json::from_value(params.unwrap_or_else(|| json!({}))) {
                Ok(params) => params,
                Err(e) => return error_body(format!("invalid tools/call params: {e}")),
            };

        let Some(handler) = self.registry.get(&params.name) else {
            debug!(target: targets::ROUTER, "tool not found: {}", params.name);
            return error_body(format!("Tool not found: {}", params.name));
        };

        match handler.call(&params.arguments) {
            Ok(Value::Object(body)) => body,
            Ok(other) => error_body(format!(
                "tool '{}' returned a non-object result: {other}",
                params.name
            )),
            Err(e) => {
                debug!(target: targets::ROUTER, "tool '{}' failed: {e}", params.name);
                error_body(e.to_string())
            }
        }
    }
}

/// Serializes a typed result into a response body.
fn to_body<T: serde::Serialize>(result: &T) -> Map<String, Value> {
    match serde_json::to_value(result) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Shapes a semantic failure as a result body.
fn error_body(message: impl Into<String>) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("error".to_owned(), Value::String(message.into()));
    body
}
