//! MCP server implementation for todo-mcp.
//!
//! This crate provides the server side of the protocol:
//! - Tool registration with typed argument structs ([`ToolRegistry`])
//! - Request routing and result shaping ([`Router`])
//! - The serve loop over the stdio transport ([`Server`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use todo_mcp_server::{Server, ToolRegistry};
//! use todo_mcp_store::TodoStore;
//! use todo_mcp_transport::StdioTransport;
//!
//! let store = Arc::new(TodoStore::open("todos.db")?);
//! let server = Server::new("todo-mcp", "1.0.0", ToolRegistry::with_store(store));
//! server.run(&mut StdioTransport::stdio())?;
//! ```

#![forbid(unsafe_code)]

pub mod logging;
mod registry;
mod router;

#[cfg(test)]
mod tests;

pub use registry::{ToolError, ToolHandler, ToolRegistry};
pub use router::Router;

use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info};
use serde_json::Value;
use todo_mcp_protocol::{Request, RequestId, Response, RpcError};
use todo_mcp_transport::{StdioTransport, TransportError};

use crate::logging::targets;

/// The serve loop: reads frames, dispatches them, writes responses.
///
/// Single-threaded and synchronous — one request is fully read, dispatched
/// and answered before the next line is read.
pub struct Server {
    router: Router,
}

impl Server {
    /// Creates a server with the given identity and tool registry.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        registry: ToolRegistry,
    ) -> Self {
        Self {
            router: Router::new(name, version, registry),
        }
    }

    /// Runs the request loop until the input stream closes.
    ///
    /// Malformed JSON lines are dropped without a response; every
    /// successfully parsed frame is answered with exactly one response
    /// line. Only an I/O failure is fatal.
    pub fn run<R: Read, W: Write>(
        &self,
        transport: &mut StdioTransport<R, W>,
    ) -> Result<(), TransportError> {
        info!(target: targets::SERVER, "todo-mcp server started");
        loop {
            let frame = match transport.recv() {
                Ok(frame) => frame,
                Err(TransportError::Closed) => {
                    info!(target: targets::SERVER, "input closed, shutting down");
                    return Ok(());
                }
                Err(TransportError::Json(e)) => {
                    debug!(target: targets::TRANSPORT, "dropping malformed frame: {e}");
                    continue;
                }
                Err(e) => {
                    error!(target: targets::TRANSPORT, "transport error: {e}");
                    return Err(e);
                }
            };

            let response = self.handle_frame(frame);
            transport.send(&response)?;
        }
    }

    /// Turns one parsed frame into a response.
    ///
    /// A frame that does not decode into a request shape, or a dispatch
    /// that panics, is answered with a `-32603` error envelope; a single
    /// bad request never tears down the loop.
    fn handle_frame(&self, frame: Value) -> Response {
        let frame_id = extract_id(&frame);
        let request: Request = match serde_json::from_value(frame) {
            Ok(request) => request,
            Err(e) => {
                debug!(target: targets::SERVER, "frame does not decode as a request: {e}");
                return Response::error(frame_id, RpcError::internal(e.to_string()));
            }
        };

        let Request {
            method, params, id, ..
        } = request;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.router.dispatch(&method, params)
        }));
        match outcome {
            Ok(body) => Response::result(id, body),
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                error!(target: targets::SERVER, "dispatch of '{method}' panicked: {detail}");
                Response::error(id, RpcError::internal(detail))
            }
        }
    }
}

/// Pulls a usable request ID out of a raw frame for error reporting.
fn extract_id(frame: &Value) -> Option<RequestId> {
    let id = frame.as_object()?.get("id")?;
    serde_json::from_value(id.clone()).ok()
}

/// Best-effort text from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "dispatch panicked".to_owned()
    }
}
