//! Protocol types for todo-mcp.
//!
//! This crate provides the wire-level building blocks:
//! - JSON-RPC request and response frames ([`Request`], [`Response`])
//! - The error object carried by transport-level failures ([`RpcError`])
//! - MCP payload types for `initialize`, `tools/list` and `tools/call`
//!
//! The wire format is newline-delimited JSON-RPC 2.0 with one twist
//! inherited from the service's original protocol: a response carries the
//! result object's fields at the top level of the frame, merged beside
//! `jsonrpc` and `id`, instead of nesting them under a `result` key.

#![forbid(unsafe_code)]

mod jsonrpc;
mod types;

pub use jsonrpc::{INTERNAL_ERROR, Request, RequestId, Response, RpcError};
pub use types::{
    CallToolParams, InitializeResult, ListToolsResult, PROTOCOL_VERSION, ServerCapabilities,
    ServerInfo, Tool, ToolsCapability,
};
