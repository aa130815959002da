//! Transport layer for todo-mcp.
//!
//! Newline-delimited JSON framing over any `Read`/`Write` pair. Production
//! servers run over the process's stdin/stdout via
//! [`StdioTransport::stdio`]; tests substitute in-memory buffers.

#![forbid(unsafe_code)]

mod stdio;

pub use stdio::{StdioTransport, TransportError};
