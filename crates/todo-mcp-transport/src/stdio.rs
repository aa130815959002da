//! Standard I/O transport.
//!
//! # Wire Format
//!
//! Messages are newline-delimited JSON:
//! - Each frame is a single line of JSON
//! - Lines are terminated by `\n` (LF, not CRLF)
//! - Empty lines are ignored
//! - UTF-8 encoding is required

use std::io::{BufRead, BufReader, Read, Write};

use log::trace;
use serde_json::Value;
use todo_mcp_protocol::Response;

const TARGET: &str = "todomcp::transport";

/// Transport error types.
#[derive(Debug)]
pub enum TransportError {
    /// The input stream reached end-of-file.
    Closed,
    /// I/O failure on the underlying stream.
    Io(std::io::Error),
    /// A non-empty line was not valid JSON.
    Json(serde_json::Error),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Closed => write!(f, "transport closed"),
            TransportError::Io(e) => write!(f, "I/O error: {e}"),
            TransportError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Closed => None,
            TransportError::Io(e) => Some(e),
            TransportError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err)
    }
}

/// Stdio transport implementation.
///
/// Reads request frames from the reader and writes response frames to the
/// writer. Generic over `Read`/`Write` so tests can drive it with
/// in-memory buffers.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
    line_buffer: String,
}

impl<R: Read, W: Write> StdioTransport<R, W> {
    /// Creates a new transport with custom reader/writer.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            line_buffer: String::with_capacity(4096),
        }
    }

    /// Receives the next frame as raw JSON.
    ///
    /// Skips empty lines. Returns [`TransportError::Closed`] at end of
    /// stream and [`TransportError::Json`] for a line that is not valid
    /// JSON — the caller decides whether that is fatal.
    pub fn recv(&mut self) -> Result<Value, TransportError> {
        loop {
            self.line_buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.line_buffer)?;
            if bytes_read == 0 {
                return Err(TransportError::Closed);
            }

            let line = self
                .line_buffer
                .trim_end_matches('\n')
                .trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            trace!(target: TARGET, "recv frame: {line}");
            return serde_json::from_str(line).map_err(TransportError::Json);
        }
    }

    /// Sends one response frame, newline-terminated, flushing immediately.
    pub fn send(&mut self, response: &Response) -> Result<(), TransportError> {
        let mut bytes = serde_json::to_vec(response).map_err(TransportError::Json)?;
        bytes.push(b'\n');
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl StdioTransport<std::io::Stdin, std::io::Stdout> {
    /// Creates a transport over the process's stdin/stdout.
    ///
    /// This is the primary constructor for servers running as a subprocess.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin(), std::io::stdout())
    }
}
