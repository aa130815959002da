//! Log targets for todo-mcp components.
//!
//! All crates log through the standard [`log`] facade; the binary picks the
//! backend. The backend must write to stderr — stdout carries protocol
//! frames and nothing else.
//!
//! Example filter: `RUST_LOG=todomcp::router=debug,todomcp::store=trace`

/// Log targets used by todo-mcp components.
///
/// Use these constants with the `target:` argument to log macros for
/// consistent filtering.
pub mod targets {
    /// Root target for all todo-mcp logs.
    pub const TODOMCP: &str = "todomcp";

    /// Serve loop lifecycle and frame handling.
    pub const SERVER: &str = "todomcp::server";

    /// Method routing and tool dispatch.
    pub const ROUTER: &str = "todomcp::router";

    /// Transport events as seen by the serve loop.
    pub const TRANSPORT: &str = "todomcp::transport";
}
