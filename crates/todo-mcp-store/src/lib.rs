//! SQLite persistence for todo items.
//!
//! [`TodoStore`] owns the on-disk representation of the todo table; all
//! mutation happens through its operations. Every operation opens its own
//! connection and runs inside a single transaction, so no connection or
//! lock survives a call and no operation can observe a partially-applied
//! effect of another.

#![forbid(unsafe_code)]

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{Todo, TodoStore};
