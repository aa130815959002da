//! Todo table operations.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use log::debug;
use rusqlite::{Connection, ToSql, params};
use serde::Serialize;

use crate::error::{Result, StoreError};

const TARGET: &str = "todomcp::store";

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    /// Row ID, assigned by the store on creation, never reused.
    pub id: i64,
    /// Task description.
    pub content: String,
    /// Completion flag.
    pub done: bool,
    /// Creation time (RFC 3339 UTC), immutable after creation.
    pub created_at: String,
    /// Last mutation time (RFC 3339 UTC).
    pub updated_at: String,
}

/// SQLite-backed todo store.
///
/// Holds only the database path; see the crate docs for the per-call
/// connection and transaction discipline.
#[derive(Debug, Clone)]
pub struct TodoStore {
    db_path: PathBuf,
}

impl TodoStore {
    /// Opens the store, creating parent directories and the todo table if
    /// they do not exist yet.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self { db_path };
        let conn = store.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                done INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        debug!(target: TARGET, "opened todo store at {}", store.db_path.display());
        Ok(store)
    }

    /// Path of the backing database file.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Returns every todo: not-done entries first, oldest first within each
    /// group. Ties on `created_at` resolve by ID, which follows creation
    /// order.
    pub fn list_all(&self) -> Result<Vec<Todo>> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let todos = {
            let mut stmt = tx.prepare(
                "SELECT id, content, done, created_at, updated_at FROM todos
                 ORDER BY done ASC, created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Todo {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    done: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };
        tx.commit()?;
        Ok(todos)
    }

    /// Inserts a new, not-done todo and returns its assigned ID.
    ///
    /// Both timestamps start equal; `created_at` never changes afterwards.
    pub fn add(&self, content: &str) -> Result<i64> {
        if content.is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let now = timestamp();
        tx.execute(
            "INSERT INTO todos (content, done, created_at, updated_at) VALUES (?1, 0, ?2, ?2)",
            params![content, now],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        debug!(target: TARGET, "added todo {id}");
        Ok(id)
    }

    /// Updates the supplied fields of a todo and refreshes `updated_at`.
    ///
    /// With neither field supplied this performs no write and returns
    /// `Ok(false)` — "nothing to do", not an error. A nonexistent ID also
    /// yields `Ok(false)`.
    pub fn update(&self, id: i64, content: Option<&str>, done: Option<bool>) -> Result<bool> {
        let now = timestamp();
        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(content) = content.as_ref() {
            assignments.push("content = ?");
            values.push(content);
        }
        if let Some(done) = done.as_ref() {
            assignments.push("done = ?");
            values.push(done);
        }
        if assignments.is_empty() {
            return Ok(false);
        }
        assignments.push("updated_at = ?");
        values.push(&now);
        values.push(&id);

        let sql = format!("UPDATE todos SET {} WHERE id = ?", assignments.join(", "));
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(&sql, &values[..])?;
        tx.commit()?;
        debug!(target: TARGET, "updated todo {id}: {changed} row(s)");
        Ok(changed > 0)
    }

    /// Deletes a todo, returning whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        tx.commit()?;
        debug!(target: TARGET, "deleted todo {id}: {removed} row(s)");
        Ok(removed > 0)
    }
}

/// Current time as a fixed-width RFC 3339 UTC string.
///
/// Fixed width keeps lexicographic order chronological, which the
/// `ORDER BY created_at` in [`TodoStore::list_all`] relies on; microsecond
/// precision makes consecutive mutations distinguishable.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
