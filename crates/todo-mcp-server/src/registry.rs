//! Tool registry and handlers.
//!
//! The registry is built once at startup from an owned store handle and is
//! immutable afterwards. Tools are kept in declaration order so `tools/list`
//! output is deterministic.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use todo_mcp_protocol::Tool;
use todo_mcp_store::{StoreError, TodoStore};

/// Error returned by a tool handler.
///
/// Handlers never raise transport-level errors; the router renders this
/// into the `{"error": <message>}` result body.
#[derive(Debug)]
pub enum ToolError {
    /// Arguments failed typed validation (missing or ill-typed field).
    InvalidArguments(String),
    /// The persistence store failed.
    Store(StoreError),
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::InvalidArguments(message) => write!(f, "invalid arguments: {message}"),
            ToolError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::InvalidArguments(_) => None,
            ToolError::Store(e) => Some(e),
        }
    }
}

impl From<StoreError> for ToolError {
    fn from(err: StoreError) -> Self {
        ToolError::Store(err)
    }
}

/// Handler for a single tool.
pub trait ToolHandler: Send + Sync {
    /// Returns the tool definition for discovery.
    fn definition(&self) -> Tool;

    /// Invokes the tool with the request's argument object.
    fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError>;
}

/// Decodes an argument object into a typed argument struct.
///
/// Unknown extra fields are ignored; a missing or ill-typed field yields
/// [`ToolError::InvalidArguments`] carrying the serde message.
fn parse_args<T: DeserializeOwned>(arguments: &Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// `list_todos` — lists every stored todo.
struct ListTodos {
    store: Arc<TodoStore>,
}

impl ToolHandler for ListTodos {
    fn definition(&self) -> Tool {
        Tool {
            name: "list_todos".to_owned(),
            description: "List all todo items".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    fn call(&self, _arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        let todos = self.store.list_all()?;
        Ok(json!({ "todos": todos }))
    }
}

#[derive(Debug, Deserialize)]
struct AddTodoArgs {
    content: String,
}

/// `add_todo` — inserts a new todo.
struct AddTodo {
    store: Arc<TodoStore>,
}

impl ToolHandler for AddTodo {
    fn definition(&self) -> Tool {
        Tool {
            name: "add_todo".to_owned(),
            description: "Add a new todo item".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "The todo item content"
                    }
                },
                "required": ["content"]
            }),
        }
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        let args: AddTodoArgs = parse_args(arguments)?;
        let id = self.store.add(&args.content)?;
        Ok(json!({ "id": id, "success": true }))
    }
}

#[derive(Debug, Deserialize)]
struct UpdateTodoArgs {
    id: i64,
    content: Option<String>,
    done: Option<bool>,
}

/// `update_todo` — partial update of content and/or done flag.
struct UpdateTodo {
    store: Arc<TodoStore>,
}

impl ToolHandler for UpdateTodo {
    fn definition(&self) -> Tool {
        Tool {
            name: "update_todo".to_owned(),
            description: "Update a todo item".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "integer",
                        "description": "The todo item ID"
                    },
                    "content": {
                        "type": "string",
                        "description": "New content (optional)"
                    },
                    "done": {
                        "type": "boolean",
                        "description": "Mark as done/undone (optional)"
                    }
                },
                "required": ["id"]
            }),
        }
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        let args: UpdateTodoArgs = parse_args(arguments)?;
        let success = self
            .store
            .update(args.id, args.content.as_deref(), args.done)?;
        Ok(json!({ "success": success }))
    }
}

#[derive(Debug, Deserialize)]
struct DeleteTodoArgs {
    id: i64,
}

/// `delete_todo` — removes a todo.
struct DeleteTodo {
    store: Arc<TodoStore>,
}

impl ToolHandler for DeleteTodo {
    fn definition(&self) -> Tool {
        Tool {
            name: "delete_todo".to_owned(),
            description: "Delete a todo item".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "integer",
                        "description": "The todo item ID to delete"
                    }
                },
                "required": ["id"]
            }),
        }
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        let args: DeleteTodoArgs = parse_args(arguments)?;
        let success = self.store.delete(args.id)?;
        Ok(json!({ "success": success }))
    }
}

struct RegistryEntry {
    name: String,
    handler: Box<dyn ToolHandler>,
}

/// The fixed tool set, in declaration order.
pub struct ToolRegistry {
    tools: Vec<RegistryEntry>,
}

impl ToolRegistry {
    /// Builds the registry over a shared store handle.
    #[must_use]
    pub fn with_store(store: Arc<TodoStore>) -> Self {
        let mut registry = Self { tools: Vec::new() };
        registry.add_tool(ListTodos {
            store: Arc::clone(&store),
        });
        registry.add_tool(AddTodo {
            store: Arc::clone(&store),
        });
        registry.add_tool(UpdateTodo {
            store: Arc::clone(&store),
        });
        registry.add_tool(DeleteTodo { store });
        registry
    }

    fn add_tool<H: ToolHandler + 'static>(&mut self, handler: H) {
        let name = handler.definition().name;
        self.tools.push(RegistryEntry {
            name,
            handler: Box::new(handler),
        });
    }

    /// Tool definitions in declaration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|entry| entry.handler.definition())
            .collect()
    }

    /// Looks up a tool handler by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.tools
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.handler.as_ref())
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
