//! Unit tests for the registry and router.

use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::TempDir;
use todo_mcp_protocol::PROTOCOL_VERSION;
use todo_mcp_store::TodoStore;

use crate::registry::ToolRegistry;
use crate::router::Router;

fn scratch_router() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(TodoStore::open(dir.path().join("todos.db")).unwrap());
    let router = Router::new("todo-mcp", "1.0.0", ToolRegistry::with_store(store));
    (dir, router)
}

#[test]
fn initialize_returns_fixed_descriptor() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch("initialize", None));

    assert_eq!(body["protocolVersion"], PROTOCOL_VERSION);
    assert_eq!(body["capabilities"]["tools"], json!({}));
    assert_eq!(body["serverInfo"]["name"], "todo-mcp");
    assert_eq!(body["serverInfo"]["version"], "1.0.0");
}

#[test]
fn tools_list_follows_declaration_order() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch("tools/list", None));

    let names: Vec<_> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["list_todos", "add_todo", "update_todo", "delete_todo"]);
}

#[test]
fn tools_list_declares_required_arguments() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch("tools/list", None));
    let tools = body["tools"].as_array().unwrap();

    let add = &tools[1];
    assert_eq!(add["inputSchema"]["type"], "object");
    assert_eq!(add["inputSchema"]["required"], json!(["content"]));
    assert_eq!(
        add["inputSchema"]["properties"]["content"]["type"],
        "string"
    );

    let update = &tools[2];
    assert_eq!(update["inputSchema"]["required"], json!(["id"]));
    assert_eq!(update["inputSchema"]["properties"]["done"]["type"], "boolean");
}

#[test]
fn unknown_method_is_a_semantic_error() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch("resources/list", None));
    assert_eq!(body["error"], "Unknown method: resources/list");
}

#[test]
fn unknown_tool_is_a_semantic_error() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "frobnicate", "arguments": {}})),
    ));
    assert_eq!(body["error"], "Tool not found: frobnicate");
}

#[test]
fn missing_required_argument_is_reported() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "add_todo", "arguments": {}})),
    ));

    let message = body["error"].as_str().unwrap();
    assert!(message.contains("content"), "unexpected message: {message}");
}

#[test]
fn ill_typed_argument_is_reported() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "update_todo", "arguments": {"id": "not-a-number"}})),
    ));
    assert!(body["error"].as_str().unwrap().starts_with("invalid arguments"));
}

#[test]
fn extra_arguments_are_ignored() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({
            "name": "add_todo",
            "arguments": {"content": "water plants", "priority": "high"}
        })),
    ));

    assert_eq!(body["success"], true);
    assert!(body["id"].is_i64());
}

#[test]
fn call_without_arguments_field_uses_empty_map() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch("tools/call", Some(json!({"name": "list_todos"}))));
    assert_eq!(body["todos"], json!([]));
}

#[test]
fn update_with_no_fields_reports_nothing_to_do() {
    let (_dir, router) = scratch_router();
    let added = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "add_todo", "arguments": {"content": "stretch"}})),
    ));
    let id = added["id"].as_i64().unwrap();

    let body = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "update_todo", "arguments": {"id": id}})),
    ));
    assert_eq!(body["success"], false);
}

#[test]
fn empty_content_surfaces_as_handler_error() {
    let (_dir, router) = scratch_router();
    let body = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "add_todo", "arguments": {"content": ""}})),
    ));
    assert_eq!(body["error"], "todo content must not be empty");
}

#[test]
fn crud_flow_through_the_router() {
    let (_dir, router) = scratch_router();

    let added = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "add_todo", "arguments": {"content": "write tests"}})),
    ));
    let id = added["id"].as_i64().unwrap();
    assert_eq!(added["success"], true);

    let done = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "update_todo", "arguments": {"id": id, "done": true}})),
    ));
    assert_eq!(done["success"], true);

    let listed = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "list_todos"})),
    ));
    let todos = listed["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["content"], "write tests");
    assert_eq!(todos[0]["done"], true);

    let deleted = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "delete_todo", "arguments": {"id": id}})),
    ));
    assert_eq!(deleted["success"], true);

    let empty = Value::Object(router.dispatch(
        "tools/call",
        Some(json!({"name": "list_todos"})),
    ));
    assert_eq!(empty["todos"], json!([]));
}
