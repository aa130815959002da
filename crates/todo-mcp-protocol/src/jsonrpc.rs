//! JSON-RPC 2.0 frame types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC error code for internal server failures.
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request ID.
///
/// `Null` is a real variant rather than an absence: a request carrying a
/// literal `"id": null` must get that null echoed back verbatim, which an
/// `Option` alone cannot express.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer ID.
    Number(i64),
    /// String ID.
    String(String),
    /// Literal `null` ID.
    Null,
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Number(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::String(id.to_owned())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::String(s) => write!(f, "{s}"),
            RequestId::Null => write!(f, "null"),
        }
    }
}

impl RequestId {
    fn to_json(&self) -> Value {
        match self {
            RequestId::Number(n) => Value::from(*n),
            RequestId::String(s) => Value::from(s.clone()),
            RequestId::Null => Value::Null,
        }
    }
}

/// JSON-RPC request frame.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Protocol version field; present on well-formed frames but not
    /// validated by the server.
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Method name.
    pub method: String,
    /// Request parameters.
    #[serde(default)]
    pub params: Option<Value>,
    /// Request ID. `None` when the field was absent,
    /// `Some(RequestId::Null)` when it was a literal null.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<RequestId>,
}

/// Keeps "field absent" distinct from "field is null": the field default
/// covers absence, so any value that reaches this function — null included —
/// becomes `Some`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<RequestId>, D::Error>
where
    D: Deserializer<'de>,
{
    RequestId::deserialize(deserializer).map(Some)
}

/// JSON-RPC error object, carried under the `error` key of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code.
    pub code: i32,
    /// Error message.
    pub message: String,
    /// Additional error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Creates a `-32603 Internal error` with the failure detail as data.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: "Internal error".to_owned(),
            data: Some(Value::String(detail.into())),
        }
    }
}

/// JSON-RPC response frame.
///
/// The result object's fields sit at the top level of the frame, beside
/// `jsonrpc` and `id`: a `tools/list` response reads
/// `{"jsonrpc":"2.0","id":1,"tools":[...]}` on the wire. When the request
/// carried an `id`, that id is written into the merged object last and so
/// wins over any same-named field in the body — matching the service's
/// established wire behavior.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Response {
    frame: Map<String, Value>,
}

impl Response {
    /// Merges a result body into an envelope for the given request ID.
    ///
    /// With `id` of `None` (the request had no `id` field) the body is left
    /// untouched apart from the `jsonrpc` marker.
    #[must_use]
    pub fn result(id: Option<RequestId>, body: Map<String, Value>) -> Self {
        let mut frame = body;
        frame.insert("jsonrpc".to_owned(), Value::from("2.0"));
        if let Some(id) = id {
            frame.insert("id".to_owned(), id.to_json());
        }
        Self { frame }
    }

    /// Creates an error response.
    #[must_use]
    pub fn error(id: Option<RequestId>, error: RpcError) -> Self {
        let mut body = Map::new();
        body.insert(
            "error".to_owned(),
            serde_json::to_value(&error).unwrap_or_default(),
        );
        Self::result(id, body)
    }

    /// Returns true if this is an error response.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.frame.contains_key("error")
    }

    /// The merged frame contents.
    #[must_use]
    pub fn frame(&self) -> &Map<String, Value> {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_with_number_id() {
        let req: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"tools/list","id":7}"#).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.id, Some(RequestId::Number(7)));
    }

    #[test]
    fn request_without_id_field() {
        let req: Request = serde_json::from_str(r#"{"method":"initialize"}"#).unwrap();
        assert_eq!(req.id, None);
    }

    #[test]
    fn request_with_null_id_is_not_absent() {
        let req: Request = serde_json::from_str(r#"{"method":"initialize","id":null}"#).unwrap();
        assert_eq!(req.id, Some(RequestId::Null));
    }

    #[test]
    fn request_with_string_id() {
        let req: Request = serde_json::from_str(r#"{"method":"x","id":"req-9"}"#).unwrap();
        assert_eq!(req.id, Some(RequestId::String("req-9".to_owned())));
    }

    #[test]
    fn response_merges_body_into_the_frame() {
        let mut body = Map::new();
        body.insert("success".to_owned(), Value::Bool(true));
        let json = serde_json::to_string(&Response::result(Some(1i64.into()), body)).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("\"result\""));
    }

    #[test]
    fn request_id_wins_over_a_body_id_field() {
        let mut body = Map::new();
        body.insert("id".to_owned(), Value::from(99));
        body.insert("success".to_owned(), Value::Bool(true));

        let response = Response::result(Some(1i64.into()), body);
        assert_eq!(response.frame()["id"], Value::from(1));

        let parsed: Value =
            serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
        assert_eq!(parsed["id"], 1);
    }

    #[test]
    fn body_id_survives_when_the_request_had_none() {
        let mut body = Map::new();
        body.insert("id".to_owned(), Value::from(99));

        let response = Response::result(None, body);
        assert_eq!(response.frame()["id"], Value::from(99));
    }

    #[test]
    fn response_echoes_null_id() {
        let json =
            serde_json::to_string(&Response::result(Some(RequestId::Null), Map::new())).unwrap();
        assert!(json.contains("\"id\":null"));
    }

    #[test]
    fn response_omits_absent_id() {
        let json = serde_json::to_string(&Response::result(None, Map::new())).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn internal_error_shape() {
        let resp = Response::error(Some("req-1".into()), RpcError::internal("boom"));
        assert!(resp.is_error());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"code\":-32603"));
        assert!(json.contains("\"message\":\"Internal error\""));
        assert!(json.contains("\"data\":\"boom\""));
    }
}
