//! Transport-neutral request and response types
//!
//! The HTTP adapter converts to and from these so routing can be exercised
//! without a socket.

use std::collections::HashMap;

use serde_json::Value;

/// Request method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Other(String),
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
            Self::Other(m) => write!(f, "{}", m),
        }
    }
}

/// An incoming API request
///
/// `query` holds already-decoded query parameters. `body` is the raw request
/// body; an empty body is treated as an empty JSON object.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Vec<u8>,
    pub host: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_json(mut self, body: &Value) -> Self {
        self.body = body.to_string().into_bytes();
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        self.code() < 300
    }
}

/// An outgoing API response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: Status,
    pub location: Option<String>,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn json(status: Status, body: Value) -> Self {
        Self {
            status,
            location: None,
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            location: None,
            body: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The `message` field of an error body, if any
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_from_str() {
        assert_eq!(Method::from("get"), Method::Get);
        assert_eq!(Method::from("DELETE"), Method::Delete);
        assert_eq!(Method::from("patch"), Method::Other("PATCH".to_string()));
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Created.code(), 201);
        assert_eq!(Status::NoContent.code(), 204);
        assert!(Status::NoContent.is_success());
        assert!(!Status::NotFound.is_success());
    }

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::post("/api/notes")
            .with_json(&json!({"title": "t"}))
            .with_host("localhost:8080")
            .with_query("searchTerm", "cats");
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.host.as_deref(), Some("localhost:8080"));
        assert_eq!(req.query.get("searchTerm").map(String::as_str), Some("cats"));
        let body: Value = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(body, json!({"title": "t"}));
    }

    #[test]
    fn test_response_message() {
        let resp = ApiResponse::json(Status::NotFound, json!({"message": "Not Found"}));
        assert_eq!(resp.message(), Some("Not Found"));
        assert_eq!(ApiResponse::no_content().message(), None);
    }
}
