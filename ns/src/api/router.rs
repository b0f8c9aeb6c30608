//! Notes API routing
//!
//! Maps `/api/notes` requests onto [`NoteStore`] calls and store outcomes onto
//! responses:
//!
//! | request                   | success                       |
//! |---------------------------|-------------------------------|
//! | `GET /api/notes`          | 200, array (`?searchTerm=`)   |
//! | `GET /api/notes/:id`      | 200, note                     |
//! | `PUT /api/notes/:id`      | 200, updated note             |
//! | `POST /api/notes`         | 201, note + `Location`        |
//! | `DELETE /api/notes/:id`   | 204                           |
//!
//! Missing notes answer 404, validation failures 400, store faults 500.

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::domain::{NewNote, NoteId, NotePatch};
use crate::state::{NoteStore, Outcome};

use super::error::ApiError;
use super::request::{ApiRequest, ApiResponse, Method, Status};

/// Mount point of the notes resource
pub const NOTES_PATH: &str = "/api/notes";

/// Query parameter carrying the search term
pub const SEARCH_PARAM: &str = "searchTerm";

const UPDATABLE_FIELDS: [&str; 2] = ["title", "content"];

#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    Collection,
    Item(&'a str),
}

fn match_route(path: &str) -> Option<Route<'_>> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some("api"), Some("notes"), None, None) => Some(Route::Collection),
        (Some("api"), Some("notes"), Some(id), None) => Some(Route::Item(id)),
        _ => None,
    }
}

/// Routing layer in front of a [`NoteStore`]
#[derive(Debug, Clone)]
pub struct NotesApi {
    store: NoteStore,
    public_host: String,
}

impl NotesApi {
    /// `public_host` is used for `Location` headers when the request has no host
    pub fn new(store: NoteStore, public_host: impl Into<String>) -> Self {
        Self {
            store,
            public_host: public_host.into(),
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Handle one request; every error is turned into a response here
    pub async fn handle(&self, req: ApiRequest) -> ApiResponse {
        match self.dispatch(&req).await {
            Ok(resp) => resp,
            Err(e) => {
                match &e {
                    ApiError::Store(source) => error!(method = %req.method, path = %req.path, error = %source, "Store fault"),
                    other => debug!(method = %req.method, path = %req.path, error = %other, "Request rejected"),
                }
                e.into_response()
            }
        }
    }

    async fn dispatch(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let route = match_route(&req.path).ok_or(ApiError::NotFound)?;
        match (route, &req.method) {
            (Route::Collection, Method::Get) => {
                self.list(req.query.get(SEARCH_PARAM).map(String::as_str)).await
            }
            (Route::Collection, Method::Post) => self.create(req).await,
            (Route::Item(id), Method::Get) => self.get(id).await,
            (Route::Item(id), Method::Put) => self.update(id, &req.body).await,
            (Route::Item(id), Method::Delete) => self.delete(id).await,
            _ => Err(ApiError::NotFound),
        }
    }

    async fn list(&self, search_term: Option<&str>) -> Result<ApiResponse, ApiError> {
        let notes = self.store.filter(search_term).await?;
        debug!(?search_term, count = notes.len(), "list: matched");
        Ok(ApiResponse::json(Status::Ok, to_json(&notes)))
    }

    async fn get(&self, raw_id: &str) -> Result<ApiResponse, ApiError> {
        let id = NoteId::parse(raw_id).ok_or(ApiError::NotFound)?;
        match self.store.find(id).await? {
            Outcome::Found(note) => Ok(ApiResponse::json(Status::Ok, to_json(&note))),
            Outcome::NotFound => Err(ApiError::NotFound),
        }
    }

    async fn create(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let body = parse_object(&req.body)?;
        let title = match body.get("title") {
            Some(Value::String(title)) if !title.is_empty() => title.clone(),
            _ => return Err(ApiError::MissingTitle),
        };
        let content = optional_string(&body, "content")?;

        let note = self.store.create(NewNote { title, content }).await?;
        let host = req.host.as_deref().unwrap_or(&self.public_host);
        let location = format!("http://{}{}/{}", host, NOTES_PATH, note.id);
        Ok(ApiResponse::json(Status::Created, to_json(&note)).with_location(location))
    }

    async fn update(&self, raw_id: &str, body: &[u8]) -> Result<ApiResponse, ApiError> {
        let id = NoteId::parse(raw_id).ok_or(ApiError::NotFound)?;
        let body = parse_object(body)?;
        let patch = whitelist(&body)?;
        match self.store.update(id, patch).await? {
            Outcome::Found(note) => Ok(ApiResponse::json(Status::Ok, to_json(&note))),
            Outcome::NotFound => Err(ApiError::NotFound),
        }
    }

    async fn delete(&self, raw_id: &str) -> Result<ApiResponse, ApiError> {
        let id = NoteId::parse(raw_id).ok_or(ApiError::NotFound)?;
        match self.store.delete(id).await? {
            Outcome::Found(_) => Ok(ApiResponse::no_content()),
            Outcome::NotFound => Err(ApiError::NotFound),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    // Notes and note lists always serialize
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Parse a JSON object body; an empty body is an empty object
fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::MalformedBody(format!("expected object, got {}", other))),
        Err(e) => Err(ApiError::MalformedBody(e.to_string())),
    }
}

/// Read an optional string field; `null` and absence both mean `None`
fn optional_string(body: &Map<String, Value>, field: &'static str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::InvalidField(field)),
    }
}

/// Build a patch from the updatable fields only; everything else is dropped
fn whitelist(body: &Map<String, Value>) -> Result<NotePatch, ApiError> {
    let dropped: Vec<&String> = body.keys().filter(|k| !UPDATABLE_FIELDS.contains(&k.as_str())).collect();
    if !dropped.is_empty() {
        debug!(?dropped, "whitelist: ignoring fields");
    }

    let mut patch = NotePatch::default();
    match body.get("title") {
        None => {}
        Some(Value::String(title)) if !title.is_empty() => patch.title = Some(title.clone()),
        Some(Value::String(_)) | Some(Value::Null) => return Err(ApiError::MissingTitle),
        Some(_) => return Err(ApiError::InvalidField("title")),
    }
    if body.contains_key("content") {
        patch.content = Some(optional_string(body, "content")?);
    }
    Ok(patch)
}
