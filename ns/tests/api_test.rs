//! End-to-end tests for the notes API
//!
//! These drive `NotesApi` with the built-in seed, the same way the HTTP front
//! end does, and check statuses, bodies and headers.

use serde_json::{Value, json};

use notestore::api::{ApiRequest, MISSING_TITLE, NotesApi, Status};
use notestore::domain::builtin_seed;
use notestore::state::{Latency, NoteStore, StoreOptions};

fn api() -> NotesApi {
    let store = NoteStore::initialize(builtin_seed(), StoreOptions::default()).expect("Failed to initialize store");
    NotesApi::new(store, "localhost:8080")
}

fn body(resp: &notestore::ApiResponse) -> &Value {
    resp.body.as_ref().expect("Response should have a body")
}

// =============================================================================
// GET /api/notes
// =============================================================================

#[tokio::test]
async fn test_list_returns_ten_notes_on_startup() {
    let resp = api().handle(ApiRequest::get("/api/notes")).await;
    assert_eq!(resp.status, Status::Ok);
    let notes = body(&resp).as_array().expect("Body should be an array");
    assert_eq!(notes.len(), 10);
}

#[tokio::test]
async fn test_list_returns_valid_keys() {
    let resp = api().handle(ApiRequest::get("/api/notes")).await;
    for note in body(&resp).as_array().unwrap() {
        let obj = note.as_object().expect("Note should be an object");
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["content", "id", "title"]);
    }
}

#[tokio::test]
async fn test_list_with_search_term() {
    let api = api();

    let resp = api
        .handle(ApiRequest::get("/api/notes").with_query("searchTerm", "article"))
        .await;
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(body(&resp).as_array().unwrap().len(), 2);

    let resp = api
        .handle(ApiRequest::get("/api/notes").with_query("searchTerm", "article something notValid"))
        .await;
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(body(&resp), &json!([]));
}

#[tokio::test]
async fn test_list_with_empty_search_term_returns_all() {
    let resp = api()
        .handle(ApiRequest::get("/api/notes/").with_query("searchTerm", ""))
        .await;
    assert_eq!(body(&resp).as_array().unwrap().len(), 10);
}

// =============================================================================
// GET /api/notes/:id
// =============================================================================

#[tokio::test]
async fn test_get_existing_note() {
    let resp = api().handle(ApiRequest::get("/api/notes/1005")).await;
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(body(&resp)["id"], 1005);
    assert!(body(&resp)["title"].is_string());
}

#[tokio::test]
async fn test_get_invalid_id_is_404() {
    let api = api();
    for path in ["/api/notes/DOESNOTEXIST", "/api/notes/999999"] {
        let resp = api.handle(ApiRequest::get(path)).await;
        assert_eq!(resp.status, Status::NotFound, "{}", path);
        assert_eq!(resp.message(), Some("Not Found"));
    }
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let resp = api().handle(ApiRequest::get("/DOES/NOT/EXIST")).await;
    assert_eq!(resp.status, Status::NotFound);
    assert_eq!(resp.message(), Some("Not Found"));
}

// =============================================================================
// POST /api/notes
// =============================================================================

#[tokio::test]
async fn test_create_returns_note_and_location() {
    let api = api();
    let resp = api
        .handle(
            ApiRequest::post("/api/notes")
                .with_host("notes.test:8080")
                .with_json(&json!({"title": "new title", "content": "new content"})),
        )
        .await;

    assert_eq!(resp.status, Status::Created);
    let id = body(&resp)["id"].as_u64().expect("Server should assign an id");
    assert_eq!(
        body(&resp),
        &json!({"id": id, "title": "new title", "content": "new content"})
    );
    assert_eq!(
        resp.location.as_deref(),
        Some(format!("http://notes.test:8080/api/notes/{}", id).as_str())
    );

    // The new note is readable at its id
    let resp = api.handle(ApiRequest::get(format!("/api/notes/{}", id))).await;
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(body(&resp)["title"], "new title");
}

#[tokio::test]
async fn test_create_location_falls_back_to_public_host() {
    let resp = api()
        .handle(ApiRequest::post("/api/notes").with_json(&json!({"title": "t"})))
        .await;
    let id = body(&resp)["id"].as_u64().unwrap();
    assert_eq!(resp.location, Some(format!("http://localhost:8080/api/notes/{}", id)));
    assert_eq!(body(&resp)["content"], Value::Null);
}

#[tokio::test]
async fn test_create_without_title_is_rejected() {
    let api = api();
    for payload in [json!({"something": true}), json!({"content": "no title"}), json!({"title": ""})] {
        let resp = api.handle(ApiRequest::post("/api/notes").with_json(&payload)).await;
        assert_eq!(resp.status, Status::BadRequest);
        assert_eq!(resp.message(), Some(MISSING_TITLE));
    }

    // Nothing reached the store
    assert_eq!(api.store().len().await.unwrap(), 10);
}

#[tokio::test]
async fn test_create_with_malformed_body() {
    let resp = api()
        .handle(ApiRequest::post("/api/notes").with_body("{title: oops"))
        .await;
    assert_eq!(resp.status, Status::BadRequest);
    assert_eq!(resp.message(), Some("Malformed JSON in request body"));
}

// =============================================================================
// PUT /api/notes/:id
// =============================================================================

#[tokio::test]
async fn test_update_returns_updated_note() {
    let resp = api()
        .handle(ApiRequest::put("/api/notes/1001").with_json(&json!({"title": "new title", "content": "content new"})))
        .await;
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(
        body(&resp),
        &json!({"id": 1001, "title": "new title", "content": "content new"})
    );
}

#[tokio::test]
async fn test_update_content_only_keeps_title() {
    let api = api();
    let before = api.handle(ApiRequest::get("/api/notes/1002")).await;

    let resp = api
        .handle(ApiRequest::put("/api/notes/1002").with_json(&json!({"content": "Z"})))
        .await;
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(body(&resp)["title"], body(&before)["title"]);
    assert_eq!(body(&resp)["content"], "Z");
    assert_eq!(body(&resp)["id"], 1002);
}

#[tokio::test]
async fn test_update_drops_unknown_fields() {
    let resp = api()
        .handle(ApiRequest::put("/api/notes/1003").with_json(&json!({"id": 1, "title": "t", "color": "red"})))
        .await;
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(body(&resp)["id"], 1003);
    assert!(body(&resp).get("color").is_none());
}

#[tokio::test]
async fn test_update_missing_note_is_404() {
    let api = api();
    let update = json!({"title": "new title", "content": "content new"});

    let resp = api.handle(ApiRequest::put("/api/notes/4242").with_json(&update)).await;
    assert_eq!(resp.status, Status::NotFound);

    let resp = api
        .handle(ApiRequest::put("/api/notes/INVALID/ENDPOINT").with_json(&update))
        .await;
    assert_eq!(resp.status, Status::NotFound);
    assert_eq!(resp.message(), Some("Not Found"));
}

#[tokio::test]
async fn test_update_unparseable_id_is_404_regardless_of_body() {
    let api = api();

    let resp = api
        .handle(ApiRequest::put("/api/notes/DOESNOTEXIST").with_body("{title: oops"))
        .await;
    assert_eq!(resp.status, Status::NotFound);

    let resp = api
        .handle(ApiRequest::put("/api/notes/DOESNOTEXIST").with_json(&json!({"title": ""})))
        .await;
    assert_eq!(resp.status, Status::NotFound);
    assert_eq!(resp.message(), Some("Not Found"));
}

#[tokio::test]
async fn test_update_with_empty_title_is_rejected() {
    let resp = api()
        .handle(ApiRequest::put("/api/notes/1001").with_json(&json!({"title": ""})))
        .await;
    assert_eq!(resp.status, Status::BadRequest);
    assert_eq!(resp.message(), Some(MISSING_TITLE));
}

// =============================================================================
// DELETE /api/notes/:id
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let api = api();

    let resp = api.handle(ApiRequest::delete("/api/notes/1001")).await;
    assert_eq!(resp.status, Status::NoContent);
    assert!(resp.body.is_none());

    let resp = api.handle(ApiRequest::get("/api/notes/1001")).await;
    assert_eq!(resp.status, Status::NotFound);

    let resp = api.handle(ApiRequest::delete("/api/notes/1001")).await;
    assert_eq!(resp.status, Status::NotFound);
}

#[tokio::test]
async fn test_deleted_id_is_never_reassigned() {
    let api = api();
    let created = api
        .handle(ApiRequest::post("/api/notes").with_json(&json!({"title": "temp"})))
        .await;
    let first_id = body(&created)["id"].as_u64().unwrap();

    api.handle(ApiRequest::delete(format!("/api/notes/{}", first_id))).await;

    let created = api
        .handle(ApiRequest::post("/api/notes").with_json(&json!({"title": "next"})))
        .await;
    let second_id = body(&created)["id"].as_u64().unwrap();
    assert!(second_id > first_id);
}

// =============================================================================
// Faults
// =============================================================================

#[tokio::test]
async fn test_store_fault_is_500() {
    let api = api();
    api.store().shutdown().await.unwrap();

    let resp = api.handle(ApiRequest::get("/api/notes")).await;
    assert_eq!(resp.status, Status::InternalServerError);
    assert_eq!(resp.message(), Some("Internal Server Error"));
}

#[tokio::test]
async fn test_api_with_latency() {
    let options = StoreOptions {
        latency: Latency::between(1, 10),
        ..Default::default()
    };
    let store = NoteStore::initialize(builtin_seed(), options).unwrap();
    let api = NotesApi::new(store, "localhost:8080");

    let (a, b) = tokio::join!(
        api.handle(ApiRequest::get("/api/notes/1000")),
        api.handle(ApiRequest::post("/api/notes").with_json(&json!({"title": "slow"}))),
    );
    assert_eq!(a.status, Status::Ok);
    assert_eq!(b.status, Status::Created);
}
