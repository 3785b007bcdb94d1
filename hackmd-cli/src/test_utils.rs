//! Test utilities for CLI testing
//!
//! Provides an in-process mock of the HackMD notes API that records every
//! request it receives.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hackmd_core::{NewNote, Note, NoteUpdate, Timestamp};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Token the mock accepts; anything else gets a 401
pub const MOCK_TOKEN: &str = "test-token";

/// Fixed creation time for generated notes (2023-11-14T22:13:20Z)
const BASE_MILLIS: i64 = 1_700_000_000_000;

/// One request as seen by the mock server
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Mock server state
#[derive(Debug, Clone, Default)]
pub struct MockServerState {
    /// Notes the service currently holds
    pub notes: Arc<Mutex<Vec<Note>>>,
    /// Every request received, in order
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Counter for generated note IDs
    pub next_id: Arc<Mutex<u64>>,
}

/// Build `count` notes with IDs `note-1..=note-count`
pub fn fixture_notes(count: usize) -> Vec<Note> {
    (1..=count)
        .map(|i| Note {
            id: format!("note-{}", i),
            title: Some(format!("Note {}", i)),
            content: format!("# Note {}\n\nBody {}", i, i),
            created_at: Some(Timestamp::Millis(BASE_MILLIS)),
            last_changed_at: Some(Timestamp::Millis(BASE_MILLIS + i as i64 * 60_000)),
            read_permission: None,
            write_permission: None,
            short_id: None,
            publish_link: None,
            tags: Vec::new(),
        })
        .collect()
}

/// Mock server implementation
#[derive(Debug)]
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockServer {
    /// Create a mock server with no notes
    pub fn new() -> Self {
        Self::with_notes(Vec::new())
    }

    /// Create a mock server pre-populated with notes
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let state = MockServerState::default();
        *state.next_id.lock().unwrap() = notes.len() as u64;
        *state.notes.lock().unwrap() = notes;
        Self { state, port: 0 }
    }

    /// Start the mock server and return it with its base URL
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok((self, server_url))
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &MockServerState {
        &self.state
    }

    /// Snapshot of the requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/notes", get(list_notes_handler).post(create_note_handler))
            .route(
                "/notes/:id",
                get(get_note_handler)
                    .patch(update_note_handler)
                    .delete(delete_note_handler),
            )
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                record_and_authorize,
            ))
            .with_state(self.state.clone())
    }
}

/// Record the request, then reject it unless it carries the mock token
async fn record_and_authorize(
    State(state): State<MockServerState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    let header_str = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let authorization = header_str(header::AUTHORIZATION);

    state.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization: authorization.clone(),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&bytes).ok(),
    });

    if authorization.as_deref() != Some(format!("Bearer {}", MOCK_TOKEN).as_str()) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Note not found"})),
    )
        .into_response()
}

async fn list_notes_handler(State(state): State<MockServerState>) -> Json<Vec<Note>> {
    // List responses carry metadata only
    let notes = state
        .notes
        .lock()
        .unwrap()
        .iter()
        .cloned()
        .map(|mut note| {
            note.content = String::new();
            note
        })
        .collect();
    Json(notes)
}

async fn create_note_handler(
    State(state): State<MockServerState>,
    Json(req): Json<NewNote>,
) -> Response {
    let id = {
        let mut next_id = state.next_id.lock().unwrap();
        *next_id += 1;
        format!("note-{}", *next_id)
    };

    let note = Note {
        id,
        title: Some(req.title),
        content: req.content,
        created_at: Some(Timestamp::Millis(BASE_MILLIS)),
        last_changed_at: Some(Timestamp::Millis(BASE_MILLIS)),
        read_permission: req.read_permission,
        write_permission: req.write_permission,
        short_id: None,
        publish_link: None,
        tags: Vec::new(),
    };

    state.notes.lock().unwrap().push(note.clone());
    (StatusCode::CREATED, Json(note)).into_response()
}

async fn get_note_handler(
    Path(id): Path<String>,
    State(state): State<MockServerState>,
) -> Response {
    let notes = state.notes.lock().unwrap();
    match notes.iter().find(|n| n.id == id) {
        Some(note) => Json(note.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_note_handler(
    Path(id): Path<String>,
    State(state): State<MockServerState>,
    Json(req): Json<NoteUpdate>,
) -> Response {
    let mut notes = state.notes.lock().unwrap();
    let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
        return not_found();
    };

    note.content = req.content;
    if req.read_permission.is_some() {
        note.read_permission = req.read_permission;
    }
    if req.write_permission.is_some() {
        note.write_permission = req.write_permission;
    }

    // The real service answers PATCH with an empty 202
    StatusCode::ACCEPTED.into_response()
}

async fn delete_note_handler(
    Path(id): Path<String>,
    State(state): State<MockServerState>,
) -> Response {
    let mut notes = state.notes.lock().unwrap();
    let before = notes.len();
    notes.retain(|n| n.id != id);

    if notes.len() == before {
        not_found()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
