//! HTTP API: router, handlers, and server startup.
//!
//! Four JSON routes rooted at `/api/todos`, backed by [`TodoStore`]:
//!
//! | Method | Path              | Success                  | Failure          |
//! |--------|-------------------|--------------------------|------------------|
//! | GET    | `/api/todos`      | 200, array of tasks      | 500 `{message}`  |
//! | POST   | `/api/todos`      | 201, stored task         | 400 `{message}`  |
//! | PUT    | `/api/todos/{id}` | 200, updated task        | 404/400          |
//! | DELETE | `/api/todos/{id}` | 200, `{message}` ack     | 404/500          |
//!
//! All failure bodies are [`ErrorBody`]. Path ids are parsed as UUIDs;
//! a malformed id on PUT maps to 400, on DELETE to 404 (unknown record).
//! PUT accepts a full or partial task body ([`TaskPatch`]); a body that
//! fails to parse maps to 400.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use uuid::Uuid;

use termtodo_proto::api::{DeleteAck, ErrorBody, TODOS_PATH, TaskPatch};
use termtodo_proto::task::{Task, TaskId};

use crate::store::{StoreError, TodoStore};

/// Shared server state: the record store.
pub struct AppState {
    /// The task record store.
    pub store: TodoStore,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: TodoStore::new(),
        }
    }
}

/// Maps a [`StoreError`] to its HTTP status and error body.
fn error_response(err: &StoreError) -> Response {
    let status = match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) | StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorBody::new(err.to_string()))).into_response()
}

/// `GET /api/todos` — all tasks, newest first.
async fn list_todos(State(state): State<Arc<AppState>>) -> Response {
    let tasks = state.store.list().await;
    tracing::debug!(count = tasks.len(), "listing todos");
    Json(tasks).into_response()
}

/// `POST /api/todos` — store a new task.
async fn create_todo(State(state): State<Arc<AppState>>, Json(task): Json<Task>) -> Response {
    match state.store.insert(task).await {
        Ok(stored) => {
            tracing::info!(id = %stored.id, "todo created");
            (StatusCode::CREATED, Json(stored)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "todo create rejected");
            error_response(&e)
        }
    }
}

/// `PUT /api/todos/{id}` — merge a full or partial task body onto the
/// record with the matching external id.
async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Response {
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(format!("malformed todo id: {id}"))),
        )
            .into_response();
    };
    // Body rejections stay at 400: the wire contract names no other
    // client-error status.
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(format!(
                    "malformed todo body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response();
        }
    };
    let task_id = TaskId::from_uuid(uuid);
    match state.store.update(&task_id, &patch).await {
        Ok(updated) => {
            tracing::info!(id = %task_id, completed = updated.completed, "todo updated");
            Json(updated).into_response()
        }
        Err(e) => {
            tracing::warn!(id = %task_id, error = %e, "todo update failed");
            error_response(&e)
        }
    }
}

/// `DELETE /api/todos/{id}` — remove the task with the matching external id.
async fn delete_todo(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    // A malformed id cannot match any record: report not found.
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("Todo not found")),
        )
            .into_response();
    };
    let task_id = TaskId::from_uuid(uuid);
    match state.store.remove(&task_id).await {
        Ok(()) => {
            tracing::info!(id = %task_id, "todo deleted");
            Json(DeleteAck::deleted()).into_response()
        }
        Err(e) => {
            tracing::warn!(id = %task_id, error = %e, "todo delete failed");
            error_response(&e)
        }
    }
}

/// Builds the API router over the given state.
#[must_use]
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(TODOS_PATH, get(list_todos).post(create_todo))
        .route(
            &format!("{TODOS_PATH}/{{id}}"),
            axum::routing::put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

/// Starts the server on the given address and returns the bound address
/// and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(AppState::new())).await
}

/// Starts the server with a pre-configured [`AppState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "todo server error");
        }
    });

    Ok((bound_addr, handle))
}
