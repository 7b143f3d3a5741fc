//! Remote HTTP store: JSON CRUD against the persistence backend.

use reqwest::{Response, StatusCode};
use termtodo_proto::api::{ErrorBody, TODOS_PATH};
use termtodo_proto::task::{Task, TaskId};

use super::StoreError;

/// HTTP-backed task store.
///
/// One [`reqwest::Client`] for the lifetime of the store; connection
/// pooling and transport timeouts are the client's concern, this layer
/// imposes none of its own.
pub struct RemoteStore {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteStore {
    /// Creates a store against the given backend base URL
    /// (e.g., `http://localhost:5000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// URL of the task collection.
    fn collection_url(&self) -> String {
        format!("{}{TODOS_PATH}", self.base_url)
    }

    /// URL of a single task record.
    fn record_url(&self, id: &TaskId) -> String {
        format!("{}{TODOS_PATH}/{id}", self.base_url)
    }

    /// `GET /api/todos`.
    pub async fn fetch_all(&self) -> Result<Vec<Task>, StoreError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(StoreError::Unavailable(
                failure_detail(response).await,
            ));
        }
        response
            .json::<Vec<Task>>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("malformed task list: {e}")))
    }

    /// `POST /api/todos`.
    pub async fn create(&self, task: &Task) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(task)
            .send()
            .await
            .map_err(|e| StoreError::CreateFailed(e.to_string()))?;
        if response.status() != StatusCode::CREATED {
            return Err(StoreError::CreateFailed(failure_detail(response).await));
        }
        Ok(())
    }

    /// `PUT /api/todos/{id}` with the full updated task as body.
    pub async fn update(&self, task: &Task) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.record_url(&task.id))
            .json(task)
            .send()
            .await
            .map_err(|e| StoreError::UpdateFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(StoreError::UpdateFailed(failure_detail(response).await));
        }
        Ok(())
    }

    /// `DELETE /api/todos/{id}`.
    pub async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(|e| StoreError::DeleteFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(StoreError::DeleteFailed(failure_detail(response).await));
        }
        Ok(())
    }
}

/// Builds a failure description from a non-success response: the status,
/// plus the backend's `{message}` body when one can be parsed.
async fn failure_detail(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => format!("{status}: {}", body.message),
        Err(_) => status.to_string(),
    }
}
