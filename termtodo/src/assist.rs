//! AI-assisted task decomposition.
//!
//! Wraps an external text-generation API behind a single operation:
//! given task text, return 3-5 short subtask suggestions. The result is
//! advisory only and never mutates task state.
//!
//! Failure policy: without a credential the call is never attempted, and
//! every failure of the external call (transport, status, malformed
//! response, missing field) collapses to an empty suggestion list.
//! Internally the failure is typed as [`AssistError`] so the boundary is
//! testable, but callers of [`Assistant::break_down`] cannot distinguish
//! "no suggestions" from "call failed".

use serde::{Deserialize, Serialize};

/// Default generation endpoint (Gemini `generateContent`).
const DEFAULT_ASSIST_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Typed failure of the external generation call. Never escapes
/// [`Assistant::break_down`].
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// The request could not be sent.
    #[error("request failed: {0}")]
    Request(String),
    /// The endpoint returned a non-success status.
    #[error("generation endpoint returned {0}")]
    Status(reqwest::StatusCode),
    /// The response carried no generated text.
    #[error("response contained no generated text")]
    MissingContent,
    /// The generated text was not the expected JSON shape.
    #[error("malformed suggestion payload: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Wire shapes for the generation endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// The JSON payload the model is asked to produce.
#[derive(Debug, Deserialize)]
struct SubtaskPayload {
    #[serde(default)]
    subtasks: Vec<String>,
}

/// Task-decomposition assistant over an external generation endpoint.
pub struct Assistant {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl Assistant {
    /// Creates an assistant. An absent credential disables the feature
    /// without error: [`break_down`](Self::break_down) short-circuits to
    /// an empty result.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_ASSIST_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Overrides the generation endpoint (tests point this at a stub).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Returns `true` if a credential is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Breaks the given task text into 3-5 short subtask suggestions.
    ///
    /// Returns an empty list when no credential is configured (no network
    /// access is attempted) and on any failure of the external call.
    pub async fn break_down(&self, task_text: &str) -> Vec<String> {
        let Some(key) = &self.api_key else {
            tracing::debug!("no assist credential configured, returning empty suggestions");
            return Vec::new();
        };
        match self.request_suggestions(key, task_text).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!(error = %e, "task decomposition failed, returning empty suggestions");
                Vec::new()
            }
        }
    }

    /// Performs the generation call and parses the suggestion payload.
    async fn request_suggestions(
        &self,
        key: &str,
        task_text: &str,
    ) -> Result<Vec<String>, AssistError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: prompt_for(task_text),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("key", key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssistError::Status(response.status()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistError::Malformed(e.to_string()))?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or(AssistError::MissingContent)?;

        parse_suggestions(&text)
    }
}

/// The fixed prompt template for decomposition.
fn prompt_for(task_text: &str) -> String {
    format!(
        "Break down the following task into 3 to 5 smaller, actionable subtasks: \
         \"{task_text}\". Keep them concise. Respond as JSON: {{\"subtasks\": [...]}}"
    )
}

/// Parses the model's JSON payload into the suggestion list.
fn parse_suggestions(text: &str) -> Result<Vec<String>, AssistError> {
    let payload: SubtaskPayload =
        serde_json::from_str(text).map_err(|e| AssistError::Malformed(e.to_string()))?;
    Ok(payload.subtasks)
}
