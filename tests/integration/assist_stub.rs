//! Integration tests for the task decomposition assistant.
//!
//! Points the assistant at a stub generation endpoint and checks the
//! swallow-all failure policy: well-formed responses yield suggestions,
//! everything else yields an empty list, and a missing credential skips
//! the network entirely.
//!
//! Verification command: `cargo test --test assist_stub`

use std::net::SocketAddr;

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};

use termtodo::assist::Assistant;

/// Starts a stub generation endpoint that always answers with `response`.
async fn start_stub(status: StatusCode, response: Value) -> SocketAddr {
    let app = Router::new().route(
        "/generate",
        post(move || {
            let response = response.clone();
            async move { (status, Json(response)) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// A well-formed generation response wrapping the given inner text.
fn generation_response(inner_text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": inner_text } ] } }
        ]
    })
}

#[tokio::test]
async fn well_formed_response_yields_suggestions() {
    let addr = start_stub(
        StatusCode::OK,
        generation_response(r#"{"subtasks": ["Book venue", "Send invites", "Order cake"]}"#),
    )
    .await;

    let assistant = Assistant::new(Some("test-key".to_string()))
        .with_base_url(&format!("http://{addr}/generate"));

    let suggestions = assistant.break_down("Plan a wedding").await;
    assert_eq!(suggestions, vec!["Book venue", "Send invites", "Order cake"]);
}

#[tokio::test]
async fn malformed_inner_payload_yields_empty() {
    let addr = start_stub(StatusCode::OK, generation_response("not json at all")).await;

    let assistant = Assistant::new(Some("test-key".to_string()))
        .with_base_url(&format!("http://{addr}/generate"));

    let suggestions = assistant.break_down("Plan a wedding").await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn response_without_candidates_yields_empty() {
    let addr = start_stub(StatusCode::OK, json!({ "candidates": [] })).await;

    let assistant = Assistant::new(Some("test-key".to_string()))
        .with_base_url(&format!("http://{addr}/generate"));

    let suggestions = assistant.break_down("Plan a wedding").await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn error_status_yields_empty() {
    let addr = start_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": "quota exhausted" }),
    )
    .await;

    let assistant = Assistant::new(Some("test-key".to_string()))
        .with_base_url(&format!("http://{addr}/generate"));

    let suggestions = assistant.break_down("Plan a wedding").await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn missing_credential_never_contacts_the_endpoint() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let hits = Arc::new(AtomicUsize::new(0));
    let hits_for_handler = Arc::clone(&hits);
    let app = Router::new().route(
        "/generate",
        post(move || {
            let hits = Arc::clone(&hits_for_handler);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(generation_response(r#"{"subtasks": ["never seen"]}"#))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let assistant = Assistant::new(None).with_base_url(&format!("http://{addr}/generate"));
    let suggestions = assistant.break_down("Plan a wedding").await;

    assert!(suggestions.is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
