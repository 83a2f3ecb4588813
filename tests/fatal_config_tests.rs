//! Fatal configuration errors must surface before any network call.

use silicon_ocr::{expand_patterns, BatchError, Cli, Config, ConfigError, API_KEY_ENV};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use clap::Parser;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

async fn spawn_counting_mock(hits: Arc<AtomicUsize>) -> String {
    async fn handler(
        State(hits): State<Arc<AtomicUsize>>,
        Json(_body): Json<serde_json::Value>,
    ) -> Json<serde_json::Value> {
        hits.fetch_add(1, Ordering::SeqCst);
        Json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        }))
    }

    let app = Router::new()
        .route("/v1/chat/completions", post(handler))
        .with_state(hits);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock endpoint");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/v1/chat/completions")
}

#[tokio::test]
async fn test_missing_api_key_aborts_with_zero_requests() {
    let hits = Arc::new(AtomicUsize::new(0));
    let api_url = spawn_counting_mock(hits.clone()).await;

    std::env::remove_var(API_KEY_ENV);
    let cli = Cli::parse_from(["silicon-ocr", "--api-url", api_url.as_str(), "a.png"]);

    let result = Config::resolve(&cli);
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));

    // resolution failed before a client was even constructed
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_empty_glob_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = format!("{}/*.png", dir.path().display());

    let result = expand_patterns(&[pattern.clone()]);
    match result {
        Err(BatchError::EmptyGlob(reported)) => assert_eq!(reported, pattern),
        other => panic!("expected EmptyGlob, got {other:?}"),
    }
}

#[test]
fn test_invalid_glob_pattern_is_reported() {
    let result = expand_patterns(&["scans/[invalid.png".to_string()]);
    assert!(matches!(result, Err(BatchError::Pattern { .. })));
}
