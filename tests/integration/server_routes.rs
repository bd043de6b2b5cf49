// =====
// TESTS: 5
// =====
//
// Query server route tests, driven through the router without a socket.

use artichat::search::LocalSource;
use artichat::server::{ServerState, router};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::helpers::FailingSource;

async fn get(state: ServerState, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn local() -> ServerState {
    ServerState::new(Arc::new(LocalSource::instant()))
}

fn result_field(body: &Value, field: &str) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, _) = get(local(), "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn people_filters_by_query() {
    let (status, body) = get(local(), "/people?q=patel").await;
    assert_eq!(status, StatusCode::OK);
    let names = result_field(&body, "name");
    assert_eq!(names.len(), 10);
    assert!(names.iter().all(|n| n.ends_with("Patel")));
}

#[tokio::test]
async fn search_returns_matching_words() {
    let (status, body) = get(local(), "/search?q=tests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_field(&body, "text"), vec!["write tests"]);
}

#[tokio::test]
async fn blank_query_short_circuits() {
    let state = ServerState::new(Arc::new(FailingSource));
    for uri in ["/people?q=", "/search?q=%20%20", "/search"] {
        let (status, body) = get(state.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, serde_json::json!({ "results": [] }), "{uri}");
    }
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let state = ServerState::new(Arc::new(FailingSource));
    let (status, body) = get(state, "/people?q=lee").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("503"));
}
