// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared router fixtures.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use mappatura::{AggregateCache, DEFAULT_MAX_AUTO_SKIP};
use mappatura_api::load_fixture;
use mappatura_persistence::Persistence;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::routes::AppState;

const DEMO_FIXTURE: &str = include_str!("../../../../fixtures/demo.json");

/// Creates app state over an in-memory database loaded with the demo fixture.
pub fn create_test_app_state() -> AppState {
    create_test_app_state_with_timeout(Duration::from_secs(5))
}

pub fn create_test_app_state_with_timeout(request_timeout: Duration) -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let cache: Arc<AggregateCache> = Arc::new(AggregateCache::new());
    load_fixture(&mut persistence, &cache, DEMO_FIXTURE).expect("Failed to load demo fixture");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        cache,
        request_timeout,
        max_auto_skip: DEFAULT_MAX_AUTO_SKIP,
    }
}

/// Sends one request and returns the status and the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
