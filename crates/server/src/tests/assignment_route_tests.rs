// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use axum::{Router, http::StatusCode};
use mappatura_api::{BulkCreateAssignmentsResponse, CreateAssignmentResponse};
use serde_json::json;

use super::helpers::{create_test_app_state, create_test_app_state_with_timeout, send};
use crate::routes::{AppState, build_router};

#[tokio::test]
async fn test_create_assignment_returns_created_then_ok() {
    let app: Router = build_router(create_test_app_state());
    let body = json!({ "section_id": 12, "representative_id": 1, "role": "RDL" });

    let (first, _) = send(&app, "POST", "/assignments", Some(body.clone())).await;
    let (second, payload) = send(&app, "POST", "/assignments", Some(body)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::OK);
    let response: CreateAssignmentResponse = serde_json::from_value(payload).unwrap();
    assert!(!response.created);
}

#[tokio::test]
async fn test_create_assignment_on_held_slot_is_conflict() {
    let app: Router = build_router(create_test_app_state());
    send(
        &app,
        "POST",
        "/assignments",
        Some(json!({ "section_id": 12, "representative_id": 1, "role": "RDL" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/assignments",
        Some(json!({ "section_id": 12, "representative_id": 2, "role": "RDL" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("held by representative 1")
    );
}

#[tokio::test]
async fn test_create_assignment_with_unknown_role_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        "POST",
        "/assignments",
        Some(json!({ "section_id": 12, "representative_id": 1, "role": "SEGRETARIO" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_assignment_frees_slot() {
    let app: Router = build_router(create_test_app_state());
    let (_, created) = send(
        &app,
        "POST",
        "/assignments",
        Some(json!({ "section_id": 4, "representative_id": 2, "role": "SUPPLENTE" })),
    )
    .await;
    let assignment_id = created["assignment"]["id"].as_i64().unwrap();
    let uri = format!("/assignments/{assignment_id}");

    let (removed, _) = send(&app, "DELETE", &uri, None).await;
    let (again, _) = send(&app, "DELETE", &uri, None).await;

    assert_eq!(removed, StatusCode::OK);
    assert_eq!(again, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_with_conflict_is_multi_status() {
    let app: Router = build_router(create_test_app_state());
    send(
        &app,
        "POST",
        "/assignments",
        Some(json!({ "section_id": 13, "representative_id": 2, "role": "RDL" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/assignments/bulk",
        Some(json!({
            "representative_id": 1,
            "section_ids": [12, 13, 14],
            "role": "RDL",
            "scope": { "municipality": 100, "district": 3 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::MULTI_STATUS);
    let response: BulkCreateAssignmentsResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.succeeded, 2);
    assert_eq!(response.failed, 1);
    assert!(response.partial_failure);
    assert_eq!(response.view.unwrap().summary.assigned_sections, 3);
}

#[tokio::test]
async fn test_bulk_without_conflict_is_ok() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/assignments/bulk",
        Some(json!({ "representative_id": 3, "section_ids": [21, 22], "role": "SUPPLENTE" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["partial_failure"], json!(false));
}

#[tokio::test]
async fn test_bulk_with_unknown_reload_scope_is_not_found_and_writes_nothing() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        "POST",
        "/assignments/bulk",
        Some(json!({
            "representative_id": 1,
            "section_ids": [12, 13],
            "role": "RDL",
            "scope": { "municipality": 999 }
        })),
    )
    .await;
    let (_, view) = send(&app, "GET", "/hierarchy?municipality=100&district=3", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(view["summary"]["assigned_sections"], json!(0));
}

#[tokio::test]
async fn test_bulk_with_empty_selection_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        "POST",
        "/assignments/bulk",
        Some(json!({ "representative_id": 1, "section_ids": [], "role": "RDL" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_that_waits_past_timeout_is_request_timeout() {
    let app_state: AppState = create_test_app_state_with_timeout(Duration::from_millis(50));
    let app: Router = build_router(app_state.clone());
    let held = app_state.persistence.lock().await;

    let (status, _) = send(&app, "GET", "/hierarchy", None).await;
    drop(held);

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_cache_invalidate_returns_scope() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/cache/invalidate",
        Some(json!({ "scope": { "municipality": 101 } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"]["municipality"], json!(101));
}
