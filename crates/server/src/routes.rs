// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use mappatura::{AggregateCache, Cancellation};
use mappatura_api::{
    AnalyzePreferencesRequest, AnalyzePreferencesResponse, ApiError,
    BulkCreateAssignmentsRequest, BulkCreateAssignmentsResponse, CreateAssignmentRequest,
    CreateAssignmentResponse, DeleteAssignmentResponse, HierarchyQueryRequest, HierarchyResponse,
    InvalidateCacheRequest, InvalidateCacheResponse, NavigateRequest, NavigateResponse,
    SearchRepresentativesRequest, SearchRepresentativesResponse, analyze_preferences,
    bulk_create_assignments, create_assignment, delete_assignment, invalidate_cache, navigate,
    query_hierarchy, search_representatives,
};
use mappatura_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; the aggregate cache is shared
/// by every per-request engine.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer for reference data and assignments.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Memoized counters, invalidated by write handlers.
    pub cache: Arc<AggregateCache>,
    /// Upper bound on the time a request may take.
    pub request_timeout: Duration,
    /// Auto-skip cap for `/navigator`.
    pub max_auto_skip: usize,
}

/// Query parameters for searching representatives.
///
/// Kept flat: query strings cannot carry the nested request shape.
#[derive(Debug, Deserialize)]
pub struct SearchRepresentativesQuery {
    /// Region identifier.
    pub region: Option<i64>,
    /// Province identifier.
    pub province: Option<i64>,
    /// Municipality identifier.
    pub municipality: Option<i64>,
    /// District number.
    pub district: Option<u32>,
    /// Name or email filter.
    pub filter: Option<String>,
}

impl From<SearchRepresentativesQuery> for SearchRepresentativesRequest {
    fn from(query: SearchRepresentativesQuery) -> Self {
        Self {
            scope: HierarchyQueryRequest {
                region: query.region,
                province: query.province,
                municipality: query.municipality,
                district: query.district,
            },
            filter: query.filter,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Per-item outcomes of a partially failed bulk assignment, sent as the
    /// body instead of an [`ErrorResponse`].
    partial: Option<Box<BulkCreateAssignmentsResponse>>,
}

impl HttpError {
    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            partial: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if let Some(partial) = self.partial {
            return (self.status, Json(*partial)).into_response();
        }
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        let (status, partial) = match err {
            ApiError::SlotOccupied { .. } => (StatusCode::CONFLICT, None),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, None),
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, None),
            ApiError::DomainRuleViolation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, None),
            ApiError::PartialBatchFailure(response) => (StatusCode::MULTI_STATUS, Some(response)),
            ApiError::Cancelled { .. } => (StatusCode::REQUEST_TIMEOUT, None),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        Self {
            status,
            message,
            partial,
        }
    }
}

/// Runs a handler on the blocking pool under the request timeout.
///
/// When the timeout fires the cancellation flag is raised; work already
/// committed stays committed and the caller receives `408`.
async fn run_blocking<T, F>(app_state: &AppState, work: F) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce(&mut Persistence, &Arc<AggregateCache>, &Cancellation) -> Result<T, ApiError>
        + Send
        + 'static,
{
    let cancellation: Cancellation = Cancellation::new();
    let token: Cancellation = cancellation.clone();
    let persistence: Arc<Mutex<Persistence>> = Arc::clone(&app_state.persistence);
    let cache: Arc<AggregateCache> = Arc::clone(&app_state.cache);

    let task = async move {
        let mut guard = persistence.lock_owned().await;
        tokio::task::spawn_blocking(move || work(&mut *guard, &cache, &token)).await
    };

    match tokio::time::timeout(app_state.request_timeout, task).await {
        Ok(Ok(result)) => result.map_err(HttpError::from),
        Ok(Err(join_error)) => {
            error!(error = %join_error, "Request task failed");
            Err(HttpError::internal(format!("Request task failed: {join_error}")))
        }
        Err(_) => {
            cancellation.cancel();
            warn!(
                timeout_secs = app_state.request_timeout.as_secs(),
                "Request timed out; cancellation requested"
            );
            Err(HttpError {
                status: StatusCode::REQUEST_TIMEOUT,
                message: String::from("Request timed out"),
                partial: None,
            })
        }
    }
}

/// Handler for GET `/hierarchy` endpoint.
async fn handle_query_hierarchy(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<HierarchyQueryRequest>,
) -> Result<Json<HierarchyResponse>, HttpError> {
    let response: HierarchyResponse = run_blocking(&app_state, move |persistence, cache, _| {
        query_hierarchy(persistence, cache, &query)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for GET `/representatives` endpoint.
async fn handle_search_representatives(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SearchRepresentativesQuery>,
) -> Result<Json<SearchRepresentativesResponse>, HttpError> {
    let request: SearchRepresentativesRequest = SearchRepresentativesRequest::from(query);
    let response: SearchRepresentativesResponse =
        run_blocking(&app_state, move |persistence, cache, _| {
            search_representatives(persistence, cache, &request)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/assignments` endpoint.
///
/// Returns `201` for a new assignment and `200` when the representative
/// already held the slot.
async fn handle_create_assignment(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<CreateAssignmentResponse>), HttpError> {
    info!(
        section_id = req.section_id,
        representative_id = req.representative_id,
        role = %req.role,
        "Handling create_assignment request"
    );
    let response: CreateAssignmentResponse =
        run_blocking(&app_state, move |persistence, cache, cancellation| {
            create_assignment(persistence, cache, &req, cancellation)
        })
        .await?;
    let status: StatusCode = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// Handler for DELETE `/assignments/{assignment_id}` endpoint.
async fn handle_delete_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<DeleteAssignmentResponse>, HttpError> {
    info!(assignment_id, "Handling delete_assignment request");
    let response: DeleteAssignmentResponse =
        run_blocking(&app_state, move |persistence, cache, cancellation| {
            delete_assignment(persistence, cache, assignment_id, cancellation)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/assignments/bulk` endpoint.
///
/// A batch with any unassigned section surfaces as a `207` error carrying
/// the same body.
async fn handle_bulk_create_assignments(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BulkCreateAssignmentsRequest>,
) -> Result<Json<BulkCreateAssignmentsResponse>, HttpError> {
    info!(
        representative_id = req.representative_id,
        role = %req.role,
        sections = req.section_ids.len(),
        "Handling bulk_create_assignments request"
    );
    let response: BulkCreateAssignmentsResponse =
        run_blocking(&app_state, move |persistence, cache, cancellation| {
            bulk_create_assignments(persistence, cache, &req, cancellation)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/cache/invalidate` endpoint.
async fn handle_invalidate_cache(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<InvalidateCacheRequest>,
) -> Result<Json<InvalidateCacheResponse>, HttpError> {
    let response: InvalidateCacheResponse =
        run_blocking(&app_state, move |persistence, cache, _| {
            invalidate_cache(persistence, cache, &req)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/preferences/analyze` endpoint.
async fn handle_analyze_preferences(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AnalyzePreferencesRequest>,
) -> Result<Json<AnalyzePreferencesResponse>, HttpError> {
    let response: AnalyzePreferencesResponse =
        run_blocking(&app_state, move |persistence, cache, _| {
            analyze_preferences(persistence, cache, &req)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/navigator` endpoint.
async fn handle_navigate(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>, HttpError> {
    let max_auto_skip: usize = app_state.max_auto_skip;
    let response: NavigateResponse = run_blocking(&app_state, move |persistence, cache, _| {
        navigate(persistence, cache, &req, max_auto_skip)
    })
    .await?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/hierarchy", get(handle_query_hierarchy))
        .route("/representatives", get(handle_search_representatives))
        .route("/assignments", post(handle_create_assignment))
        .route("/assignments/bulk", post(handle_bulk_create_assignments))
        .route(
            "/assignments/{assignment_id}",
            delete(handle_delete_assignment),
        )
        .route("/cache/invalidate", post(handle_invalidate_cache))
        .route("/preferences/analyze", post(handle_analyze_preferences))
        .route("/navigator", post(handle_navigate))
        .with_state(app_state)
}
