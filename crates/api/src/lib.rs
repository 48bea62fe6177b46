// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for section mapping.
//!
//! Requests arrive as plain DTOs with raw identifiers and role codes. The
//! handlers validate them, run them through the core engine over
//! persistence, and translate every failure into an [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    analyze_preferences, bulk_create_assignments, create_assignment, delete_assignment,
    invalidate_cache, load_fixture, navigate, parse_scope, query_hierarchy,
    search_representatives,
};
pub use request_response::{
    AnalyzePreferencesRequest, AnalyzePreferencesResponse, BulkCreateAssignmentsRequest,
    BulkCreateAssignmentsResponse, CreateAssignmentRequest, CreateAssignmentResponse,
    DeleteAssignmentResponse, HierarchyQueryRequest, HierarchyResponse, InvalidateCacheRequest,
    InvalidateCacheResponse, LoadFixtureResponse, NavigateRequest, NavigateResponse,
    RepresentativeCandidate, SearchRepresentativesRequest, SearchRepresentativesResponse,
};
