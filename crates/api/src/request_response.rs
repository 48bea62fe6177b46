// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use mappatura::{
    Aggregates, Breadcrumb, BulkItem, BulkReport, HeldAssignment, HierarchyContent,
    HierarchyView, NavigationAction, NavigatorState, RepresentativeSummary,
};
use mappatura_domain::{
    Assignment, Level, NumberRange, PreferenceEntry, PreferenceMatch, Scope,
};
use serde::{Deserialize, Serialize};

/// API request to query one level of the hierarchy.
///
/// All components are optional; the empty request is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyQueryRequest {
    /// Region identifier.
    #[serde(default)]
    pub region: Option<i64>,
    /// Province identifier.
    #[serde(default)]
    pub province: Option<i64>,
    /// Municipality identifier.
    #[serde(default)]
    pub municipality: Option<i64>,
    /// District number.
    #[serde(default)]
    pub district: Option<u32>,
}

/// API response for a hierarchy query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyResponse {
    /// The resolved path.
    pub scope: Scope,
    /// The level shown.
    pub level: Level,
    /// Children with counters, or sections grouped by building.
    pub items: HierarchyContent,
    /// Counters for the whole scope.
    pub summary: Aggregates,
    /// Path from the root.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// True when the level has exactly one child.
    pub auto_skip: bool,
}

impl From<HierarchyView> for HierarchyResponse {
    fn from(view: HierarchyView) -> Self {
        Self {
            scope: view.scope,
            level: view.level,
            items: view.content,
            summary: view.summary,
            breadcrumbs: view.breadcrumbs,
            auto_skip: view.auto_skip,
        }
    }
}

/// API request to search representatives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRepresentativesRequest {
    /// Territorial filter.
    #[serde(flatten)]
    pub scope: HierarchyQueryRequest,
    /// Case-insensitive name or email filter.
    #[serde(default)]
    pub filter: Option<String>,
}

/// One representative candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeCandidate {
    /// The representative identifier.
    pub representative_id: i64,
    /// Full name.
    pub full_name: String,
    /// Email.
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Declared municipality.
    pub municipality_id: i64,
    /// Declared district.
    pub district: Option<u32>,
    /// Free-text seat preference.
    pub preference: String,
    /// Operator notes.
    pub notes: Option<String>,
    /// Number of slots held.
    pub sections_held: usize,
    /// The held slots.
    pub assignments: Vec<HeldAssignment>,
}

impl From<RepresentativeSummary> for RepresentativeCandidate {
    fn from(summary: RepresentativeSummary) -> Self {
        let representative = summary.representative;
        Self {
            representative_id: representative.id.value(),
            full_name: representative.full_name,
            email: representative.email,
            phone: representative.phone,
            municipality_id: representative.municipality_id.value(),
            district: representative.district,
            preference: representative.preference,
            notes: representative.notes,
            sections_held: summary.sections_held,
            assignments: summary.assignments,
        }
    }
}

/// API response for a representative search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRepresentativesResponse {
    /// Matching candidates, by name.
    pub representatives: Vec<RepresentativeCandidate>,
}

/// API request to assign a representative to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    /// The section.
    pub section_id: i64,
    /// The representative.
    pub representative_id: i64,
    /// The slot: `RDL`/`EFFETTIVO` or `SUPPLENTE`.
    pub role: String,
}

/// API response for a single assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAssignmentResponse {
    /// The assignment holding the slot.
    pub assignment: Assignment,
    /// False when the representative already held the slot.
    pub created: bool,
    /// A success message.
    pub message: String,
}

/// API response for a removed assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAssignmentResponse {
    /// The removed assignment.
    pub assignment: Assignment,
    /// A success message.
    pub message: String,
}

/// API request to assign a representative to many sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCreateAssignmentsRequest {
    /// The representative.
    pub representative_id: i64,
    /// The sections; duplicates are ignored.
    pub section_ids: Vec<i64>,
    /// The slot filled in each section.
    pub role: String,
    /// The scope to reload afterwards; the root when absent.
    #[serde(default)]
    pub scope: Option<HierarchyQueryRequest>,
}

/// API response for a bulk assignment.
///
/// Returned as the success value when every section was assigned, and
/// inside `ApiError::PartialBatchFailure` when any was not; in the latter
/// case `partial_failure` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCreateAssignmentsResponse {
    /// The representative.
    pub representative_id: i64,
    /// The slot code.
    pub role: String,
    /// Per-section outcomes, by section identifier.
    pub results: Vec<BulkItem>,
    /// Sections now held by the representative.
    pub succeeded: usize,
    /// Sections not assigned.
    pub failed: usize,
    /// True when at least one section was not assigned.
    pub partial_failure: bool,
    /// The reloaded scope; absent when the batch failed before reloading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<HierarchyResponse>,
}

impl BulkCreateAssignmentsResponse {
    pub(crate) fn new(report: BulkReport, view: Option<HierarchyView>) -> Self {
        let succeeded: usize = report.succeeded().count();
        let failed: usize = report.failed().count();
        Self {
            representative_id: report.representative_id.value(),
            role: report.role.as_str().to_string(),
            partial_failure: report.is_partial_failure(),
            results: report.items,
            succeeded,
            failed,
            view: view.map(HierarchyResponse::from),
        }
    }
}

/// API request to invalidate cached counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidateCacheRequest {
    /// The scope; the root invalidates everything.
    #[serde(default)]
    pub scope: HierarchyQueryRequest,
}

/// API response for a cache invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidateCacheResponse {
    /// The invalidated scope.
    pub scope: Scope,
    /// A success message.
    pub message: String,
}

/// API request to analyze a seat preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzePreferencesRequest {
    /// The representative.
    pub representative_id: i64,
    /// Text to analyze; the stored preference when absent.
    #[serde(default)]
    pub preference_text: Option<String>,
}

/// API response for a preference analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzePreferencesResponse {
    /// The representative.
    pub representative_id: i64,
    /// Every number the text mentioned.
    pub requested: Vec<u32>,
    /// Matched sections with a free slot.
    pub matched_sections: Vec<PreferenceEntry>,
    /// Matched sections already held, by this or another representative.
    pub already_assigned: Vec<PreferenceEntry>,
    /// Requested numbers with no section in the declared territory.
    pub unmatched: Vec<u32>,
    /// Ranges too wide to expand; their numbers were not matched.
    pub oversized_ranges: Vec<NumberRange>,
}

impl AnalyzePreferencesResponse {
    pub(crate) fn new(representative_id: i64, matched: PreferenceMatch) -> Self {
        let matched_sections: Vec<PreferenceEntry> = matched.selectable().cloned().collect();
        let already_assigned: Vec<PreferenceEntry> = matched.unavailable().cloned().collect();
        Self {
            representative_id,
            requested: matched.requested.into_iter().collect(),
            matched_sections,
            already_assigned,
            unmatched: matched.unmatched,
            oversized_ranges: matched.oversized_ranges,
        }
    }
}

/// API request to move through the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateRequest {
    /// The current path.
    #[serde(default)]
    pub path: HierarchyQueryRequest,
    /// What to do.
    #[serde(flatten)]
    pub action: NavigationAction,
}

/// API response for a navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateResponse {
    /// Where the navigator ended up.
    pub state: NavigatorState,
    /// What it shows.
    pub view: HierarchyResponse,
}

/// API response for loading reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFixtureResponse {
    /// Regions stored.
    pub regions: usize,
    /// Provinces stored.
    pub provinces: usize,
    /// Municipalities stored.
    pub municipalities: usize,
    /// Sections stored.
    pub sections: usize,
    /// Representatives stored.
    pub representatives: usize,
}
