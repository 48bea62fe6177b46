// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler builds a short-lived [`MappingEngine`] over the caller's
//! persistence and the shared aggregate cache. Write handlers invalidate the
//! scopes their changes touch before returning, so a write is complete only
//! once the counters that cover it are stale.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use mappatura::{
    AggregateCache, AssignOutcome, BulkItemStatus, BulkOrchestrator, Cancellation, CommitResult,
    CoreError, HierarchyView, MappingEngine, Navigator, RepresentativeSummary, SelectionState,
};
use mappatura_domain::{
    Assignment, AssignmentId, MunicipalityId, PreferenceMatch, ProvinceId, RegionId,
    RepresentativeId, Role, Scope, SectionId, validate_identifier,
};
use mappatura_persistence::{Persistence, ReferenceData};
use tracing::{debug, info, warn};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AnalyzePreferencesRequest, AnalyzePreferencesResponse, BulkCreateAssignmentsRequest,
    BulkCreateAssignmentsResponse, CreateAssignmentRequest, CreateAssignmentResponse,
    DeleteAssignmentResponse, HierarchyQueryRequest, HierarchyResponse, InvalidateCacheRequest,
    InvalidateCacheResponse, LoadFixtureResponse, NavigateRequest, NavigateResponse,
    RepresentativeCandidate, SearchRepresentativesRequest, SearchRepresentativesResponse,
};

type Engine<'a> = MappingEngine<&'a mut Persistence>;

fn open_engine<'a>(persistence: &'a mut Persistence, cache: &Arc<AggregateCache>) -> Engine<'a> {
    MappingEngine::new(persistence, Arc::clone(cache))
}

/// Converts a raw path into a scope, rejecting non-positive components.
///
/// # Errors
///
/// Returns an error if any identifier is zero or negative.
pub fn parse_scope(request: &HierarchyQueryRequest) -> Result<Scope, ApiError> {
    let id = |field: &'static str, value: Option<i64>| -> Result<Option<i64>, ApiError> {
        value
            .map(|v| validate_identifier(field, v))
            .transpose()
            .map_err(translate_domain_error)
    };

    if request.district == Some(0) {
        return Err(ApiError::InvalidInput {
            field: String::from("district"),
            message: String::from("District numbers start at 1"),
        });
    }

    Ok(Scope {
        region: id("region", request.region)?.map(RegionId::new),
        province: id("province", request.province)?.map(ProvinceId::new),
        municipality: id("municipality", request.municipality)?.map(MunicipalityId::new),
        district: request.district,
    })
}

fn parse_role(role: &str) -> Result<Role, ApiError> {
    Role::from_str(role).map_err(translate_domain_error)
}

fn parse_section_id(value: i64) -> Result<SectionId, ApiError> {
    validate_identifier("section", value)
        .map(SectionId::new)
        .map_err(translate_domain_error)
}

fn parse_representative_id(value: i64) -> Result<RepresentativeId, ApiError> {
    validate_identifier("representative", value)
        .map(RepresentativeId::new)
        .map_err(translate_domain_error)
}

/// Invalidates what a write touched: the municipality-and-district scope
/// of each section and the declared scope of the representative.
///
/// The two differ whenever a representative serves outside the place they
/// declared, and the representative's availability is counted at the latter.
fn invalidate_touched<I>(
    engine: &mut Engine<'_>,
    section_ids: I,
    representative_id: RepresentativeId,
) -> Result<(), ApiError>
where
    I: IntoIterator<Item = SectionId>,
{
    let mut scopes: HashSet<Scope> = HashSet::new();
    for section_id in section_ids {
        let scope: Scope = engine
            .scope_of_section(section_id)
            .map_err(translate_core_error)?;
        scopes.insert(scope);
    }
    scopes.insert(
        engine
            .scope_of_representative(representative_id)
            .map_err(translate_core_error)?,
    );
    for scope in scopes {
        engine.invalidate_cache(scope);
    }
    Ok(())
}

/// Returns one level of the territorial hierarchy.
///
/// # Errors
///
/// Returns an error if the path is malformed or names a node that does not
/// exist.
pub fn query_hierarchy(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    request: &HierarchyQueryRequest,
) -> Result<HierarchyResponse, ApiError> {
    let scope: Scope = parse_scope(request)?;
    let view: HierarchyView = open_engine(persistence, cache)
        .query_hierarchy(&scope)
        .map_err(translate_core_error)?;
    debug!(?scope, level = %view.level, items = view.content.len(), "Hierarchy query");
    Ok(HierarchyResponse::from(view))
}

/// Lists representatives declared within a scope.
///
/// # Errors
///
/// Returns an error if the scope is malformed or does not exist.
pub fn search_representatives(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    request: &SearchRepresentativesRequest,
) -> Result<SearchRepresentativesResponse, ApiError> {
    let scope: Scope = parse_scope(&request.scope)?;
    let found: Vec<RepresentativeSummary> = open_engine(persistence, cache)
        .search_representatives(&scope, request.filter.as_deref())
        .map_err(translate_core_error)?;

    Ok(SearchRepresentativesResponse {
        representatives: found.into_iter().map(RepresentativeCandidate::from).collect(),
    })
}

/// Assigns a representative to one slot.
///
/// Repeating the same assignment succeeds without creating a second row.
///
/// # Errors
///
/// Returns `SlotOccupied` if another representative holds the slot,
/// `ResourceNotFound` for an unknown section or representative, or
/// `InvalidInput` for malformed identifiers or roles.
pub fn create_assignment(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    request: &CreateAssignmentRequest,
    cancellation: &Cancellation,
) -> Result<CreateAssignmentResponse, ApiError> {
    let section_id: SectionId = parse_section_id(request.section_id)?;
    let representative_id: RepresentativeId =
        parse_representative_id(request.representative_id)?;
    let role: Role = parse_role(&request.role)?;

    let mut engine: Engine<'_> = open_engine(persistence, cache);
    let outcome: AssignOutcome = engine
        .assign(section_id, representative_id, role, cancellation)
        .map_err(translate_core_error)?;

    let created: bool = outcome.is_created();
    if created {
        invalidate_touched(&mut engine, [section_id], representative_id)?;
    }

    let message: String = if created {
        format!("Representative {representative_id} assigned as {role} to section {section_id}")
    } else {
        format!("Representative {representative_id} already holds {role} in section {section_id}")
    };
    info!(%section_id, %representative_id, %role, created, "Assignment request handled");

    Ok(CreateAssignmentResponse {
        assignment: outcome.assignment().clone(),
        created,
        message,
    })
}

/// Removes an assignment, freeing its slot.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the assignment does not exist.
pub fn delete_assignment(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    assignment_id: i64,
    cancellation: &Cancellation,
) -> Result<DeleteAssignmentResponse, ApiError> {
    let assignment_id: AssignmentId = validate_identifier("assignment", assignment_id)
        .map(AssignmentId::new)
        .map_err(translate_domain_error)?;

    let mut engine: Engine<'_> = open_engine(persistence, cache);
    let removed: Assignment = engine
        .remove(assignment_id, cancellation)
        .map_err(translate_core_error)?;
    invalidate_touched(&mut engine, [removed.section_id], removed.representative_id)?;

    info!(%assignment_id, section_id = %removed.section_id, "Assignment removed");

    Ok(DeleteAssignmentResponse {
        message: format!(
            "Assignment {assignment_id} removed from section {}",
            removed.section_id
        ),
        assignment: removed,
    })
}

/// Assigns one representative to many sections.
///
/// The sections are committed as one selection: conflicts and unknown
/// sections are reported per item and never undo the items that succeeded.
/// The reload scope is resolved before anything is written, then
/// invalidated and returned. The scope of every section that received a new
/// assignment and the representative's declared scope are invalidated too.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty list or malformed identifiers, or
/// `ResourceNotFound` for an unknown representative or reload scope; nothing
/// is written in either case. Returns `PartialBatchFailure`, carrying the
/// full per-item response, if any item was not assigned, including items
/// reached after cancellation.
pub fn bulk_create_assignments(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    request: &BulkCreateAssignmentsRequest,
    cancellation: &Cancellation,
) -> Result<BulkCreateAssignmentsResponse, ApiError> {
    let representative_id: RepresentativeId =
        parse_representative_id(request.representative_id)?;
    let role: Role = parse_role(&request.role)?;
    let scope: Scope = request
        .scope
        .as_ref()
        .map_or_else(|| Ok(Scope::root()), parse_scope)?;
    let section_ids: Vec<SectionId> = request
        .section_ids
        .iter()
        .map(|&id| parse_section_id(id))
        .collect::<Result<_, _>>()?;

    let mut engine: Engine<'_> = open_engine(persistence, cache);
    let scope: Scope = engine.resolve_scope(&scope).map_err(translate_core_error)?;

    let mut selection: SelectionState = SelectionState::new(scope);
    selection.select(section_ids);

    let committed = BulkOrchestrator::new(&mut engine).commit(
        &mut selection,
        representative_id,
        role,
        cancellation,
    );
    let result: CommitResult = match committed {
        Ok(result) => result,
        Err(e) => {
            // Items may have been written before the failure.
            engine.invalidate_cache(Scope::root());
            return Err(translate_core_error(e));
        }
    };

    let created: Vec<SectionId> = result
        .report
        .items
        .iter()
        .filter(|item| matches!(item.status, BulkItemStatus::Assigned { .. }))
        .map(|item| item.section_id)
        .collect();
    if !created.is_empty() {
        invalidate_touched(&mut engine, created, representative_id)?;
    }

    let CommitResult { report, view } = result;
    match report.into_result() {
        Ok(report) => Ok(BulkCreateAssignmentsResponse::new(report, Some(view))),
        Err(CoreError::PartialBatchFailure(report)) => {
            warn!(
                %representative_id,
                %role,
                failed = report.failed().count(),
                "Bulk assignment partially failed"
            );
            Err(ApiError::PartialBatchFailure(Box::new(
                BulkCreateAssignmentsResponse::new(report, Some(view)),
            )))
        }
        Err(e) => Err(translate_core_error(e)),
    }
}

/// Marks the counters of a scope, its ancestors and its descendants stale.
///
/// # Errors
///
/// Returns an error if the scope is malformed.
pub fn invalidate_cache(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    request: &InvalidateCacheRequest,
) -> Result<InvalidateCacheResponse, ApiError> {
    let scope: Scope = parse_scope(&request.scope)?;
    open_engine(persistence, cache).invalidate_cache(scope);

    Ok(InvalidateCacheResponse {
        scope,
        message: String::from("Cached counters invalidated"),
    })
}

/// Matches a seat preference against the representative's declared
/// territory.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the representative does not exist.
pub fn analyze_preferences(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    request: &AnalyzePreferencesRequest,
) -> Result<AnalyzePreferencesResponse, ApiError> {
    let representative_id: RepresentativeId =
        parse_representative_id(request.representative_id)?;
    let matched: PreferenceMatch = open_engine(persistence, cache)
        .analyze_preferences(representative_id, request.preference_text.as_deref())
        .map_err(translate_core_error)?;

    Ok(AnalyzePreferencesResponse::new(
        representative_id.value(),
        matched,
    ))
}

/// Applies one navigation step from a path, skipping single-child levels.
///
/// # Errors
///
/// Returns an error if the path is malformed, a drill-down target is not
/// below the path, or a query fails.
pub fn navigate(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    request: &NavigateRequest,
    max_auto_skip: usize,
) -> Result<NavigateResponse, ApiError> {
    let path: Scope = parse_scope(&request.path)?;
    let mut navigator: Navigator = Navigator::at(path, max_auto_skip);
    let mut engine: Engine<'_> = open_engine(persistence, cache);

    let view: HierarchyView = navigator
        .apply(&mut engine, request.action)
        .map_err(translate_core_error)?
        .clone();

    debug!(from = ?path, to = ?navigator.state().path, "Navigation step");

    Ok(NavigateResponse {
        state: *navigator.state(),
        view: HierarchyResponse::from(view),
    })
}

/// Parses and stores reference data, then drops every cached counter.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed or inconsistent data, or
/// `DomainRuleViolation` if reference data is already loaded.
pub fn load_fixture(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    json: &str,
) -> Result<LoadFixtureResponse, ApiError> {
    let data: ReferenceData = ReferenceData::from_json(json).map_err(translate_persistence_error)?;
    persistence
        .seed_reference_data(&data)
        .map_err(translate_persistence_error)?;
    cache.clear();

    Ok(LoadFixtureResponse {
        regions: data.territory.regions.len(),
        provinces: data.territory.provinces.len(),
        municipalities: data.territory.municipalities.len(),
        sections: data.territory.sections.len(),
        representatives: data.representatives.len(),
    })
}
