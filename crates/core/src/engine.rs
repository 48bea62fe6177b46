// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bulk::BulkReport;
use crate::cache::AggregateCache;
use crate::cancel::Cancellation;
use crate::command::{AssignOutcome, Command, CommandOutcome};
use crate::error::{CoreError, scope_error};
use crate::events::StoreListener;
use crate::hierarchy::{HierarchyIndex, HierarchyView, MappingSnapshot};
use crate::navigator::HierarchySource;
use crate::repository::MappingRepository;
use crate::selection::AssignmentGateway;
use crate::store::AssignmentStore;
use mappatura_domain::{
    Assignment, AssignmentId, PreferenceMatch, Representative, RepresentativeId, Role, Scope,
    ParsedPreference, Section, SectionId, Territory, match_preferences, read_preference,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// An assignment as shown next to its holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldAssignment {
    /// The assignment.
    pub assignment_id: AssignmentId,
    /// The section.
    pub section_id: SectionId,
    /// The section number.
    pub section_number: u32,
    /// The polling building.
    pub building_name: String,
    /// The slot held.
    pub role: Role,
}

/// A representative with what they currently hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeSummary {
    /// The representative.
    pub representative: Representative,
    /// Number of slots held, primary and alternate.
    pub sections_held: usize,
    /// The held slots.
    pub assignments: Vec<HeldAssignment>,
}

/// Ties the store, the hierarchy index and the aggregate cache together.
///
/// The cache is shared: several short-lived engines, one per request, may
/// serve the same cache.
pub struct MappingEngine<R> {
    store: AssignmentStore<R>,
    cache: Arc<AggregateCache>,
}

impl<R: MappingRepository> MappingEngine<R> {
    /// Creates an engine and subscribes the cache to store events.
    #[must_use]
    pub fn new(repository: R, cache: Arc<AggregateCache>) -> Self {
        let mut store: AssignmentStore<R> = AssignmentStore::new(repository);
        let listener: Arc<dyn StoreListener> = Arc::clone(&cache) as Arc<dyn StoreListener>;
        store.subscribe(listener);
        Self { store, cache }
    }

    /// Returns the aggregate cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<AggregateCache> {
        &self.cache
    }

    /// Returns the store.
    pub const fn store(&mut self) -> &mut AssignmentStore<R> {
        &mut self.store
    }

    /// Reads everything a query needs.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn snapshot(&mut self) -> Result<MappingSnapshot, CoreError> {
        MappingSnapshot::load(self.store.repository())
    }

    /// Returns the next level of `scope`, or its sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the scope does not resolve or storage fails.
    pub fn query_hierarchy(&mut self, scope: &Scope) -> Result<HierarchyView, CoreError> {
        let snapshot: MappingSnapshot = self.snapshot()?;
        HierarchyIndex::new(&snapshot, &self.cache).query(scope)
    }

    /// Lists representatives declared within `scope`, optionally filtered
    /// by name or email.
    ///
    /// A representative who declared only a municipality is listed under
    /// each of its districts.
    ///
    /// # Errors
    ///
    /// Returns an error if the scope does not resolve or storage fails.
    pub fn search_representatives(
        &mut self,
        scope: &Scope,
        filter: Option<&str>,
    ) -> Result<Vec<RepresentativeSummary>, CoreError> {
        let snapshot: MappingSnapshot = self.snapshot()?;
        let territory: &Territory = &snapshot.territory;
        let resolved: Scope = territory.resolve_scope(scope).map_err(scope_error)?;
        let needle: Option<&str> = filter.map(str::trim).filter(|f| !f.is_empty());

        let mut found: Vec<RepresentativeSummary> = snapshot
            .representatives
            .iter()
            .filter(|r| declared_within(territory, r, &resolved))
            .filter(|r| needle.is_none_or(|n| r.matches_text(n)))
            .map(|r| summarize(&snapshot, r))
            .collect();
        found.sort_by(|a, b| {
            (a.representative.full_name.to_lowercase(), a.representative.id)
                .cmp(&(b.representative.full_name.to_lowercase(), b.representative.id))
        });

        debug!(?resolved, results = found.len(), "Representative search");
        Ok(found)
    }

    /// Parses a preference and matches it against the sections of the
    /// representative's declared municipality or district.
    ///
    /// Without `text` the representative's stored preference is used.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the representative does not exist.
    pub fn analyze_preferences(
        &mut self,
        representative_id: RepresentativeId,
        text: Option<&str>,
    ) -> Result<PreferenceMatch, CoreError> {
        let snapshot: MappingSnapshot = self.snapshot()?;
        let representative: &Representative = snapshot
            .representative(representative_id)
            .ok_or(CoreError::NotFound {
                resource: "Representative",
                id: representative_id.value(),
            })?;

        let parsed: ParsedPreference = read_preference(text.unwrap_or(&representative.preference));
        let mut scope: Scope = Scope::for_municipality(representative.municipality_id);
        scope.district = representative.district;

        let sections = snapshot
            .territory
            .sections_in(&scope)
            .filter(|s: &&Section| s.is_active);
        let matched: PreferenceMatch =
            match_preferences(parsed, sections, snapshot.slots(), representative_id);

        debug!(
            %representative_id,
            requested = matched.requested.len(),
            matched = matched.entries.len(),
            unmatched = matched.unmatched.len(),
            oversized = matched.oversized_ranges.len(),
            "Analyzed preferences"
        );
        Ok(matched)
    }

    /// See [`AssignmentStore::assign`].
    ///
    /// # Errors
    ///
    /// Returns any error of the store.
    pub fn assign(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<AssignOutcome, CoreError> {
        self.store
            .assign(section_id, representative_id, role, cancellation)
    }

    /// See [`AssignmentStore::remove`].
    ///
    /// # Errors
    ///
    /// Returns any error of the store.
    pub fn remove(
        &mut self,
        assignment_id: AssignmentId,
        cancellation: &Cancellation,
    ) -> Result<Assignment, CoreError> {
        self.store.remove(assignment_id, cancellation)
    }

    /// See [`AssignmentStore::bulk_assign`].
    ///
    /// # Errors
    ///
    /// Returns any error of the store.
    pub fn bulk_assign(
        &mut self,
        representative_id: RepresentativeId,
        section_ids: &[SectionId],
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<BulkReport, CoreError> {
        self.store
            .bulk_assign(representative_id, section_ids, role, cancellation)
    }

    /// Invalidates aggregates related to `scope`.
    pub fn invalidate_cache(&self, scope: Scope) {
        self.store.invalidate_cache(scope);
    }

    /// Returns the scope whose aggregates a change to `section_id` affects:
    /// the section's municipality and district.
    ///
    /// Invalidating it also drops every ancestor, since related scopes are
    /// evicted together.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the section does not exist.
    pub fn scope_of_section(&mut self, section_id: SectionId) -> Result<Scope, CoreError> {
        let territory: Territory = self.store.repository().load_territory()?;
        let section: &Section = territory.section(section_id).ok_or(CoreError::NotFound {
            resource: "Section",
            id: section_id.value(),
        })?;
        let mut scope: Scope = Scope::for_municipality(section.municipality_id);
        scope.district = section.district;
        territory.resolve_scope(&scope).map_err(scope_error)
    }

    /// Returns the scope a representative declared: their municipality and,
    /// if given, district.
    ///
    /// Assigning or releasing a representative changes the
    /// available-representative count of this scope, which may lie outside
    /// the section's own.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the representative does not exist.
    pub fn scope_of_representative(
        &mut self,
        representative_id: RepresentativeId,
    ) -> Result<Scope, CoreError> {
        let representative: Representative = self
            .store
            .repository()
            .get_representative(representative_id)?
            .ok_or(CoreError::NotFound {
                resource: "Representative",
                id: representative_id.value(),
            })?;
        let mut scope: Scope = Scope::for_municipality(representative.municipality_id);
        scope.district = representative.district;
        self.resolve_scope(&scope)
    }

    /// Completes a partial scope against the current territory.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for unknown identifiers and
    /// `CoreError::Validation` for an inconsistent scope.
    pub fn resolve_scope(&mut self, scope: &Scope) -> Result<Scope, CoreError> {
        let territory: Territory = self.store.repository().load_territory()?;
        territory.resolve_scope(scope).map_err(scope_error)
    }

    /// Executes a command through the store.
    ///
    /// # Errors
    ///
    /// Returns any error of the store.
    pub fn execute(
        &mut self,
        command: Command,
        cancellation: &Cancellation,
    ) -> Result<CommandOutcome, CoreError> {
        self.store.execute(command, cancellation)
    }
}

impl<R: MappingRepository> HierarchySource for MappingEngine<R> {
    fn query(&mut self, scope: &Scope) -> Result<HierarchyView, CoreError> {
        self.query_hierarchy(scope)
    }
}

impl<R: MappingRepository> AssignmentGateway for MappingEngine<R> {
    fn bulk_assign(
        &mut self,
        representative_id: RepresentativeId,
        section_ids: &[SectionId],
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<BulkReport, CoreError> {
        Self::bulk_assign(self, representative_id, section_ids, role, cancellation)
    }

    fn invalidate_cache(&mut self, scope: &Scope) -> Result<(), CoreError> {
        Self::invalidate_cache(self, *scope);
        Ok(())
    }

    fn reload(&mut self, scope: &Scope) -> Result<HierarchyView, CoreError> {
        self.query_hierarchy(scope)
    }
}

fn declared_within(territory: &Territory, representative: &Representative, scope: &Scope) -> bool {
    if scope.district.is_some() && representative.district.is_none() {
        let municipality_scope = Scope {
            district: None,
            ..*scope
        };
        return territory.place_in_scope(representative.municipality_id, None, &municipality_scope);
    }
    territory.place_in_scope(representative.municipality_id, representative.district, scope)
}

fn summarize(snapshot: &MappingSnapshot, representative: &Representative) -> RepresentativeSummary {
    let held: &[Assignment] = snapshot.slots().held_by(representative.id);
    let assignments: Vec<HeldAssignment> = held
        .iter()
        .filter_map(|assignment| {
            let section = snapshot.territory.section(assignment.section_id)?;
            Some(HeldAssignment {
                assignment_id: assignment.id,
                section_id: section.id,
                section_number: section.number,
                building_name: section.building_name.clone(),
                role: assignment.role,
            })
        })
        .collect();
    RepresentativeSummary {
        representative: representative.clone(),
        sections_held: held.len(),
        assignments,
    }
}
