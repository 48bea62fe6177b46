// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bulk::BulkReport;
use crate::cancel::Cancellation;
use crate::error::CoreError;
use crate::hierarchy::{BuildingView, HierarchyContent, HierarchyView};
use mappatura_domain::{PreferenceMatch, RepresentativeId, Role, Scope, SectionId};
use std::collections::BTreeSet;
use tracing::info;

/// Sections picked for a bulk assignment, bound to one scope and filter.
///
/// Changing the scope or the filter drops the selection, so a commit never
/// targets sections the operator can no longer see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    scope: Scope,
    filter: String,
    selected: BTreeSet<SectionId>,
}

impl SelectionState {
    /// Creates an empty selection for a scope.
    #[must_use]
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Returns the scope the selection belongs to.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Returns the active filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Returns the selected sections in ascending id order.
    #[must_use]
    pub fn selected(&self) -> Vec<SectionId> {
        self.selected.iter().copied().collect()
    }

    /// Returns true if the section is selected.
    #[must_use]
    pub fn is_selected(&self, section_id: SectionId) -> bool {
        self.selected.contains(&section_id)
    }

    /// Returns the number of selected sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flips one section; returns whether it is now selected.
    pub fn toggle(&mut self, section_id: SectionId) -> bool {
        if self.selected.remove(&section_id) {
            return false;
        }
        self.selected.insert(section_id);
        true
    }

    /// Adds sections to the selection.
    pub fn select<I: IntoIterator<Item = SectionId>>(&mut self, section_ids: I) {
        self.selected.extend(section_ids);
    }

    /// Selects every section of a building.
    pub fn select_building(&mut self, building: &BuildingView) {
        self.select(building.sections.iter().map(|row| row.section.id));
    }

    /// Selects every section the view lists.
    pub fn select_all(&mut self, view: &HierarchyView) {
        if let HierarchyContent::Sections { buildings } = &view.content {
            for building in buildings {
                self.select_building(building);
            }
        }
    }

    /// Pre-selects the selectable sections of a preference match.
    ///
    /// Sections that are full or already held by the representative stay
    /// deselected.
    pub fn select_preferences(&mut self, matched: &PreferenceMatch) {
        self.select(matched.selectable().map(|entry| entry.section_id));
    }

    /// Drops every selected section.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Moves to another scope, dropping the selection if it changed.
    pub fn set_scope(&mut self, scope: Scope) {
        if self.scope != scope {
            self.scope = scope;
            self.clear();
        }
    }

    /// Sets the filter text, dropping the selection if it changed.
    pub fn set_filter(&mut self, filter: &str) {
        if self.filter != filter {
            filter.clone_into(&mut self.filter);
            self.clear();
        }
    }
}

/// Operations a bulk commit needs from the engine.
pub trait AssignmentGateway {
    /// Assigns a representative to many sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch as a whole cannot run.
    fn bulk_assign(
        &mut self,
        representative_id: RepresentativeId,
        section_ids: &[SectionId],
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<BulkReport, CoreError>;

    /// Marks aggregates related to `scope` as stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal cannot be delivered.
    fn invalidate_cache(&mut self, scope: &Scope) -> Result<(), CoreError>;

    /// Re-reads the view of `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scope cannot be queried.
    fn reload(&mut self, scope: &Scope) -> Result<HierarchyView, CoreError>;
}

impl<G: AssignmentGateway + ?Sized> AssignmentGateway for &mut G {
    fn bulk_assign(
        &mut self,
        representative_id: RepresentativeId,
        section_ids: &[SectionId],
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<BulkReport, CoreError> {
        (**self).bulk_assign(representative_id, section_ids, role, cancellation)
    }

    fn invalidate_cache(&mut self, scope: &Scope) -> Result<(), CoreError> {
        (**self).invalidate_cache(scope)
    }

    fn reload(&mut self, scope: &Scope) -> Result<HierarchyView, CoreError> {
        (**self).reload(scope)
    }
}

/// Result of committing a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    /// Per-section outcomes.
    pub report: BulkReport,
    /// The scope's view after invalidation.
    pub view: HierarchyView,
}

/// Applies a selection through a gateway.
pub struct BulkOrchestrator<G> {
    gateway: G,
}

impl<G: AssignmentGateway> BulkOrchestrator<G> {
    /// Creates an orchestrator over a gateway.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Returns the gateway.
    pub const fn gateway(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Assigns the representative to every selected section in one bulk
    /// call, then clears the selection, invalidates the scope and reloads it.
    ///
    /// Partial failures are reported in the result, not as an error. The
    /// selection is kept if the bulk call itself fails.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty selection, or any error the
    /// gateway returns.
    pub fn commit(
        &mut self,
        selection: &mut SelectionState,
        representative_id: RepresentativeId,
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<CommitResult, CoreError> {
        if selection.is_empty() {
            return Err(CoreError::validation("section_ids", "bulk selection is empty"));
        }
        let scope: Scope = *selection.scope();
        let report: BulkReport = self.gateway.bulk_assign(
            representative_id,
            &selection.selected(),
            role,
            cancellation,
        )?;
        selection.clear();
        self.gateway.invalidate_cache(&scope)?;
        let view: HierarchyView = self.gateway.reload(&scope)?;

        info!(
            %representative_id,
            %role,
            created = report.created_count(),
            failed = report.failed().count(),
            "Committed selection"
        );
        Ok(CommitResult { report, view })
    }
}
