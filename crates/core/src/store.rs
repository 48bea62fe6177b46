// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bulk::{BulkItemStatus, BulkReport};
use crate::cancel::Cancellation;
use crate::command::{AssignOutcome, Command, CommandOutcome};
use crate::error::CoreError;
use crate::events::{StoreEvent, StoreListener};
use crate::repository::MappingRepository;
use mappatura_domain::{
    Assignment, AssignmentId, RepresentativeId, Role, Scope, SectionId, validate_identifier,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The authoritative mapping of `(section, role)` to representative.
///
/// Every write is checked against the current slot occupant and then handed
/// to the repository, whose uniqueness constraint settles races. Listeners
/// are notified synchronously before a write returns. Writes never
/// invalidate aggregates on their own; callers issue
/// [`AssignmentStore::invalidate_cache`] once they are done.
pub struct AssignmentStore<R> {
    repository: R,
    listeners: Vec<Arc<dyn StoreListener>>,
}

impl<R: MappingRepository> AssignmentStore<R> {
    /// Creates a store over a repository with no listeners.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self {
            repository,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for store events.
    pub fn subscribe(&mut self, listener: Arc<dyn StoreListener>) {
        self.listeners.push(listener);
    }

    /// Returns the underlying repository.
    pub const fn repository(&mut self) -> &mut R {
        &mut self.repository
    }

    /// Consumes the store and returns the repository.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.repository
    }

    fn emit(&self, event: &StoreEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }

    /// Puts a representative in one slot of one section.
    ///
    /// Assigning a representative to a slot they already hold succeeds
    /// without writing, so retries are safe.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - cancellation was requested
    /// - an identifier is not positive
    /// - the section or representative does not exist
    /// - the slot is held by a different representative
    pub fn assign(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<AssignOutcome, CoreError> {
        if cancellation.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        check_identifier("representative_id", representative_id.value())?;
        self.require_representative(representative_id)?;
        self.assign_slot(section_id, representative_id, role)
    }

    /// Deletes an assignment, returning the slot to empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the assignment does not exist, or
    /// `CoreError::Cancelled` if cancellation was requested.
    pub fn remove(
        &mut self,
        assignment_id: AssignmentId,
        cancellation: &Cancellation,
    ) -> Result<Assignment, CoreError> {
        if cancellation.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        check_identifier("assignment_id", assignment_id.value())?;

        let removed: Assignment = self.repository.delete_assignment(assignment_id)?;
        info!(
            assignment_id = %removed.id,
            section_id = %removed.section_id,
            representative_id = %removed.representative_id,
            role = %removed.role,
            "Removed assignment"
        );
        self.emit(&StoreEvent::Removed(removed.clone()));
        Ok(removed)
    }

    /// Assigns one representative to many sections, one independent write
    /// per section.
    ///
    /// Duplicate section identifiers are collapsed, keeping the first
    /// occurrence. Per-section `SlotOccupied` and `NotFound` outcomes are
    /// recorded in the report; nothing is rolled back. Items not yet written
    /// when cancellation is requested are reported as cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error before anything is written if the selection is
    /// empty, any identifier is not positive, or the representative does
    /// not exist. Returns an error mid-batch if the repository fails for a
    /// reason other than an occupied slot or a missing section.
    pub fn bulk_assign(
        &mut self,
        representative_id: RepresentativeId,
        section_ids: &[SectionId],
        role: Role,
        cancellation: &Cancellation,
    ) -> Result<BulkReport, CoreError> {
        if section_ids.is_empty() {
            return Err(CoreError::validation("section_ids", "bulk selection is empty"));
        }
        check_identifier("representative_id", representative_id.value())?;
        for section_id in section_ids {
            check_identifier("section_id", section_id.value())?;
        }
        self.require_representative(representative_id)?;

        let mut seen: HashSet<SectionId> = HashSet::new();
        let mut report: BulkReport = BulkReport::new(representative_id, role);

        for section_id in section_ids.iter().copied().filter(|id| seen.insert(*id)) {
            if cancellation.is_cancelled() {
                report.push(section_id, BulkItemStatus::Cancelled);
                continue;
            }
            let status: BulkItemStatus =
                match self.assign_slot(section_id, representative_id, role) {
                    Ok(AssignOutcome::Created(assignment)) => BulkItemStatus::Assigned {
                        assignment_id: assignment.id,
                    },
                    Ok(AssignOutcome::Unchanged(assignment)) => BulkItemStatus::AlreadyAssigned {
                        assignment_id: assignment.id,
                    },
                    Err(CoreError::SlotOccupied { occupant, .. }) => {
                        warn!(%section_id, %occupant, %role, "Bulk item skipped: slot occupied");
                        BulkItemStatus::SlotOccupied { occupant }
                    }
                    Err(CoreError::NotFound { .. }) => {
                        warn!(%section_id, "Bulk item skipped: section not found");
                        BulkItemStatus::NotFound
                    }
                    Err(e) => return Err(e),
                };
            report.push(section_id, status);
        }

        info!(
            %representative_id,
            %role,
            requested = report.items.len(),
            created = report.created_count(),
            failed = report.failed().count(),
            "Bulk assignment finished"
        );
        Ok(report)
    }

    /// Tells listeners that aggregates related to `scope` are stale.
    pub fn invalidate_cache(&self, scope: Scope) {
        debug!(?scope, "Invalidating aggregates");
        self.emit(&StoreEvent::CacheInvalidated(scope));
    }

    /// Executes a command.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying operation returns.
    pub fn execute(
        &mut self,
        command: Command,
        cancellation: &Cancellation,
    ) -> Result<CommandOutcome, CoreError> {
        debug!(command = command.name(), "Executing command");
        match command {
            Command::Assign {
                section_id,
                representative_id,
                role,
            } => self
                .assign(section_id, representative_id, role, cancellation)
                .map(CommandOutcome::Assigned),
            Command::Remove { assignment_id } => self
                .remove(assignment_id, cancellation)
                .map(CommandOutcome::Removed),
            Command::BulkAssign {
                representative_id,
                section_ids,
                role,
            } => self
                .bulk_assign(representative_id, &section_ids, role, cancellation)
                .map(CommandOutcome::Bulk),
            Command::InvalidateCache { scope } => {
                self.invalidate_cache(scope);
                Ok(CommandOutcome::Invalidated(scope))
            }
        }
    }

    fn require_representative(&mut self, id: RepresentativeId) -> Result<(), CoreError> {
        if self.repository.get_representative(id)?.is_none() {
            return Err(CoreError::NotFound {
                resource: "Representative",
                id: id.value(),
            });
        }
        Ok(())
    }

    fn assign_slot(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
    ) -> Result<AssignOutcome, CoreError> {
        check_identifier("section_id", section_id.value())?;
        if !self.repository.section_exists(section_id)? {
            return Err(CoreError::NotFound {
                resource: "Section",
                id: section_id.value(),
            });
        }

        if let Some(existing) = self.repository.find_slot(section_id, role)? {
            return held_or_occupied(existing, representative_id);
        }

        match self
            .repository
            .insert_assignment(section_id, representative_id, role)
        {
            Ok(assignment) => {
                info!(
                    assignment_id = %assignment.id,
                    %section_id,
                    %representative_id,
                    %role,
                    "Created assignment"
                );
                self.emit(&StoreEvent::Assigned(assignment.clone()));
                Ok(AssignOutcome::Created(assignment))
            }
            Err(CoreError::SlotOccupied { .. }) => {
                // Lost a race; report whoever won.
                match self.repository.find_slot(section_id, role)? {
                    Some(existing) => held_or_occupied(existing, representative_id),
                    None => Err(CoreError::Repository(format!(
                        "slot {role} of section {section_id} reported occupied but is empty"
                    ))),
                }
            }
            Err(e) => Err(e),
        }
    }
}

fn held_or_occupied(
    existing: Assignment,
    representative_id: RepresentativeId,
) -> Result<AssignOutcome, CoreError> {
    if existing.representative_id == representative_id {
        return Ok(AssignOutcome::Unchanged(existing));
    }
    Err(CoreError::SlotOccupied {
        section_id: existing.section_id,
        role: existing.role,
        occupant: existing.representative_id,
    })
}

fn check_identifier(field: &'static str, value: i64) -> Result<(), CoreError> {
    validate_identifier(field, value)
        .map(|_| ())
        .map_err(|e| CoreError::validation(field, e.to_string()))
}
