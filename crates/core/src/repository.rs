// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use mappatura_domain::{
    Assignment, AssignmentId, Representative, RepresentativeId, Role, SectionId, Territory,
};
use std::collections::BTreeMap;

/// Storage seam for reference data and assignments.
///
/// Implementations must reject a second assignment for the same
/// `(section, role)` slot with `CoreError::SlotOccupied` even when two
/// writers race past the store's own occupancy check.
pub trait MappingRepository {
    /// Loads the full territorial hierarchy including sections.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn load_territory(&mut self) -> Result<Territory, CoreError>;

    /// Lists every representative.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn list_representatives(&mut self) -> Result<Vec<Representative>, CoreError>;

    /// Looks up one representative.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn get_representative(
        &mut self,
        id: RepresentativeId,
    ) -> Result<Option<Representative>, CoreError>;

    /// Lists every assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn list_assignments(&mut self) -> Result<Vec<Assignment>, CoreError>;

    /// Looks up one assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn get_assignment(&mut self, id: AssignmentId) -> Result<Option<Assignment>, CoreError>;

    /// Returns the current occupant of a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn find_slot(
        &mut self,
        section_id: SectionId,
        role: Role,
    ) -> Result<Option<Assignment>, CoreError>;

    /// Returns true if the section exists.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn section_exists(&mut self, section_id: SectionId) -> Result<bool, CoreError>;

    /// Writes a new assignment.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SlotOccupied` if the slot is already taken, or an
    /// error if storage cannot be written.
    fn insert_assignment(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
    ) -> Result<Assignment, CoreError>;

    /// Deletes an assignment and returns it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the assignment does not exist.
    fn delete_assignment(&mut self, id: AssignmentId) -> Result<Assignment, CoreError>;
}

impl<R: MappingRepository + ?Sized> MappingRepository for &mut R {
    fn load_territory(&mut self) -> Result<Territory, CoreError> {
        (**self).load_territory()
    }

    fn list_representatives(&mut self) -> Result<Vec<Representative>, CoreError> {
        (**self).list_representatives()
    }

    fn get_representative(
        &mut self,
        id: RepresentativeId,
    ) -> Result<Option<Representative>, CoreError> {
        (**self).get_representative(id)
    }

    fn list_assignments(&mut self) -> Result<Vec<Assignment>, CoreError> {
        (**self).list_assignments()
    }

    fn get_assignment(&mut self, id: AssignmentId) -> Result<Option<Assignment>, CoreError> {
        (**self).get_assignment(id)
    }

    fn find_slot(
        &mut self,
        section_id: SectionId,
        role: Role,
    ) -> Result<Option<Assignment>, CoreError> {
        (**self).find_slot(section_id, role)
    }

    fn section_exists(&mut self, section_id: SectionId) -> Result<bool, CoreError> {
        (**self).section_exists(section_id)
    }

    fn insert_assignment(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
    ) -> Result<Assignment, CoreError> {
        (**self).insert_assignment(section_id, representative_id, role)
    }

    fn delete_assignment(&mut self, id: AssignmentId) -> Result<Assignment, CoreError> {
        (**self).delete_assignment(id)
    }
}

/// In-memory repository.
///
/// Identifiers are allocated sequentially starting at 1 and never reused.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    territory: Territory,
    representatives: Vec<Representative>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    next_id: i64,
}

impl MemoryRepository {
    /// Creates a repository with no assignments.
    #[must_use]
    pub const fn new(territory: Territory, representatives: Vec<Representative>) -> Self {
        Self {
            territory,
            representatives,
            assignments: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MappingRepository for MemoryRepository {
    fn load_territory(&mut self) -> Result<Territory, CoreError> {
        Ok(self.territory.clone())
    }

    fn list_representatives(&mut self) -> Result<Vec<Representative>, CoreError> {
        Ok(self.representatives.clone())
    }

    fn get_representative(
        &mut self,
        id: RepresentativeId,
    ) -> Result<Option<Representative>, CoreError> {
        Ok(self.representatives.iter().find(|r| r.id == id).cloned())
    }

    fn list_assignments(&mut self) -> Result<Vec<Assignment>, CoreError> {
        Ok(self.assignments.values().cloned().collect())
    }

    fn get_assignment(&mut self, id: AssignmentId) -> Result<Option<Assignment>, CoreError> {
        Ok(self.assignments.get(&id).cloned())
    }

    fn find_slot(
        &mut self,
        section_id: SectionId,
        role: Role,
    ) -> Result<Option<Assignment>, CoreError> {
        Ok(self
            .assignments
            .values()
            .find(|a| a.section_id == section_id && a.role == role)
            .cloned())
    }

    fn section_exists(&mut self, section_id: SectionId) -> Result<bool, CoreError> {
        Ok(self.territory.section(section_id).is_some())
    }

    fn insert_assignment(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
    ) -> Result<Assignment, CoreError> {
        if let Some(existing) = self.find_slot(section_id, role)? {
            return Err(CoreError::SlotOccupied {
                section_id,
                role,
                occupant: existing.representative_id,
            });
        }
        let assignment = Assignment {
            id: AssignmentId::new(self.next_id),
            section_id,
            representative_id,
            role,
        };
        self.next_id += 1;
        self.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    fn delete_assignment(&mut self, id: AssignmentId) -> Result<Assignment, CoreError> {
        self.assignments.remove(&id).ok_or(CoreError::NotFound {
            resource: "Assignment",
            id: id.value(),
        })
    }
}
