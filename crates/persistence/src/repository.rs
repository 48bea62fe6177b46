// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mappatura::{CoreError, MappingRepository};
use mappatura_domain::{
    Assignment, AssignmentId, Representative, RepresentativeId, Role, SectionId, Territory,
};

use crate::Persistence;
use crate::error::PersistenceError;

/// Translates a storage error into the core vocabulary.
///
/// `SlotOccupied` is completed with the winning occupant, looked up on the
/// same connection.
fn translate(persistence: &mut Persistence, err: PersistenceError) -> CoreError {
    match err {
        PersistenceError::SlotOccupied { section_id, role } => {
            match persistence.find_slot(section_id, role) {
                Ok(Some(occupant)) => CoreError::SlotOccupied {
                    section_id,
                    role,
                    occupant: occupant.representative_id,
                },
                Ok(None) => CoreError::Repository(format!(
                    "slot {role} of section {section_id} was reported occupied but is empty"
                )),
                Err(e) => CoreError::Repository(e.to_string()),
            }
        }
        PersistenceError::NotFound { resource, id } => CoreError::NotFound { resource, id },
        other => CoreError::Repository(other.to_string()),
    }
}

fn repository_error(err: PersistenceError) -> CoreError {
    match err {
        PersistenceError::NotFound { resource, id } => CoreError::NotFound { resource, id },
        other => CoreError::Repository(other.to_string()),
    }
}

impl MappingRepository for Persistence {
    fn load_territory(&mut self) -> Result<Territory, CoreError> {
        Self::load_territory(self)
            .map(Territory::new)
            .map_err(repository_error)
    }

    fn list_representatives(&mut self) -> Result<Vec<Representative>, CoreError> {
        Self::list_representatives(self).map_err(repository_error)
    }

    fn get_representative(
        &mut self,
        id: RepresentativeId,
    ) -> Result<Option<Representative>, CoreError> {
        Self::get_representative(self, id).map_err(repository_error)
    }

    fn list_assignments(&mut self) -> Result<Vec<Assignment>, CoreError> {
        Self::list_assignments(self).map_err(repository_error)
    }

    fn get_assignment(&mut self, id: AssignmentId) -> Result<Option<Assignment>, CoreError> {
        Self::get_assignment(self, id).map_err(repository_error)
    }

    fn find_slot(
        &mut self,
        section_id: SectionId,
        role: Role,
    ) -> Result<Option<Assignment>, CoreError> {
        Self::find_slot(self, section_id, role).map_err(repository_error)
    }

    fn section_exists(&mut self, section_id: SectionId) -> Result<bool, CoreError> {
        Self::section_exists(self, section_id).map_err(repository_error)
    }

    fn insert_assignment(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
    ) -> Result<Assignment, CoreError> {
        match Self::insert_assignment(self, section_id, representative_id, role) {
            Ok(assignment) => Ok(assignment),
            Err(e) => Err(translate(self, e)),
        }
    }

    fn delete_assignment(&mut self, id: AssignmentId) -> Result<Assignment, CoreError> {
        Self::delete_assignment(self, id).map_err(repository_error)
    }
}
