// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use mappatura_domain::{Assignment, AssignmentId, RepresentativeId, Role, SectionId};
use tracing::debug;

use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

/// Diesel Queryable struct for assignment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = assignments)]
pub(crate) struct AssignmentRow {
    assignment_id: i64,
    section_id: i64,
    representative_id: i64,
    role: String,
}

impl AssignmentRow {
    pub(crate) fn into_assignment(self) -> Result<Assignment, PersistenceError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|e: mappatura_domain::DomainError| PersistenceError::InvalidData(e.to_string()))?;
        Ok(Assignment {
            id: AssignmentId::new(self.assignment_id),
            section_id: SectionId::new(self.section_id),
            representative_id: RepresentativeId::new(self.representative_id),
            role,
        })
    }
}

/// Lists every assignment in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored role is unknown.
pub fn list_assignments(conn: &mut SqliteConnection) -> Result<Vec<Assignment>, PersistenceError> {
    assignments::table
        .order(assignments::assignment_id.asc())
        .select(AssignmentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(AssignmentRow::into_assignment)
        .collect()
}

/// Retrieves an assignment by id.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the assignment is not found.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<Option<Assignment>, PersistenceError> {
    assignments::table
        .filter(assignments::assignment_id.eq(assignment_id.value()))
        .select(AssignmentRow::as_select())
        .first(conn)
        .optional()?
        .map(AssignmentRow::into_assignment)
        .transpose()
}

/// Returns the assignment occupying a slot, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_slot(
    conn: &mut SqliteConnection,
    section_id: SectionId,
    role: Role,
) -> Result<Option<Assignment>, PersistenceError> {
    debug!(%section_id, %role, "Looking up slot");

    assignments::table
        .filter(assignments::section_id.eq(section_id.value()))
        .filter(assignments::role.eq(role.as_str()))
        .select(AssignmentRow::as_select())
        .first(conn)
        .optional()?
        .map(AssignmentRow::into_assignment)
        .transpose()
}

/// Lists the assignments held by one representative.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assignments_for_representative(
    conn: &mut SqliteConnection,
    representative_id: RepresentativeId,
) -> Result<Vec<Assignment>, PersistenceError> {
    assignments::table
        .filter(assignments::representative_id.eq(representative_id.value()))
        .order(assignments::assignment_id.asc())
        .select(AssignmentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(AssignmentRow::into_assignment)
        .collect()
}
