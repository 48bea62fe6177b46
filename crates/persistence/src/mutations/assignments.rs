// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment mutations.
//!
//! The `UNIQUE (section_id, role)` index is the source of truth for slot
//! exclusivity. A writer that loses a race observes `SlotOccupied`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mappatura_domain::{Assignment, AssignmentId, RepresentativeId, Role, SectionId};
use tracing::info;

use crate::diesel_schema::assignments;
use crate::error::PersistenceError;
use crate::queries::assignments::get_assignment;
use crate::sqlite;

/// Inserts an assignment into an empty slot.
///
/// # Errors
///
/// Returns `SlotOccupied` if the slot already holds an assignment, a
/// `ForeignKeyViolation` if the section or representative does not exist, or
/// a database error.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    section_id: SectionId,
    representative_id: RepresentativeId,
    role: Role,
) -> Result<Assignment, PersistenceError> {
    let inserted = diesel::insert_into(assignments::table)
        .values((
            assignments::section_id.eq(section_id.value()),
            assignments::representative_id.eq(representative_id.value()),
            assignments::role.eq(role.as_str()),
        ))
        .execute(conn);

    match inserted {
        Ok(_) => {}
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::SlotOccupied { section_id, role });
        }
        Err(e) => return Err(e.into()),
    }

    let assignment_id: i64 = sqlite::last_insert_rowid(conn)?;

    info!(
        assignment_id,
        %section_id,
        %representative_id,
        %role,
        "Assignment inserted"
    );

    Ok(Assignment {
        id: AssignmentId::new(assignment_id),
        section_id,
        representative_id,
        role,
    })
}

/// Deletes an assignment and returns what was removed.
///
/// # Errors
///
/// Returns `NotFound` if no assignment has this id.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<Assignment, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let assignment: Assignment =
            get_assignment(conn, assignment_id)?.ok_or(PersistenceError::NotFound {
                resource: "Assignment",
                id: assignment_id.value(),
            })?;

        diesel::delete(assignments::table)
            .filter(assignments::assignment_id.eq(assignment_id.value()))
            .execute(conn)?;

        info!(%assignment_id, section_id = %assignment.section_id, "Assignment deleted");

        Ok(assignment)
    })
}
