// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for section mapping.
//!
//! Reference data (regions, provinces, municipalities, districts, sections,
//! representatives) and assignments are stored in `SQLite` through Diesel.
//! Migrations are embedded and run on every open. Foreign keys are enforced
//! and verified at startup.
//!
//! ## Slot exclusivity
//!
//! The `assignments` table carries `UNIQUE (section_id, role)`. Two writers
//! racing for the same slot cannot both succeed; the loser receives
//! [`PersistenceError::SlotOccupied`], which the [`mappatura::MappingRepository`]
//! implementation turns into `CoreError::SlotOccupied` with the winner filled in.
//!
//! ## Testing
//!
//! Tests use uniquely named shared-cache in-memory databases, one per
//! [`Persistence::new_in_memory`] call.

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

use diesel::SqliteConnection;
use mappatura_domain::{
    Assignment, AssignmentId, Representative, RepresentativeId, Role, SectionId, TerritoryData,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod repository;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::ReferenceData;
pub use error::PersistenceError;

use sqlite::Journal;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::open(&shared_memory_url, Journal::Rollback)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = sqlite::open(path_str, Journal::WriteAhead)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        if sqlite::foreign_keys_enabled(&mut self.conn)? {
            Ok(())
        } else {
            Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
        }
    }

    // ========================================================================
    // Reference data
    // ========================================================================

    /// Returns true if reference data has been loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_seeded(&mut self) -> Result<bool, PersistenceError> {
        Ok(queries::territory::count_regions(&mut self.conn)? > 0)
    }

    /// Validates and stores reference data in an empty database.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySeeded` if data is present, `InvalidReferenceData` if
    /// validation fails, or a database error. Nothing is written on error.
    pub fn seed_reference_data(&mut self, data: &ReferenceData) -> Result<(), PersistenceError> {
        mutations::reference::seed_reference_data(&mut self.conn, data)
    }

    /// Loads every territorial table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_territory(&mut self) -> Result<TerritoryData, PersistenceError> {
        queries::territory::load_territory(&mut self.conn)
    }

    /// Returns true if a section exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn section_exists(&mut self, section_id: SectionId) -> Result<bool, PersistenceError> {
        queries::territory::section_exists(&mut self.conn, section_id)
    }

    /// Lists every representative.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_representatives(&mut self) -> Result<Vec<Representative>, PersistenceError> {
        queries::representatives::list_representatives(&mut self.conn)
    }

    /// Retrieves a representative.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_representative(
        &mut self,
        representative_id: RepresentativeId,
    ) -> Result<Option<Representative>, PersistenceError> {
        queries::representatives::get_representative(&mut self.conn, representative_id)
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    /// Lists every assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments(&mut self) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_assignments(&mut self.conn)
    }

    /// Lists the assignments held by a representative.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments_for_representative(
        &mut self,
        representative_id: RepresentativeId,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_assignments_for_representative(&mut self.conn, representative_id)
    }

    /// Retrieves an assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_assignment(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<Option<Assignment>, PersistenceError> {
        queries::assignments::get_assignment(&mut self.conn, assignment_id)
    }

    /// Returns the occupant of a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_slot(
        &mut self,
        section_id: SectionId,
        role: Role,
    ) -> Result<Option<Assignment>, PersistenceError> {
        queries::assignments::find_slot(&mut self.conn, section_id, role)
    }

    /// Inserts an assignment into an empty slot.
    ///
    /// # Errors
    ///
    /// Returns `SlotOccupied` if the slot is taken.
    pub fn insert_assignment(
        &mut self,
        section_id: SectionId,
        representative_id: RepresentativeId,
        role: Role,
    ) -> Result<Assignment, PersistenceError> {
        mutations::assignments::insert_assignment(
            &mut self.conn,
            section_id,
            representative_id,
            role,
        )
    }

    /// Deletes an assignment and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the assignment does not exist.
    pub fn delete_assignment(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<Assignment, PersistenceError> {
        mutations::assignments::delete_assignment(&mut self.conn, assignment_id)
    }
}
