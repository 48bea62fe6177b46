// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mappatura_domain::{Role, SectionId};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// A row references a missing parent row.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),
    /// The slot already holds an assignment.
    #[error("Slot {role} of section {section_id} is already assigned")]
    SlotOccupied {
        /// The section.
        section_id: SectionId,
        /// The slot.
        role: Role,
    },
    /// A stored row cannot be turned into a domain value.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
    /// Reference data failed validation or parsing.
    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(String),
    /// The database already holds reference data.
    #[error("Reference data already loaded")]
    AlreadySeeded,
    /// The requested resource was not found.
    #[error("{resource} {id} not found")]
    NotFound {
        /// The kind of resource.
        resource: &'static str,
        /// The missing identifier.
        id: i64,
    },
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound {
                resource: "Record",
                id: 0,
            },
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => Self::ForeignKeyViolation(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidReferenceData(err.to_string())
    }
}
