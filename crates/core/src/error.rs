// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bulk::BulkReport;
use mappatura_domain::{DomainError, RepresentativeId, Role, SectionId};

/// Errors that can occur while reading or changing assignments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The slot is held by a different representative; remove it first.
    #[error("Section {section_id} already has a {role} assigned (representative {occupant})")]
    SlotOccupied {
        /// The section.
        section_id: SectionId,
        /// The occupied role.
        role: Role,
        /// The current occupant.
        occupant: RepresentativeId,
    },
    /// An assignment, section or representative does not exist.
    #[error("{resource} {id} not found")]
    NotFound {
        /// The kind of resource.
        resource: &'static str,
        /// The missing identifier.
        id: i64,
    },
    /// Input was malformed.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The offending field.
        field: &'static str,
        /// A human-readable description.
        message: String,
    },
    /// Some items of a bulk assignment failed; the others stay applied.
    #[error(
        "Bulk assignment partially failed: {} of {} sections not assigned",
        .0.failed().count(),
        .0.items.len()
    )]
    PartialBatchFailure(BulkReport),
    /// The operation was cancelled before it ran.
    #[error("Operation cancelled")]
    Cancelled,
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The backing repository failed.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl CoreError {
    /// Shorthand for a validation failure.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Maps a scope resolution failure: unknown nodes become `NotFound`,
/// inconsistent paths become validation failures.
pub(crate) fn scope_error(error: DomainError) -> CoreError {
    match error {
        DomainError::NodeNotFound { level, id } => CoreError::NotFound {
            resource: level,
            id,
        },
        other => CoreError::validation("scope", other.to_string()),
    }
}
