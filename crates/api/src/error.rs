// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use mappatura::CoreError;
use mappatura_domain::DomainError;
use mappatura_persistence::PersistenceError;

use crate::request_response::BulkCreateAssignmentsResponse;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The slot is held by another representative.
    #[error("Slot {role} of section {section_id} is held by representative {occupant}")]
    SlotOccupied {
        /// The section.
        section_id: i64,
        /// The slot code (`RDL` or `SUPPLENTE`).
        role: String,
        /// The current occupant.
        occupant: i64,
    },
    /// Some items of a bulk assignment failed. Applied items stay applied;
    /// the response lists every item.
    #[error(
        "Bulk assignment partially failed: {} of {} sections not assigned",
        .0.failed,
        .0.results.len()
    )]
    PartialBatchFailure(Box<BulkCreateAssignmentsResponse>),
    /// The operation was cancelled or timed out.
    #[error("Operation cancelled: {message}")]
    Cancelled {
        /// What was cancelled.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidIdentifier { field, value } => ApiError::InvalidInput {
            field: format!("{field}_id"),
            message: format!("Identifier must be positive, got {value}"),
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{role}'. Expected RDL or SUPPLENTE"),
        },
        DomainError::NodeNotFound { level, id } => ApiError::ResourceNotFound {
            resource_type: level.to_string(),
            message: format!("{level} {id} does not exist"),
        },
        DomainError::InconsistentScope(msg) => ApiError::InvalidInput {
            field: String::from("scope"),
            message: msg,
        },
        DomainError::InvalidDistrict {
            municipality_id,
            district,
        } => ApiError::InvalidInput {
            field: String::from("district"),
            message: format!(
                "District {district} is not defined for municipality {municipality_id}"
            ),
        },
        DomainError::InvalidSection { section_id, reason } => ApiError::DomainRuleViolation {
            rule: String::from("section_structure"),
            message: format!("Section {section_id}: {reason}"),
        },
        DomainError::InvalidRepresentative {
            representative_id,
            reason,
        } => ApiError::DomainRuleViolation {
            rule: String::from("representative_structure"),
            message: format!("Representative {representative_id}: {reason}"),
        },
        DomainError::DuplicateIdentifier { kind, id } => ApiError::DomainRuleViolation {
            rule: String::from("unique_identifier"),
            message: format!("Duplicate {kind} identifier {id}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::SlotOccupied {
            section_id,
            role,
            occupant,
        } => ApiError::SlotOccupied {
            section_id: section_id.value(),
            role: role.as_str().to_string(),
            occupant: occupant.value(),
        },
        CoreError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: format!("{resource} {id} does not exist"),
        },
        CoreError::Validation { field, message } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        CoreError::PartialBatchFailure(report) => {
            ApiError::PartialBatchFailure(Box::new(BulkCreateAssignmentsResponse::new(report, None)))
        }
        CoreError::Cancelled => ApiError::Cancelled {
            message: String::from("cancellation was requested before the write"),
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Repository(msg) => ApiError::Internal {
            message: format!("Storage error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::AlreadySeeded => ApiError::DomainRuleViolation {
            rule: String::from("reference_data_loaded_once"),
            message: String::from("Reference data has already been loaded"),
        },
        PersistenceError::InvalidReferenceData(msg) => ApiError::InvalidInput {
            field: String::from("fixture"),
            message: msg,
        },
        PersistenceError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: format!("{resource} {id} does not exist"),
        },
        PersistenceError::SlotOccupied { section_id, role } => ApiError::DomainRuleViolation {
            rule: String::from("slot_exclusive"),
            message: format!("Slot {role} of section {section_id} is already assigned"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
