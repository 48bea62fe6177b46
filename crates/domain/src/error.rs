// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// An identifier was zero or negative.
    #[error("Invalid {field} identifier: {value}")]
    InvalidIdentifier {
        /// The identifier kind (e.g. `section`).
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A role string did not name a known role.
    #[error("Invalid role '{0}'. Expected one of RDL, EFFETTIVO, PRIMARY, SUPPLENTE, ALTERNATE")]
    InvalidRole(String),
    /// A scope component references something that does not exist.
    #[error("{level} {id} not found")]
    NodeNotFound {
        /// The hierarchy level of the missing node.
        level: &'static str,
        /// The missing identifier.
        id: i64,
    },
    /// A scope component does not belong to its parent component.
    #[error("Inconsistent scope: {0}")]
    InconsistentScope(String),
    /// A district was referenced in a municipality that has no districts,
    /// or a district number does not exist in the municipality.
    #[error("District {district} is not defined for municipality {municipality_id}")]
    InvalidDistrict {
        /// The municipality.
        municipality_id: i64,
        /// The district number.
        district: u32,
    },
    /// A section violates a structural invariant.
    #[error("Invalid section {section_id}: {reason}")]
    InvalidSection {
        /// The offending section.
        section_id: i64,
        /// Description of the violation.
        reason: String,
    },
    /// A representative record is malformed.
    #[error("Invalid representative {representative_id}: {reason}")]
    InvalidRepresentative {
        /// The offending representative.
        representative_id: i64,
        /// Description of the violation.
        reason: String,
    },
    /// Two reference records share the same identifier.
    #[error("Duplicate {kind} identifier {id}")]
    DuplicateIdentifier {
        /// The record kind.
        kind: &'static str,
        /// The duplicated identifier.
        id: i64,
    },
}
