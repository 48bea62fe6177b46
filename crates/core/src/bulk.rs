// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-item outcomes of a bulk assignment.
//!
//! A bulk assignment is a fold over independent single assignments, not a
//! transaction: items that succeed stay applied whatever happens to the
//! others.

use crate::error::CoreError;
use mappatura_domain::{AssignmentId, RepresentativeId, Role, SectionId};
use serde::{Deserialize, Serialize};

/// Outcome of one section in a bulk assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkItemStatus {
    /// A new assignment was created.
    Assigned {
        /// The new assignment.
        assignment_id: AssignmentId,
    },
    /// The representative already held the slot.
    AlreadyAssigned {
        /// The existing assignment.
        assignment_id: AssignmentId,
    },
    /// Another representative holds the slot.
    SlotOccupied {
        /// The current occupant.
        occupant: RepresentativeId,
    },
    /// The section does not exist.
    NotFound,
    /// Cancellation was requested before this item ran.
    Cancelled,
}

impl BulkItemStatus {
    /// Returns true if the slot ends up held by the requested representative.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Assigned { .. } | Self::AlreadyAssigned { .. })
    }
}

/// Outcome of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItem {
    /// The section.
    pub section_id: SectionId,
    /// What happened to it.
    pub status: BulkItemStatus,
}

/// Collected outcomes of a bulk assignment, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    /// The representative being assigned.
    pub representative_id: RepresentativeId,
    /// The slot filled in each section.
    pub role: Role,
    /// Per-section outcomes.
    pub items: Vec<BulkItem>,
}

impl BulkReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new(representative_id: RepresentativeId, role: Role) -> Self {
        Self {
            representative_id,
            role,
            items: Vec::new(),
        }
    }

    /// Records the outcome of one section.
    pub fn push(&mut self, section_id: SectionId, status: BulkItemStatus) {
        self.items.push(BulkItem { section_id, status });
    }

    /// Returns the items that succeeded.
    pub fn succeeded(&self) -> impl Iterator<Item = &BulkItem> {
        self.items.iter().filter(|i| i.status.is_success())
    }

    /// Returns the items that failed or were cancelled.
    pub fn failed(&self) -> impl Iterator<Item = &BulkItem> {
        self.items.iter().filter(|i| !i.status.is_success())
    }

    /// Returns the number of assignments actually created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.status, BulkItemStatus::Assigned { .. }))
            .count()
    }

    /// Returns true if at least one item failed.
    #[must_use]
    pub fn is_partial_failure(&self) -> bool {
        self.failed().next().is_some()
    }

    /// Converts the report into an error if any item failed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PartialBatchFailure` carrying the full report.
    pub fn into_result(self) -> Result<Self, CoreError> {
        if self.is_partial_failure() {
            return Err(CoreError::PartialBatchFailure(self));
        }
        Ok(self)
    }
}
