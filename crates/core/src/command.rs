// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bulk::BulkReport;
use mappatura_domain::{Assignment, AssignmentId, RepresentativeId, Role, Scope, SectionId};

/// A command represents operator intent as data only.
///
/// Commands are the only way to request assignment changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Put a representative in one slot of one section.
    Assign {
        /// The section.
        section_id: SectionId,
        /// The representative.
        representative_id: RepresentativeId,
        /// The slot.
        role: Role,
    },
    /// Delete an assignment.
    Remove {
        /// The assignment to delete.
        assignment_id: AssignmentId,
    },
    /// Assign one representative to many sections, independently per section.
    BulkAssign {
        /// The representative.
        representative_id: RepresentativeId,
        /// The target sections; duplicates are ignored.
        section_ids: Vec<SectionId>,
        /// The slot to fill in every section.
        role: Role,
    },
    /// Drop memoized aggregates related to a scope.
    InvalidateCache {
        /// The scope whose aggregates are stale.
        scope: Scope,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "Assign",
            Self::Remove { .. } => "Remove",
            Self::BulkAssign { .. } => "BulkAssign",
            Self::InvalidateCache { .. } => "InvalidateCache",
        }
    }
}

/// Result of assigning a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// A new assignment was created.
    Created(Assignment),
    /// The representative already held this slot; nothing changed.
    Unchanged(Assignment),
}

impl AssignOutcome {
    /// Returns the assignment now occupying the slot.
    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        match self {
            Self::Created(assignment) | Self::Unchanged(assignment) => assignment,
        }
    }

    /// Returns true if the store changed.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Result of executing a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Outcome of `Assign`.
    Assigned(AssignOutcome),
    /// Outcome of `Remove`: the deleted assignment.
    Removed(Assignment),
    /// Outcome of `BulkAssign`.
    Bulk(BulkReport),
    /// Outcome of `InvalidateCache`.
    Invalidated(Scope),
}
