// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Assignment, RepresentativeId, Role, SectionId};
use std::collections::HashMap;

/// The two slots of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSlots {
    /// The primary occupant, if any.
    pub primary: Option<Assignment>,
    /// The alternate occupant, if any.
    pub alternate: Option<Assignment>,
}

impl SectionSlots {
    /// Returns the occupant of a slot.
    #[must_use]
    pub const fn get(&self, role: Role) -> Option<&Assignment> {
        match role {
            Role::Primary => self.primary.as_ref(),
            Role::Alternate => self.alternate.as_ref(),
        }
    }

    /// Returns true if both slots are filled.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.primary.is_some() && self.alternate.is_some()
    }

    /// Returns the roles still free.
    #[must_use]
    pub fn free_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    /// Returns true if an alternate is present without a primary.
    #[must_use]
    pub const fn has_orphan_alternate(&self) -> bool {
        self.primary.is_none() && self.alternate.is_some()
    }
}

/// Read-side lookup over a set of assignments.
///
/// Built once per query from the authoritative assignment list.
#[derive(Debug, Clone, Default)]
pub struct SlotTable {
    by_section: HashMap<SectionId, SectionSlots>,
    by_representative: HashMap<RepresentativeId, Vec<Assignment>>,
}

impl SlotTable {
    /// Indexes the given assignments.
    ///
    /// If the input holds two assignments for the same slot, the later one
    /// wins; storage guarantees this never happens.
    #[must_use]
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut table: Self = Self::default();
        for assignment in assignments {
            let slots = table.by_section.entry(assignment.section_id).or_default();
            match assignment.role {
                Role::Primary => slots.primary = Some(assignment.clone()),
                Role::Alternate => slots.alternate = Some(assignment.clone()),
            }
            table
                .by_representative
                .entry(assignment.representative_id)
                .or_default()
                .push(assignment.clone());
        }
        table
    }

    /// Returns the slots of a section; empty if nothing is assigned.
    #[must_use]
    pub fn slots(&self, section_id: SectionId) -> SectionSlots {
        self.by_section.get(&section_id).cloned().unwrap_or_default()
    }

    /// Returns the occupant of one slot.
    #[must_use]
    pub fn occupant(&self, section_id: SectionId, role: Role) -> Option<&Assignment> {
        self.by_section
            .get(&section_id)
            .and_then(|slots| slots.get(role))
    }

    /// Returns all assignments held by a representative.
    #[must_use]
    pub fn held_by(&self, representative_id: RepresentativeId) -> &[Assignment] {
        self.by_representative
            .get(&representative_id)
            .map_or(&[], Vec::as_slice)
    }
}
