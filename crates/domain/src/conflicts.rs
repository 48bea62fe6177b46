// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-time conflict annotations.
//!
//! Conflicts are **computed**, not stored, and never block a write. They are
//! advisory signals for the operator.

use crate::building::BuildingKey;
use crate::slots::SlotTable;
use crate::territory::Territory;
use crate::types::{Assignment, Representative, RepresentativeId, Section};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Flags attached to one occupied slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFlags {
    /// The occupant also holds a slot in a different polling building.
    pub multi_plesso: bool,
    /// The section lies outside the occupant's declared territory.
    pub territorio_mismatch: bool,
}

impl SlotFlags {
    /// Returns true if any flag is raised.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.multi_plesso || self.territorio_mismatch
    }
}

/// Computes conflict flags over one consistent read of the store.
pub struct ConflictDetector<'a> {
    territory: &'a Territory,
    slots: &'a SlotTable,
    representatives: HashMap<RepresentativeId, &'a Representative>,
}

impl<'a> ConflictDetector<'a> {
    /// Creates a detector over a territory, its assignments and the known
    /// representatives.
    #[must_use]
    pub fn new(
        territory: &'a Territory,
        slots: &'a SlotTable,
        representatives: &'a [Representative],
    ) -> Self {
        Self {
            territory,
            slots,
            representatives: representatives.iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Returns the distinct buildings a representative holds slots in.
    #[must_use]
    pub fn buildings_of(&self, representative_id: RepresentativeId) -> HashSet<BuildingKey> {
        self.slots
            .held_by(representative_id)
            .iter()
            .filter_map(|a| self.territory.section(a.section_id))
            .map(BuildingKey::of)
            .collect()
    }

    /// Returns true if the representative's assignments span two or more
    /// polling buildings.
    ///
    /// Holding several sections inside a single building is not a conflict.
    #[must_use]
    pub fn is_multi_plesso(&self, representative_id: RepresentativeId) -> bool {
        self.buildings_of(representative_id).len() >= 2
    }

    /// Returns true if the section is outside the representative's declared
    /// municipality, or both declare a district and the districts differ.
    ///
    /// A representative who declared only the municipality may serve in any
    /// of its districts.
    #[must_use]
    pub fn is_territorio_mismatch(representative: &Representative, section: &Section) -> bool {
        if representative.municipality_id != section.municipality_id {
            return true;
        }
        matches!(
            (representative.district, section.district),
            (Some(declared), Some(actual)) if declared != actual
        )
    }

    /// Computes the flags of an occupied slot.
    ///
    /// Unknown sections or representatives yield no flags.
    #[must_use]
    pub fn flags_for(&self, assignment: &Assignment) -> SlotFlags {
        let multi_plesso: bool = self.is_multi_plesso(assignment.representative_id);
        let territorio_mismatch: bool = match (
            self.representatives.get(&assignment.representative_id),
            self.territory.section(assignment.section_id),
        ) {
            (Some(representative), Some(section)) => {
                Self::is_territorio_mismatch(representative, section)
            }
            _ => false,
        };
        SlotFlags {
            multi_plesso,
            territorio_mismatch,
        }
    }
}

/// Counts the sections holding an alternate but no primary.
#[must_use]
pub fn count_building_warnings<'a, I>(sections: I, slots: &SlotTable) -> usize
where
    I: IntoIterator<Item = &'a Section>,
{
    sections
        .into_iter()
        .filter(|s| slots.slots(s.id).has_orphan_alternate())
        .count()
}
