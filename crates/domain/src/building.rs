// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Polling buildings ("plessi").
//!
//! Buildings are not stored. They are derived by grouping the sections of a
//! municipality on their normalized denomination and address.

use crate::types::{MunicipalityId, Section, SectionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of a polling building.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildingKey {
    /// The municipality hosting the building.
    pub municipality_id: MunicipalityId,
    /// Normalized denomination.
    pub name: String,
    /// Normalized address.
    pub address: String,
}

impl BuildingKey {
    /// Derives the building key of a section.
    #[must_use]
    pub fn of(section: &Section) -> Self {
        Self {
            municipality_id: section.municipality_id,
            name: normalize_label(&section.building_name),
            address: normalize_label(&section.address),
        }
    }
}

/// A group of sections sharing one physical location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingBuilding {
    /// The grouping key.
    pub key: BuildingKey,
    /// Denomination as written on the first section of the group.
    pub name: String,
    /// Address as written on the first section of the group.
    pub address: String,
    /// Member sections, in section-number order.
    pub section_ids: Vec<SectionId>,
    /// Electors across all member sections.
    pub elector_count: u32,
}

/// Uppercases, trims and collapses internal whitespace.
#[must_use]
pub fn normalize_label(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Groups sections into polling buildings.
///
/// Buildings are ordered by name then address; sections inside a building
/// keep the order they were given in.
#[must_use]
pub fn group_buildings<'a, I>(sections: I) -> Vec<PollingBuilding>
where
    I: IntoIterator<Item = &'a Section>,
{
    let mut groups: BTreeMap<(String, String, MunicipalityId), PollingBuilding> = BTreeMap::new();

    for section in sections {
        let key: BuildingKey = BuildingKey::of(section);
        let sort_key = (key.name.clone(), key.address.clone(), key.municipality_id);
        let building = groups.entry(sort_key).or_insert_with(|| PollingBuilding {
            key,
            name: section.building_name.trim().to_string(),
            address: section.address.trim().to_string(),
            section_ids: Vec::new(),
            elector_count: 0,
        });
        building.section_ids.push(section.id);
        building.elector_count = building.elector_count.saturating_add(section.elector_count);
    }

    groups.into_values().collect()
}
