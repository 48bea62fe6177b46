// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Territorial hierarchy index.
//!
//! Given a partial path the index returns either the next level's children
//! with aggregate counters, or, once the path pins down a municipality (and
//! its district when the municipality is districted), the sections of that
//! scope grouped by polling building and annotated with their occupants.
//!
//! The index reports when a level has exactly one child but never advances
//! on its own; that is the navigator's job.

use crate::cache::AggregateCache;
use crate::error::{CoreError, scope_error};
use crate::repository::MappingRepository;
use mappatura_domain::{
    Assignment, AssignmentId, ConflictDetector, Level, PollingBuilding, Representative,
    RepresentativeId, Role, Scope, Section, SlotFlags, SlotTable, Territory,
    count_building_warnings, group_buildings,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ROOT_LABEL: &str = "Italia";

/// Counters over every active section in a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Active sections in the subtree.
    pub total_sections: usize,
    /// Sections whose primary slot is filled.
    pub assigned_sections: usize,
    /// Sections whose primary slot is empty.
    pub unassigned_sections: usize,
    /// Representatives declared in the subtree who hold no assignment.
    pub available_representatives: usize,
}

/// Everything a read needs, loaded once from the repository.
#[derive(Debug, Clone)]
pub struct MappingSnapshot {
    /// The territorial hierarchy and its sections.
    pub territory: Territory,
    /// All representatives.
    pub representatives: Vec<Representative>,
    /// All assignments.
    pub assignments: Vec<Assignment>,
    slots: SlotTable,
}

impl MappingSnapshot {
    /// Builds a snapshot and indexes its assignments by slot.
    #[must_use]
    pub fn new(
        territory: Territory,
        representatives: Vec<Representative>,
        assignments: Vec<Assignment>,
    ) -> Self {
        let slots: SlotTable = SlotTable::from_assignments(&assignments);
        Self {
            territory,
            representatives,
            assignments,
            slots,
        }
    }

    /// Reads a snapshot from a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn load<R: MappingRepository + ?Sized>(repository: &mut R) -> Result<Self, CoreError> {
        let territory: Territory = repository.load_territory()?;
        let representatives: Vec<Representative> = repository.list_representatives()?;
        let assignments: Vec<Assignment> = repository.list_assignments()?;
        Ok(Self::new(territory, representatives, assignments))
    }

    /// Returns the slot index.
    #[must_use]
    pub const fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// Looks up a representative.
    #[must_use]
    pub fn representative(&self, id: RepresentativeId) -> Option<&Representative> {
        self.representatives.iter().find(|r| r.id == id)
    }
}

/// A child of the current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Which level the node belongs to.
    pub level: Level,
    /// The path that drills into this node.
    pub scope: Scope,
    /// Region, province or municipality id; district number for districts.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Subtree counters.
    pub aggregates: Aggregates,
}

/// An occupied slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    /// The assignment holding the slot.
    pub assignment_id: AssignmentId,
    /// The occupant.
    pub representative_id: RepresentativeId,
    /// The occupant's name, empty if unknown.
    pub representative_name: String,
    /// Conflict annotations.
    pub flags: SlotFlags,
}

/// A section with its two slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRow {
    /// The section.
    pub section: Section,
    /// The primary slot.
    pub primary: Option<SlotView>,
    /// The alternate slot.
    pub alternate: Option<SlotView>,
}

/// A polling building with its sections and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingView {
    /// The building.
    pub building: PollingBuilding,
    /// Its sections, in number order.
    pub sections: Vec<SectionRow>,
    /// Sections with an alternate but no primary.
    pub warning_count: usize,
    /// Sections whose primary slot is filled.
    pub primary_filled: usize,
    /// Sections whose alternate slot is filled.
    pub alternate_filled: usize,
}

impl BuildingView {
    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.building.name, needle)
            || contains_folded(&self.building.address, needle)
    }
}

/// What a level shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HierarchyContent {
    /// Children of a region, province or municipality level.
    Nodes {
        /// The children.
        nodes: Vec<HierarchyNode>,
    },
    /// The sections of a municipality or district.
    Sections {
        /// Sections grouped by polling building.
        buildings: Vec<BuildingView>,
    },
}

impl HierarchyContent {
    /// Returns the number of nodes or sections.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Nodes { nodes } => nodes.len(),
            Self::Sections { buildings } => buildings.iter().map(|b| b.sections.len()).sum(),
        }
    }

    /// Returns true if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the nodes, empty for a section list.
    #[must_use]
    pub fn nodes(&self) -> &[HierarchyNode] {
        match self {
            Self::Nodes { nodes } => nodes.as_slice(),
            Self::Sections { .. } => &[],
        }
    }

    /// Keeps only entries whose text contains `needle`, ignoring case.
    ///
    /// Nodes match on name. A building matching on name or address keeps
    /// all its sections; otherwise sections match on their number. An empty
    /// needle keeps everything.
    #[must_use]
    pub fn filter(&self, needle: &str) -> Self {
        let needle: String = needle.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        match self {
            Self::Nodes { nodes } => Self::Nodes {
                nodes: nodes
                    .iter()
                    .filter(|n| contains_folded(&n.name, &needle))
                    .cloned()
                    .collect(),
            },
            Self::Sections { buildings } => Self::Sections {
                buildings: buildings
                    .iter()
                    .filter_map(|building| {
                        if building.matches(&needle) {
                            return Some(building.clone());
                        }
                        let sections: Vec<SectionRow> = building
                            .sections
                            .iter()
                            .filter(|row| row.section.number.to_string().contains(&needle))
                            .cloned()
                            .collect();
                        (!sections.is_empty()).then(|| BuildingView {
                            sections,
                            ..building.clone()
                        })
                    })
                    .collect(),
            },
        }
    }
}

/// One step of the path, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The path up to and including this step.
    pub scope: Scope,
    /// Display label.
    pub label: String,
}

/// Result of a hierarchy query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyView {
    /// The resolved path, with ancestors filled in.
    pub scope: Scope,
    /// The level being shown.
    pub level: Level,
    /// Children or sections.
    pub content: HierarchyContent,
    /// Counters for the whole scope.
    pub summary: Aggregates,
    /// Path from the root to the scope.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// True when the level has exactly one child to drill into.
    pub auto_skip: bool,
}

impl HierarchyView {
    /// Returns the single child's path when the level can be skipped.
    #[must_use]
    pub fn only_child(&self) -> Option<Scope> {
        if !self.auto_skip {
            return None;
        }
        match self.content.nodes() {
            [only] => Some(only.scope),
            _ => None,
        }
    }
}

/// Read-only queries over a snapshot, memoizing aggregates in a cache.
pub struct HierarchyIndex<'a> {
    snapshot: &'a MappingSnapshot,
    cache: &'a AggregateCache,
}

impl<'a> HierarchyIndex<'a> {
    /// Creates an index over a snapshot.
    #[must_use]
    pub const fn new(snapshot: &'a MappingSnapshot, cache: &'a AggregateCache) -> Self {
        Self { snapshot, cache }
    }

    /// Returns the counters of a scope, from the cache when present.
    #[must_use]
    pub fn aggregates(&self, scope: &Scope) -> Aggregates {
        self.cache
            .get_or_insert_with(*scope, || self.compute_aggregates(scope))
    }

    fn compute_aggregates(&self, scope: &Scope) -> Aggregates {
        let territory: &Territory = &self.snapshot.territory;
        let slots: &SlotTable = self.snapshot.slots();

        let mut total_sections: usize = 0;
        let mut assigned_sections: usize = 0;
        for section in territory.sections_in(scope).filter(|s| s.is_active) {
            total_sections += 1;
            if slots.occupant(section.id, Role::Primary).is_some() {
                assigned_sections += 1;
            }
        }

        let available_representatives: usize = self
            .snapshot
            .representatives
            .iter()
            .filter(|r| territory.place_in_scope(r.municipality_id, r.district, scope))
            .filter(|r| slots.held_by(r.id).is_empty())
            .count();

        Aggregates {
            total_sections,
            assigned_sections,
            unassigned_sections: total_sections - assigned_sections,
            available_representatives,
        }
    }

    /// Resolves a partial path and returns what its level shows.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if a path component does not exist, or
    /// a validation error if the components do not nest.
    pub fn query(&self, scope: &Scope) -> Result<HierarchyView, CoreError> {
        let territory: &Territory = &self.snapshot.territory;
        let resolved: Scope = territory.resolve_scope(scope).map_err(scope_error)?;

        let (level, content) = match (resolved.region, resolved.province, resolved.municipality) {
            (None, _, _) => (
                Level::Region,
                self.nodes(
                    Level::Region,
                    territory
                        .regions()
                        .iter()
                        .map(|r| (Scope::for_region(r.id), r.id.value(), r.name.as_str())),
                ),
            ),
            (Some(region_id), None, _) => (
                Level::Province,
                self.nodes(
                    Level::Province,
                    territory.provinces_of(region_id).map(|p| {
                        let scope = Scope {
                            province: Some(p.id),
                            ..resolved
                        };
                        (scope, p.id.value(), p.name.as_str())
                    }),
                ),
            ),
            (Some(_), Some(province_id), None) => (
                Level::Municipality,
                self.nodes(
                    Level::Municipality,
                    territory.municipalities_of(province_id).map(|m| {
                        let scope = Scope {
                            municipality: Some(m.id),
                            ..resolved
                        };
                        (scope, m.id.value(), m.name.as_str())
                    }),
                ),
            ),
            (_, _, Some(municipality_id)) => {
                let municipality =
                    territory
                        .municipality(municipality_id)
                        .ok_or(CoreError::NotFound {
                            resource: "Municipality",
                            id: municipality_id.value(),
                        })?;
                let has_districts: bool = territory.districts_of(municipality_id).next().is_some();
                if municipality.is_districted && has_districts && resolved.district.is_none() {
                    (
                        Level::District,
                        self.nodes(
                            Level::District,
                            territory.districts_of(municipality_id).map(|d| {
                                (
                                    resolved.with_district(d.number),
                                    i64::from(d.number),
                                    d.name.as_str(),
                                )
                            }),
                        ),
                    )
                } else {
                    (Level::SectionList, self.sections(&resolved))
                }
            }
        };

        let auto_skip: bool = level != Level::SectionList && content.len() == 1;
        debug!(?resolved, %level, items = content.len(), auto_skip, "Hierarchy query");

        Ok(HierarchyView {
            scope: resolved,
            level,
            summary: self.aggregates(&resolved),
            breadcrumbs: self.breadcrumbs(&resolved),
            content,
            auto_skip,
        })
    }

    fn nodes<'n, I>(&self, level: Level, children: I) -> HierarchyContent
    where
        I: Iterator<Item = (Scope, i64, &'n str)>,
    {
        let nodes: Vec<HierarchyNode> = children
            .map(|(scope, id, name)| HierarchyNode {
                level,
                scope,
                id,
                name: name.to_string(),
                aggregates: self.aggregates(&scope),
            })
            .collect();
        HierarchyContent::Nodes { nodes }
    }

    fn sections(&self, scope: &Scope) -> HierarchyContent {
        let territory: &Territory = &self.snapshot.territory;
        let slots: &SlotTable = self.snapshot.slots();
        let detector = ConflictDetector::new(territory, slots, &self.snapshot.representatives);

        let slot_view = |assignment: &Assignment| SlotView {
            assignment_id: assignment.id,
            representative_id: assignment.representative_id,
            representative_name: self
                .snapshot
                .representative(assignment.representative_id)
                .map(|r| r.full_name.clone())
                .unwrap_or_default(),
            flags: detector.flags_for(assignment),
        };

        let buildings: Vec<BuildingView> =
            group_buildings(territory.sections_in(scope).filter(|s| s.is_active))
                .into_iter()
                .map(|building| {
                    let sections: Vec<&Section> = building
                        .section_ids
                        .iter()
                        .filter_map(|id| territory.section(*id))
                        .collect();
                    let rows: Vec<SectionRow> = sections
                        .iter()
                        .map(|section| {
                            let section_slots = slots.slots(section.id);
                            SectionRow {
                                section: (*section).clone(),
                                primary: section_slots.primary.as_ref().map(&slot_view),
                                alternate: section_slots.alternate.as_ref().map(&slot_view),
                            }
                        })
                        .collect();
                    BuildingView {
                        warning_count: count_building_warnings(sections.iter().copied(), slots),
                        primary_filled: rows.iter().filter(|r| r.primary.is_some()).count(),
                        alternate_filled: rows.iter().filter(|r| r.alternate.is_some()).count(),
                        building,
                        sections: rows,
                    }
                })
                .collect();

        HierarchyContent::Sections { buildings }
    }

    fn breadcrumbs(&self, scope: &Scope) -> Vec<Breadcrumb> {
        let territory: &Territory = &self.snapshot.territory;
        let mut crumbs: Vec<Breadcrumb> = vec![Breadcrumb {
            scope: Scope::root(),
            label: ROOT_LABEL.to_string(),
        }];
        let mut path: Scope = Scope::root();

        if let Some(region) = scope.region.and_then(|id| territory.region(id)) {
            path.region = Some(region.id);
            crumbs.push(Breadcrumb {
                scope: path,
                label: region.name.clone(),
            });
        }
        if let Some(province) = scope.province.and_then(|id| territory.province(id)) {
            path.province = Some(province.id);
            crumbs.push(Breadcrumb {
                scope: path,
                label: province.name.clone(),
            });
        }
        if let Some(municipality) = scope.municipality.and_then(|id| territory.municipality(id)) {
            path.municipality = Some(municipality.id);
            crumbs.push(Breadcrumb {
                scope: path,
                label: municipality.name.clone(),
            });
            if let Some(district) = scope
                .district
                .and_then(|number| territory.district(municipality.id, number))
            {
                path.district = Some(district.number);
                crumbs.push(Breadcrumb {
                    scope: path,
                    label: district.name.clone(),
                });
            }
        }
        crumbs
    }
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
