// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Free-text seat preferences.
//!
//! Representatives describe where they want to serve in their own words
//! ("sezioni 12-18", "sezione 4 e 7", "ROMA Municipio I, II"). Parsing only
//! extracts integers and integer ranges; everything else is ignored and the
//! parser never fails. Ranges too wide to expand are kept aside and reported
//! with the match.

use crate::building::normalize_label;
use crate::slots::SlotTable;
use crate::types::{RepresentativeId, Role, Section, SectionId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Widest range expanded by the parser.
///
/// Ranges spanning more numbers than this are not expanded: no municipality
/// has that many sections. They are reported back instead so the operator
/// can see that part of the text was not used.
pub const MAX_RANGE_SPAN: u32 = 10_000;

static NUMBER_OR_RANGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\s*-\s*(\d+))?").ok());

/// An inclusive range of section numbers, low end first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    /// Lowest number.
    pub low: u32,
    /// Highest number.
    pub high: u32,
}

/// Everything the parser read out of a preference text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPreference {
    /// Expanded section numbers.
    pub numbers: BTreeSet<u32>,
    /// Ranges wider than [`MAX_RANGE_SPAN`], in text order.
    pub oversized_ranges: Vec<NumberRange>,
}

/// Reads section numbers and ranges out of `text`.
///
/// Each `<int>` or `<int> - <int>` occurrence contributes its number or every
/// number of the inclusive range. Reversed ranges are read low to high.
/// Numbers too large for `u32` are skipped.
#[must_use]
pub fn read_preference(text: &str) -> ParsedPreference {
    let mut parsed: ParsedPreference = ParsedPreference::default();
    let Some(pattern) = NUMBER_OR_RANGE.as_ref() else {
        return parsed;
    };

    for captures in pattern.captures_iter(text) {
        let Some(start) = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            continue;
        };
        match captures.get(2) {
            None => {
                parsed.numbers.insert(start);
            }
            Some(end) => {
                let Ok(end) = end.as_str().parse::<u32>() else {
                    continue;
                };
                let (low, high) = if start <= end { (start, end) } else { (end, start) };
                if high - low > MAX_RANGE_SPAN {
                    parsed.oversized_ranges.push(NumberRange { low, high });
                    continue;
                }
                parsed.numbers.extend(low..=high);
            }
        }
    }

    parsed
}

/// Extracts the set of section numbers mentioned in `text`.
///
/// Shorthand for [`read_preference`] when oversized ranges do not matter.
#[must_use]
pub fn parse_preference(text: &str) -> BTreeSet<u32> {
    read_preference(text).numbers
}

/// Availability of a section matched by a preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionAvailability {
    /// At least one slot is free.
    Available {
        /// The roles still free.
        free_roles: Vec<Role>,
    },
    /// The requesting representative already holds a slot here.
    HeldByRepresentative {
        /// The held role.
        role: Role,
    },
    /// Both slots are taken by other representatives.
    Full,
}

/// One section matched by a preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    /// The matched section.
    pub section_id: SectionId,
    /// Its number.
    pub number: u32,
    /// Its polling-building denomination.
    pub building_name: String,
    /// Its address.
    pub address: String,
    /// Slot occupancy at analysis time.
    pub availability: SectionAvailability,
}

impl PreferenceEntry {
    /// Returns true if the operator may select this section for assignment.
    ///
    /// Unavailable entries are kept in the match so the operator can see
    /// what was requested, but they start deselected.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        matches!(self.availability, SectionAvailability::Available { .. })
    }
}

/// Result of matching a preference against a set of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceMatch {
    /// Every number the text mentioned.
    pub requested: BTreeSet<u32>,
    /// Matched sections, ordered by number then building.
    pub entries: Vec<PreferenceEntry>,
    /// Requested numbers with no section in scope.
    pub unmatched: Vec<u32>,
    /// Ranges too wide to expand; none of their numbers were matched.
    #[serde(default)]
    pub oversized_ranges: Vec<NumberRange>,
}

impl PreferenceMatch {
    /// Returns the sections that start selected.
    pub fn selectable(&self) -> impl Iterator<Item = &PreferenceEntry> {
        self.entries.iter().filter(|e| e.is_selectable())
    }

    /// Returns the sections shown but not selectable.
    pub fn unavailable(&self) -> impl Iterator<Item = &PreferenceEntry> {
        self.entries.iter().filter(|e| !e.is_selectable())
    }
}

/// Intersects requested numbers with the sections in a representative's
/// declared territory.
///
/// Section numbers are unique per building, so one number may match several
/// sections; all of them are returned.
#[must_use]
pub fn match_preferences<'a, I>(
    parsed: ParsedPreference,
    sections: I,
    slots: &SlotTable,
    representative_id: RepresentativeId,
) -> PreferenceMatch
where
    I: IntoIterator<Item = &'a Section>,
{
    let ParsedPreference {
        numbers: requested,
        oversized_ranges,
    } = parsed;

    let mut entries: Vec<PreferenceEntry> = sections
        .into_iter()
        .filter(|section| requested.contains(&section.number))
        .map(|section| {
            let section_slots = slots.slots(section.id);
            let held = Role::ALL.into_iter().find(|role| {
                section_slots
                    .get(*role)
                    .is_some_and(|a| a.representative_id == representative_id)
            });
            let availability = if let Some(role) = held {
                SectionAvailability::HeldByRepresentative { role }
            } else if section_slots.is_full() {
                SectionAvailability::Full
            } else {
                SectionAvailability::Available {
                    free_roles: section_slots.free_roles(),
                }
            };
            PreferenceEntry {
                section_id: section.id,
                number: section.number,
                building_name: section.building_name.clone(),
                address: section.address.clone(),
                availability,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        (a.number, normalize_label(&a.building_name))
            .cmp(&(b.number, normalize_label(&b.building_name)))
    });

    let found: BTreeSet<u32> = entries.iter().map(|e| e.number).collect();
    let unmatched: Vec<u32> = requested.difference(&found).copied().collect();

    PreferenceMatch {
        requested,
        entries,
        unmatched,
        oversized_ranges,
    }
}
