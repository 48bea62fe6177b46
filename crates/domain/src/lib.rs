// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain model for representative-to-section mapping.
//!
//! This crate holds the pure, storage-agnostic rules: territorial reference
//! data, polling-building grouping, free-text preference parsing and the
//! read-time conflict annotations. Nothing here performs I/O.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod building;
mod conflicts;
mod error;
mod preference;
mod scope;
mod slots;
mod territory;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use building::{BuildingKey, PollingBuilding, group_buildings, normalize_label};
pub use conflicts::{ConflictDetector, SlotFlags, count_building_warnings};
pub use error::DomainError;
pub use preference::{
    MAX_RANGE_SPAN, NumberRange, ParsedPreference, PreferenceEntry, PreferenceMatch,
    SectionAvailability, match_preferences, parse_preference, read_preference,
};
pub use scope::{Level, Scope};
pub use slots::{SectionSlots, SlotTable};
pub use territory::{District, Municipality, Province, Region, Territory, TerritoryData};
pub use types::{
    Assignment, AssignmentId, MunicipalityId, ProvinceId, RegionId, Representative,
    RepresentativeId, Role, Section, SectionId,
};
pub use validation::{validate_identifier, validate_representative, validate_territory};
