// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{MunicipalityId, ProvinceId, RegionId};
use serde::{Deserialize, Serialize};

/// A level of the territorial hierarchy as seen by a navigating operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Listing regions.
    Region,
    /// Listing the provinces of a region.
    Province,
    /// Listing the municipalities of a province.
    Municipality,
    /// Listing the districts of a districted municipality.
    District,
    /// Listing the sections of a municipality or district.
    SectionList,
}

impl Level {
    /// Returns the display name of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Province => "Province",
            Self::Municipality => "Municipality",
            Self::District => "District",
            Self::SectionList => "SectionList",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A partial path into the territorial hierarchy.
///
/// Components are filled from the top down; an empty scope is the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Selected region.
    #[serde(default)]
    pub region: Option<RegionId>,
    /// Selected province.
    #[serde(default)]
    pub province: Option<ProvinceId>,
    /// Selected municipality.
    #[serde(default)]
    pub municipality: Option<MunicipalityId>,
    /// Selected district number.
    #[serde(default)]
    pub district: Option<u32>,
}

impl Scope {
    /// The empty path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            region: None,
            province: None,
            municipality: None,
            district: None,
        }
    }

    /// Scope of a whole region.
    #[must_use]
    pub const fn for_region(region: RegionId) -> Self {
        Self {
            region: Some(region),
            province: None,
            municipality: None,
            district: None,
        }
    }

    /// Scope of a municipality; ancestors are filled on resolution.
    #[must_use]
    pub const fn for_municipality(municipality: MunicipalityId) -> Self {
        Self {
            region: None,
            province: None,
            municipality: Some(municipality),
            district: None,
        }
    }

    /// Returns this scope narrowed to a district.
    #[must_use]
    pub const fn with_district(mut self, district: u32) -> Self {
        self.district = Some(district);
        self
    }

    /// Returns true if no component is set.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.region.is_none()
            && self.province.is_none()
            && self.municipality.is_none()
            && self.district.is_none()
    }

    /// Number of leading components that are set.
    #[must_use]
    pub const fn depth(&self) -> usize {
        if self.district.is_some() {
            4
        } else if self.municipality.is_some() {
            3
        } else if self.province.is_some() {
            2
        } else if self.region.is_some() {
            1
        } else {
            0
        }
    }

    /// Returns this scope with its deepest set component cleared.
    ///
    /// Returns `None` for the root, which has nothing to clear.
    #[must_use]
    pub const fn parent(&self) -> Option<Self> {
        let mut parent: Self = *self;
        if parent.district.is_some() {
            parent.district = None;
        } else if parent.municipality.is_some() {
            parent.municipality = None;
        } else if parent.province.is_some() {
            parent.province = None;
        } else if parent.region.is_some() {
            parent.region = None;
        } else {
            return None;
        }
        Some(parent)
    }

    /// Returns true if `self` is `other` or one of its ancestors.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        fn covers<T: PartialEq>(outer: Option<T>, inner: Option<T>) -> bool {
            outer.is_none() || outer == inner
        }
        covers(self.region, other.region)
            && covers(self.province, other.province)
            && covers(self.municipality, other.municipality)
            && covers(self.district, other.district)
    }

    /// Returns true if one scope contains the other.
    ///
    /// Aggregates of related scopes overlap, so invalidating one must drop
    /// the other.
    #[must_use]
    pub fn is_related(&self, other: &Self) -> bool {
        self.contains(other) || other.contains(self)
    }
}
