// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of a region.
    RegionId
);
identifier!(
    /// Identifier of a province.
    ProvinceId
);
identifier!(
    /// Identifier of a municipality.
    MunicipalityId
);
identifier!(
    /// Identifier of an electoral section.
    SectionId
);
identifier!(
    /// Identifier of a representative candidate.
    RepresentativeId
);
identifier!(
    /// Identifier of a persisted assignment.
    AssignmentId
);

/// The two slots a section offers.
///
/// Every section has exactly one `Primary` ("effettivo") slot and one
/// `Alternate` ("supplente") slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The primary representative, stored as `RDL`.
    #[serde(alias = "RDL", alias = "EFFETTIVO")]
    Primary,
    /// The backup representative, stored as `SUPPLENTE`.
    #[serde(alias = "SUPPLENTE")]
    Alternate,
}

impl Role {
    /// Both roles, primary first.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Alternate];

    /// Returns the storage code for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "RDL",
            Self::Alternate => "SUPPLENTE",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RDL" | "EFFETTIVO" | "PRIMARY" => Ok(Self::Primary),
            "SUPPLENTE" | "ALTERNATE" => Ok(Self::Alternate),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical voting section.
///
/// Section numbers are unique within a polling building, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The section identifier.
    pub id: SectionId,
    /// The section number.
    pub number: u32,
    /// The polling-building denomination ("plesso").
    pub building_name: String,
    /// The polling-building address.
    pub address: String,
    /// The owning municipality.
    pub municipality_id: MunicipalityId,
    /// The district ("municipio") number, set only in districted municipalities.
    #[serde(default)]
    pub district: Option<u32>,
    /// Whether the section is open in the current consultation.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Number of registered electors.
    #[serde(default)]
    pub elector_count: u32,
}

const fn default_active() -> bool {
    true
}

/// A person eligible for section assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    /// The representative identifier.
    pub id: RepresentativeId,
    /// Full display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Declared municipality ("comune").
    pub municipality_id: MunicipalityId,
    /// Declared district ("municipio"), if any.
    #[serde(default)]
    pub district: Option<u32>,
    /// Free-text seat preference.
    #[serde(default)]
    pub preference: String,
    /// Operator notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Representative {
    /// Counts the sections this representative currently holds, in any role.
    #[must_use]
    pub fn sections_held(&self, assignments: &[Assignment]) -> usize {
        assignments
            .iter()
            .filter(|a| a.representative_id == self.id)
            .count()
    }

    /// Returns true if the name or email contains `needle`, case-insensitively.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle: String = needle.to_lowercase();
        self.full_name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
    }
}

/// One representative holding one slot of one section.
///
/// Assignments are never mutated: changing an occupant is remove-then-assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The assignment identifier.
    pub id: AssignmentId,
    /// The assigned section.
    pub section_id: SectionId,
    /// The occupying representative.
    pub representative_id: RepresentativeId,
    /// The slot being held.
    pub role: Role,
}
