// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::territory::Territory;
use crate::types::Representative;
use std::collections::HashSet;

/// Validates that a raw identifier is positive.
///
/// # Errors
///
/// Returns an error if `value` is zero or negative.
pub fn validate_identifier(field: &'static str, value: i64) -> Result<i64, DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidIdentifier { field, value });
    }
    Ok(value)
}

/// Validates the structural invariants of territorial reference data.
///
/// - every identifier is unique within its kind
/// - every province, municipality, district and section has an existing parent
/// - a section has a district only if its municipality is districted and
///   the district exists
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_territory(territory: &Territory) -> Result<(), DomainError> {
    let data = territory.data();

    let mut seen: HashSet<i64> = HashSet::new();
    for region in &data.regions {
        if !seen.insert(region.id.value()) {
            return Err(DomainError::DuplicateIdentifier {
                kind: "region",
                id: region.id.value(),
            });
        }
    }

    seen.clear();
    for province in &data.provinces {
        if !seen.insert(province.id.value()) {
            return Err(DomainError::DuplicateIdentifier {
                kind: "province",
                id: province.id.value(),
            });
        }
        if territory.region(province.region_id).is_none() {
            return Err(DomainError::NodeNotFound {
                level: "Region",
                id: province.region_id.value(),
            });
        }
    }

    seen.clear();
    for municipality in &data.municipalities {
        if !seen.insert(municipality.id.value()) {
            return Err(DomainError::DuplicateIdentifier {
                kind: "municipality",
                id: municipality.id.value(),
            });
        }
        if territory.province(municipality.province_id).is_none() {
            return Err(DomainError::NodeNotFound {
                level: "Province",
                id: municipality.province_id.value(),
            });
        }
    }

    for district in &data.districts {
        let districted = territory
            .municipality(district.municipality_id)
            .is_some_and(|m| m.is_districted);
        if !districted {
            return Err(DomainError::InvalidDistrict {
                municipality_id: district.municipality_id.value(),
                district: district.number,
            });
        }
    }

    seen.clear();
    for section in &data.sections {
        if !seen.insert(section.id.value()) {
            return Err(DomainError::DuplicateIdentifier {
                kind: "section",
                id: section.id.value(),
            });
        }
        let Some(municipality) = territory.municipality(section.municipality_id) else {
            return Err(DomainError::InvalidSection {
                section_id: section.id.value(),
                reason: format!("municipality {} does not exist", section.municipality_id),
            });
        };
        if let Some(number) = section.district {
            if !municipality.is_districted {
                return Err(DomainError::InvalidSection {
                    section_id: section.id.value(),
                    reason: format!(
                        "municipality '{}' is not districted but district {number} was given",
                        municipality.name
                    ),
                });
            }
            if territory.district(municipality.id, number).is_none() {
                return Err(DomainError::InvalidDistrict {
                    municipality_id: municipality.id.value(),
                    district: number,
                });
            }
        }
    }

    Ok(())
}

/// Validates a representative against the territory.
///
/// # Errors
///
/// Returns an error if the name is empty, the declared municipality does
/// not exist, or the declared district is not defined for it.
pub fn validate_representative(
    territory: &Territory,
    representative: &Representative,
) -> Result<(), DomainError> {
    if representative.full_name.trim().is_empty() {
        return Err(DomainError::InvalidRepresentative {
            representative_id: representative.id.value(),
            reason: String::from("name must not be empty"),
        });
    }
    if territory
        .municipality(representative.municipality_id)
        .is_none()
    {
        return Err(DomainError::InvalidRepresentative {
            representative_id: representative.id.value(),
            reason: format!(
                "declared municipality {} does not exist",
                representative.municipality_id
            ),
        });
    }
    if let Some(number) = representative.district
        && territory
            .district(representative.municipality_id, number)
            .is_none()
    {
        return Err(DomainError::InvalidDistrict {
            municipality_id: representative.municipality_id.value(),
            district: number,
        });
    }
    Ok(())
}
