// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::scope::Scope;
use crate::types::{MunicipalityId, ProvinceId, RegionId, Section, SectionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// The region identifier.
    pub id: RegionId,
    /// Display name.
    pub name: String,
}

/// A province within a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    /// The province identifier.
    pub id: ProvinceId,
    /// The owning region.
    pub region_id: RegionId,
    /// Display name.
    pub name: String,
    /// Two-letter vehicle code (e.g. `RM`).
    #[serde(default)]
    pub code: String,
}

/// A municipality within a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    /// The municipality identifier.
    pub id: MunicipalityId,
    /// The owning province.
    pub province_id: ProvinceId,
    /// Display name.
    pub name: String,
    /// Whether the municipality is split into districts.
    #[serde(default)]
    pub is_districted: bool,
}

/// A sub-municipal district ("municipio"), identified by its number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    /// The owning municipality.
    pub municipality_id: MunicipalityId,
    /// The district number, unique within the municipality.
    pub number: u32,
    /// Display name (e.g. `Municipio III`).
    pub name: String,
}

/// Plain territorial reference data, as loaded from storage or a fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryData {
    /// All regions.
    #[serde(default)]
    pub regions: Vec<Region>,
    /// All provinces.
    #[serde(default)]
    pub provinces: Vec<Province>,
    /// All municipalities.
    #[serde(default)]
    pub municipalities: Vec<Municipality>,
    /// All districts.
    #[serde(default)]
    pub districts: Vec<District>,
    /// All sections.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Indexed, read-only territorial hierarchy.
///
/// Region → Province → Municipality → District → Section. Children are kept
/// in display order (by name, sections by number).
#[derive(Debug, Clone, Default)]
pub struct Territory {
    data: TerritoryData,
    region_index: HashMap<RegionId, usize>,
    province_index: HashMap<ProvinceId, usize>,
    municipality_index: HashMap<MunicipalityId, usize>,
    section_index: HashMap<SectionId, usize>,
}

impl Territory {
    /// Builds the indexes over the given reference data.
    ///
    /// No structural validation is performed here; see
    /// [`crate::validate_territory`].
    #[must_use]
    pub fn new(mut data: TerritoryData) -> Self {
        data.regions.sort_by(|a, b| a.name.cmp(&b.name));
        data.provinces.sort_by(|a, b| a.name.cmp(&b.name));
        data.municipalities.sort_by(|a, b| a.name.cmp(&b.name));
        data.districts
            .sort_by_key(|d| (d.municipality_id, d.number));
        data.sections.sort_by(|a, b| {
            (a.municipality_id, a.number, &a.building_name)
                .cmp(&(b.municipality_id, b.number, &b.building_name))
        });

        let region_index = data
            .regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();
        let province_index = data
            .provinces
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        let municipality_index = data
            .municipalities
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();
        let section_index = data
            .sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();

        Self {
            data,
            region_index,
            province_index,
            municipality_index,
            section_index,
        }
    }

    /// Returns the underlying reference data.
    #[must_use]
    pub const fn data(&self) -> &TerritoryData {
        &self.data
    }

    /// Returns all regions.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.data.regions
    }

    /// Returns all sections.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.data.sections
    }

    /// Looks up a region.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.region_index.get(&id).map(|&i| &self.data.regions[i])
    }

    /// Looks up a province.
    #[must_use]
    pub fn province(&self, id: ProvinceId) -> Option<&Province> {
        self.province_index.get(&id).map(|&i| &self.data.provinces[i])
    }

    /// Looks up a municipality.
    #[must_use]
    pub fn municipality(&self, id: MunicipalityId) -> Option<&Municipality> {
        self.municipality_index
            .get(&id)
            .map(|&i| &self.data.municipalities[i])
    }

    /// Looks up a district by municipality and number.
    #[must_use]
    pub fn district(&self, municipality_id: MunicipalityId, number: u32) -> Option<&District> {
        self.data
            .districts
            .iter()
            .find(|d| d.municipality_id == municipality_id && d.number == number)
    }

    /// Looks up a section.
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.section_index.get(&id).map(|&i| &self.data.sections[i])
    }

    /// Returns the provinces of a region.
    pub fn provinces_of(&self, region_id: RegionId) -> impl Iterator<Item = &Province> {
        self.data
            .provinces
            .iter()
            .filter(move |p| p.region_id == region_id)
    }

    /// Returns the municipalities of a province.
    pub fn municipalities_of(&self, province_id: ProvinceId) -> impl Iterator<Item = &Municipality> {
        self.data
            .municipalities
            .iter()
            .filter(move |m| m.province_id == province_id)
    }

    /// Returns the districts of a municipality.
    pub fn districts_of(&self, municipality_id: MunicipalityId) -> impl Iterator<Item = &District> {
        self.data
            .districts
            .iter()
            .filter(move |d| d.municipality_id == municipality_id)
    }

    /// Returns the region and province owning a municipality.
    #[must_use]
    pub fn ancestry(&self, municipality_id: MunicipalityId) -> Option<(RegionId, ProvinceId)> {
        let municipality = self.municipality(municipality_id)?;
        let province = self.province(municipality.province_id)?;
        Some((province.region_id, province.id))
    }

    /// Returns true if a declared `(municipality, district)` lies within `scope`.
    ///
    /// Used both for sections and for representatives' declared territory.
    #[must_use]
    pub fn place_in_scope(
        &self,
        municipality_id: MunicipalityId,
        district: Option<u32>,
        scope: &Scope,
    ) -> bool {
        if let Some(wanted) = scope.municipality {
            if wanted != municipality_id {
                return false;
            }
            return scope.district.is_none_or(|d| district == Some(d));
        }
        let Some((region_id, province_id)) = self.ancestry(municipality_id) else {
            return false;
        };
        scope.region.is_none_or(|r| r == region_id)
            && scope.province.is_none_or(|p| p == province_id)
    }

    /// Returns the sections lying within `scope`, in number order.
    pub fn sections_in<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a Section> + 'a {
        self.data
            .sections
            .iter()
            .filter(move |s| self.place_in_scope(s.municipality_id, s.district, scope))
    }

    /// Completes a partial scope with the ancestors implied by its deepest
    /// component and checks that every component belongs to its parent.
    ///
    /// # Errors
    ///
    /// Returns an error if a component does not exist, if a component does
    /// not belong to the given parent, or if a district is given without a
    /// municipality.
    pub fn resolve_scope(&self, scope: &Scope) -> Result<Scope, DomainError> {
        let mut resolved: Scope = *scope;

        if let Some(municipality_id) = scope.municipality {
            let municipality =
                self.municipality(municipality_id)
                    .ok_or(DomainError::NodeNotFound {
                        level: "Municipality",
                        id: municipality_id.value(),
                    })?;
            if scope
                .province
                .is_some_and(|p| p != municipality.province_id)
            {
                return Err(DomainError::InconsistentScope(format!(
                    "municipality {municipality_id} does not belong to the given province"
                )));
            }
            resolved.province = Some(municipality.province_id);

            if let Some(number) = scope.district
                && (!municipality.is_districted || self.district(municipality_id, number).is_none())
            {
                return Err(DomainError::InvalidDistrict {
                    municipality_id: municipality_id.value(),
                    district: number,
                });
            }
        } else if scope.district.is_some() {
            return Err(DomainError::InconsistentScope(String::from(
                "a district requires a municipality",
            )));
        }

        if let Some(province_id) = resolved.province {
            let province = self
                .province(province_id)
                .ok_or(DomainError::NodeNotFound {
                    level: "Province",
                    id: province_id.value(),
                })?;
            if scope.region.is_some_and(|r| r != province.region_id) {
                return Err(DomainError::InconsistentScope(format!(
                    "province {province_id} does not belong to the given region"
                )));
            }
            resolved.region = Some(province.region_id);
        }

        if let Some(region_id) = resolved.region
            && self.region(region_id).is_none()
        {
            return Err(DomainError::NodeNotFound {
                level: "Region",
                id: region_id.value(),
            });
        }

        Ok(resolved)
    }
}

impl From<TerritoryData> for Territory {
    fn from(data: TerritoryData) -> Self {
        Self::new(data)
    }
}
