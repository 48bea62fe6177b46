// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Territorial reference data queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use mappatura_domain::{
    District, Municipality, MunicipalityId, Province, ProvinceId, Region, RegionId, Section,
    SectionId, TerritoryData,
};
use tracing::debug;

use super::to_u32;
use crate::diesel_schema::{districts, municipalities, provinces, regions, sections};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = regions)]
struct RegionRow {
    region_id: i64,
    name: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = provinces)]
struct ProvinceRow {
    province_id: i64,
    region_id: i64,
    name: String,
    code: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = municipalities)]
struct MunicipalityRow {
    municipality_id: i64,
    province_id: i64,
    name: String,
    is_districted: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = districts)]
struct DistrictRow {
    municipality_id: i64,
    number: i32,
    name: String,
}

/// Diesel Queryable struct for section rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sections)]
struct SectionRow {
    section_id: i64,
    municipality_id: i64,
    district: Option<i32>,
    number: i32,
    building_name: String,
    address: String,
    is_active: i32,
    elector_count: i32,
}

impl SectionRow {
    fn into_section(self) -> Result<Section, PersistenceError> {
        Ok(Section {
            id: SectionId::new(self.section_id),
            number: to_u32("sections.number", self.number)?,
            building_name: self.building_name,
            address: self.address,
            municipality_id: MunicipalityId::new(self.municipality_id),
            district: self
                .district
                .map(|d| to_u32("sections.district", d))
                .transpose()?,
            is_active: self.is_active != 0,
            elector_count: to_u32("sections.elector_count", self.elector_count)?,
        })
    }
}

/// Loads every territorial table.
///
/// # Errors
///
/// Returns an error if a query fails or a stored value is out of range.
pub fn load_territory(conn: &mut SqliteConnection) -> Result<TerritoryData, PersistenceError> {
    let regions: Vec<Region> = regions::table
        .select(RegionRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| Region {
            id: RegionId::new(row.region_id),
            name: row.name,
        })
        .collect();

    let provinces: Vec<Province> = provinces::table
        .select(ProvinceRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| Province {
            id: ProvinceId::new(row.province_id),
            region_id: RegionId::new(row.region_id),
            name: row.name,
            code: row.code,
        })
        .collect();

    let municipalities: Vec<Municipality> = municipalities::table
        .select(MunicipalityRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| Municipality {
            id: MunicipalityId::new(row.municipality_id),
            province_id: ProvinceId::new(row.province_id),
            name: row.name,
            is_districted: row.is_districted != 0,
        })
        .collect();

    let districts: Vec<District> = districts::table
        .select(DistrictRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| {
            Ok(District {
                municipality_id: MunicipalityId::new(row.municipality_id),
                number: to_u32("districts.number", row.number)?,
                name: row.name,
            })
        })
        .collect::<Result<_, PersistenceError>>()?;

    let sections: Vec<Section> = sections::table
        .select(SectionRow::as_select())
        .load(conn)?
        .into_iter()
        .map(SectionRow::into_section)
        .collect::<Result<_, PersistenceError>>()?;

    debug!(
        regions = regions.len(),
        provinces = provinces.len(),
        municipalities = municipalities.len(),
        sections = sections.len(),
        "Loaded territory"
    );

    Ok(TerritoryData {
        regions,
        provinces,
        municipalities,
        districts,
        sections,
    })
}

/// Returns true if a section with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn section_exists(
    conn: &mut SqliteConnection,
    section_id: SectionId,
) -> Result<bool, PersistenceError> {
    let count: i64 = sections::table
        .filter(sections::section_id.eq(section_id.value()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Counts stored regions.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_regions(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(regions::table.count().get_result(conn)?)
}
