// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data seeding.
//!
//! Reference data is written once into an empty database. There is no
//! update path: territory and representatives are read-only afterwards.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use super::to_i32;
use crate::data_models::ReferenceData;
use crate::diesel_schema::{
    districts, municipalities, provinces, regions, representatives, sections,
};
use crate::error::PersistenceError;
use crate::queries::territory::count_regions;

/// Validates and inserts reference data in a single transaction.
///
/// # Errors
///
/// Returns `AlreadySeeded` if any region is already stored, an
/// `InvalidReferenceData` error if validation fails, or a database error if
/// an insert fails. Nothing is written on error.
pub fn seed_reference_data(
    conn: &mut SqliteConnection,
    data: &ReferenceData,
) -> Result<(), PersistenceError> {
    data.validate()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if count_regions(conn)? > 0 {
            return Err(PersistenceError::AlreadySeeded);
        }

        let territory = &data.territory;

        for region in &territory.regions {
            diesel::insert_into(regions::table)
                .values((
                    regions::region_id.eq(region.id.value()),
                    regions::name.eq(&region.name),
                ))
                .execute(conn)?;
        }

        for province in &territory.provinces {
            diesel::insert_into(provinces::table)
                .values((
                    provinces::province_id.eq(province.id.value()),
                    provinces::region_id.eq(province.region_id.value()),
                    provinces::name.eq(&province.name),
                    provinces::code.eq(&province.code),
                ))
                .execute(conn)?;
        }

        for municipality in &territory.municipalities {
            diesel::insert_into(municipalities::table)
                .values((
                    municipalities::municipality_id.eq(municipality.id.value()),
                    municipalities::province_id.eq(municipality.province_id.value()),
                    municipalities::name.eq(&municipality.name),
                    municipalities::is_districted.eq(i32::from(municipality.is_districted)),
                ))
                .execute(conn)?;
        }

        for district in &territory.districts {
            diesel::insert_into(districts::table)
                .values((
                    districts::municipality_id.eq(district.municipality_id.value()),
                    districts::number.eq(to_i32("districts.number", district.number)?),
                    districts::name.eq(&district.name),
                ))
                .execute(conn)?;
        }

        for section in &territory.sections {
            let district: Option<i32> = section
                .district
                .map(|d| to_i32("sections.district", d))
                .transpose()?;
            diesel::insert_into(sections::table)
                .values((
                    sections::section_id.eq(section.id.value()),
                    sections::municipality_id.eq(section.municipality_id.value()),
                    sections::district.eq(district),
                    sections::number.eq(to_i32("sections.number", section.number)?),
                    sections::building_name.eq(&section.building_name),
                    sections::address.eq(&section.address),
                    sections::is_active.eq(i32::from(section.is_active)),
                    sections::elector_count
                        .eq(to_i32("sections.elector_count", section.elector_count)?),
                ))
                .execute(conn)?;
        }

        for representative in &data.representatives {
            let district: Option<i32> = representative
                .district
                .map(|d| to_i32("representatives.district", d))
                .transpose()?;
            diesel::insert_into(representatives::table)
                .values((
                    representatives::representative_id.eq(representative.id.value()),
                    representatives::full_name.eq(&representative.full_name),
                    representatives::email.eq(&representative.email),
                    representatives::phone.eq(representative.phone.as_deref()),
                    representatives::municipality_id
                        .eq(representative.municipality_id.value()),
                    representatives::district.eq(district),
                    representatives::preference.eq(&representative.preference),
                    representatives::notes.eq(representative.notes.as_deref()),
                ))
                .execute(conn)?;
        }

        Ok(())
    })?;

    info!(
        regions = data.territory.regions.len(),
        provinces = data.territory.provinces.len(),
        municipalities = data.territory.municipalities.len(),
        sections = data.territory.sections.len(),
        representatives = data.representatives.len(),
        "Reference data seeded"
    );

    Ok(())
}
