// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use mappatura_domain::{MunicipalityId, Representative, RepresentativeId};
use tracing::debug;

use super::to_u32;
use crate::diesel_schema::representatives;
use crate::error::PersistenceError;

/// Diesel Queryable struct for representative rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = representatives)]
struct RepresentativeRow {
    representative_id: i64,
    full_name: String,
    email: String,
    phone: Option<String>,
    municipality_id: i64,
    district: Option<i32>,
    preference: String,
    notes: Option<String>,
}

impl RepresentativeRow {
    fn into_representative(self) -> Result<Representative, PersistenceError> {
        Ok(Representative {
            id: RepresentativeId::new(self.representative_id),
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            municipality_id: MunicipalityId::new(self.municipality_id),
            district: self
                .district
                .map(|d| to_u32("representatives.district", d))
                .transpose()?,
            preference: self.preference,
            notes: self.notes,
        })
    }
}

/// Lists every representative ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_representatives(
    conn: &mut SqliteConnection,
) -> Result<Vec<Representative>, PersistenceError> {
    representatives::table
        .order(representatives::representative_id.asc())
        .select(RepresentativeRow::as_select())
        .load(conn)?
        .into_iter()
        .map(RepresentativeRow::into_representative)
        .collect()
}

/// Retrieves a representative by id.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the representative is not found.
pub fn get_representative(
    conn: &mut SqliteConnection,
    representative_id: RepresentativeId,
) -> Result<Option<Representative>, PersistenceError> {
    debug!(%representative_id, "Looking up representative");

    representatives::table
        .filter(representatives::representative_id.eq(representative_id.value()))
        .select(RepresentativeRow::as_select())
        .first(conn)
        .optional()?
        .map(RepresentativeRow::into_representative)
        .transpose()
}
