// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `territory`: regions, provinces, municipalities, districts, sections
//! - `representatives`: representative candidates
//! - `assignments`: slot lookups and assignment listings

pub mod assignments;
pub mod representatives;
pub mod territory;

/// Narrows a stored `INTEGER` column to an unsigned domain value.
pub(crate) fn to_u32(column: &'static str, value: i32) -> Result<u32, crate::PersistenceError> {
    u32::try_from(value).map_err(|_| {
        crate::PersistenceError::InvalidData(format!("{column} must not be negative, got {value}"))
    })
}
