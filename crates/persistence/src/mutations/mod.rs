// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! - `reference`: one-shot seeding of territory and representatives
//! - `assignments`: slot assignment and removal

pub mod assignments;
pub mod reference;

/// Widens an unsigned domain value to a stored `INTEGER` column.
pub(crate) fn to_i32(column: &'static str, value: u32) -> Result<i32, crate::PersistenceError> {
    i32::try_from(value).map_err(|_| {
        crate::PersistenceError::InvalidReferenceData(format!("{column} out of range: {value}"))
    })
}
