// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod assignment_tests;

use crate::{Persistence, ReferenceData};

pub const DEMO_FIXTURE: &str = include_str!("../../../../fixtures/demo.json");

pub fn create_test_reference_data() -> ReferenceData {
    ReferenceData::from_json(DEMO_FIXTURE).unwrap()
}

pub fn create_seeded_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .seed_reference_data(&create_test_reference_data())
        .unwrap();
    persistence
}
