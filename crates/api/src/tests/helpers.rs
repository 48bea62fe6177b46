// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Arc;

use mappatura::AggregateCache;
use mappatura_persistence::Persistence;

use crate::{CreateAssignmentRequest, HierarchyQueryRequest, load_fixture};

pub const DEMO_FIXTURE: &str = include_str!("../../../../fixtures/demo.json");

pub const ANNA: i64 = 1;
pub const BRUNO: i64 = 2;
pub const CARLA: i64 = 3;

pub fn create_test_context() -> (Persistence, Arc<AggregateCache>) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let cache = Arc::new(AggregateCache::new());
    load_fixture(&mut persistence, &cache, DEMO_FIXTURE).unwrap();
    (persistence, cache)
}

pub fn roma_district(district: u32) -> HierarchyQueryRequest {
    HierarchyQueryRequest {
        municipality: Some(100),
        district: Some(district),
        ..HierarchyQueryRequest::default()
    }
}

pub fn assign_request(section_id: i64, representative_id: i64, role: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        section_id,
        representative_id,
        role: role.to_string(),
    }
}
