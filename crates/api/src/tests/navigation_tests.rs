// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mappatura::{DEFAULT_MAX_AUTO_SKIP, NavigationAction};
use mappatura_domain::{Level, MunicipalityId, RegionId, Scope};

use super::helpers::{create_test_context, roma_district};
use crate::{
    ApiError, HierarchyQueryRequest, LoadFixtureResponse, NavigateRequest, load_fixture, navigate,
};

fn request(path: HierarchyQueryRequest, action: NavigationAction) -> NavigateRequest {
    NavigateRequest { path, action }
}

#[test]
fn test_refresh_at_root_lists_regions() {
    let (mut persistence, cache) = create_test_context();

    let response = navigate(
        &mut persistence,
        &cache,
        &request(HierarchyQueryRequest::default(), NavigationAction::Refresh),
        DEFAULT_MAX_AUTO_SKIP,
    )
    .unwrap();

    assert_eq!(response.state.path, Scope::root());
    assert_eq!(response.state.level, Level::Region);
    assert_eq!(response.view.items.len(), 2);
}

#[test]
fn test_drill_down_skips_single_child_levels() {
    let (mut persistence, cache) = create_test_context();
    let umbria = Scope::for_region(RegionId::new(2));

    let response = navigate(
        &mut persistence,
        &cache,
        &request(
            HierarchyQueryRequest::default(),
            NavigationAction::DrillDown { scope: umbria },
        ),
        DEFAULT_MAX_AUTO_SKIP,
    )
    .unwrap();

    assert_eq!(
        response.state.path.municipality,
        Some(MunicipalityId::new(200))
    );
    assert_eq!(response.state.level, Level::SectionList);
    assert_eq!(response.view.summary.total_sections, 1);
}

#[test]
fn test_auto_skip_limit_zero_stops_at_requested_level() {
    let (mut persistence, cache) = create_test_context();

    let response = navigate(
        &mut persistence,
        &cache,
        &request(
            HierarchyQueryRequest::default(),
            NavigationAction::DrillDown {
                scope: Scope::for_region(RegionId::new(1)),
            },
        ),
        0,
    )
    .unwrap();

    assert_eq!(response.state.level, Level::Province);
    assert!(response.view.auto_skip);
}

#[test]
fn test_back_from_district_returns_to_municipality() {
    let (mut persistence, cache) = create_test_context();

    let response = navigate(
        &mut persistence,
        &cache,
        &request(roma_district(3), NavigationAction::Back),
        DEFAULT_MAX_AUTO_SKIP,
    )
    .unwrap();

    assert_eq!(response.state.level, Level::District);
    assert_eq!(response.state.path.district, None);
    assert_eq!(
        response.state.path.municipality,
        Some(MunicipalityId::new(100))
    );
}

#[test]
fn test_back_skips_levels_that_were_skipped_forward() {
    let (mut persistence, cache) = create_test_context();
    let assisi = HierarchyQueryRequest {
        region: Some(2),
        province: Some(20),
        municipality: Some(200),
        district: None,
    };

    let response = navigate(
        &mut persistence,
        &cache,
        &request(assisi, NavigationAction::Back),
        DEFAULT_MAX_AUTO_SKIP,
    )
    .unwrap();

    assert_eq!(response.state.path, Scope::root());
    assert_eq!(response.state.level, Level::Region);
}

#[test]
fn test_drill_down_outside_path_is_rejected() {
    let (mut persistence, cache) = create_test_context();
    let frascati = Scope::for_municipality(MunicipalityId::new(101));

    let result = navigate(
        &mut persistence,
        &cache,
        &request(
            roma_district(3),
            NavigationAction::DrillDown { scope: frascati },
        ),
        DEFAULT_MAX_AUTO_SKIP,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "scope"
    ));
}

#[test]
fn test_navigate_request_deserializes_flattened_action() {
    let json = r#"{"path":{"region":1},"action":"back"}"#;

    let parsed: NavigateRequest = serde_json::from_str(json).unwrap();

    assert_eq!(parsed.action, NavigationAction::Back);
    assert_eq!(parsed.path.region, Some(1));
}

#[test]
fn test_fixture_loads_once() {
    let (mut persistence, cache) = create_test_context();

    let result = load_fixture(&mut persistence, &cache, super::helpers::DEMO_FIXTURE);

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_fixture_counts_records() {
    let mut persistence = mappatura_persistence::Persistence::new_in_memory().unwrap();
    let cache = std::sync::Arc::new(mappatura::AggregateCache::new());

    let loaded: LoadFixtureResponse =
        load_fixture(&mut persistence, &cache, super::helpers::DEMO_FIXTURE).unwrap();

    assert_eq!(loaded.regions, 2);
    assert_eq!(loaded.municipalities, 3);
    assert_eq!(loaded.sections, 11);
    assert_eq!(loaded.representatives, 4);
}
