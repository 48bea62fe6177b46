// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mappatura::HierarchyContent;
use mappatura_domain::{Level, NumberRange};

use super::helpers::{ANNA, BRUNO, create_test_context, roma_district};
use crate::{
    AnalyzePreferencesRequest, ApiError, HierarchyQueryRequest, SearchRepresentativesRequest,
    analyze_preferences, query_hierarchy, search_representatives,
};

#[test]
fn test_root_lists_regions() {
    let (mut persistence, cache) = create_test_context();

    let response =
        query_hierarchy(&mut persistence, &cache, &HierarchyQueryRequest::default()).unwrap();

    assert_eq!(response.level, Level::Region);
    assert_eq!(response.items.len(), 2);
    assert!(!response.auto_skip);
    assert_eq!(response.breadcrumbs.len(), 1);
}

#[test]
fn test_region_with_single_province_flags_auto_skip() {
    let (mut persistence, cache) = create_test_context();
    let request = HierarchyQueryRequest {
        region: Some(1),
        ..HierarchyQueryRequest::default()
    };

    let response = query_hierarchy(&mut persistence, &cache, &request).unwrap();

    assert_eq!(response.level, Level::Province);
    assert!(response.auto_skip);
}

#[test]
fn test_district_lists_sections_by_building() {
    let (mut persistence, cache) = create_test_context();

    let response = query_hierarchy(&mut persistence, &cache, &roma_district(3)).unwrap();

    assert_eq!(response.level, Level::SectionList);
    assert_eq!(response.summary.total_sections, 3);
    match response.items {
        HierarchyContent::Sections { buildings } => {
            assert_eq!(buildings.len(), 1);
            assert_eq!(buildings[0].building.name, "Scuola Pascoli");
            assert_eq!(buildings[0].sections.len(), 3);
        }
        HierarchyContent::Nodes { .. } => panic!("expected sections"),
    }
}

#[test]
fn test_unknown_municipality_is_not_found() {
    let (mut persistence, cache) = create_test_context();
    let request = HierarchyQueryRequest {
        municipality: Some(999),
        ..HierarchyQueryRequest::default()
    };

    let result = query_hierarchy(&mut persistence, &cache, &request);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_non_positive_identifier_is_invalid_input() {
    let (mut persistence, cache) = create_test_context();
    let request = HierarchyQueryRequest {
        region: Some(0),
        ..HierarchyQueryRequest::default()
    };

    let result = query_hierarchy(&mut persistence, &cache, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "region_id"
    ));
}

#[test]
fn test_zero_district_is_invalid_input() {
    let (mut persistence, cache) = create_test_context();

    let result = query_hierarchy(&mut persistence, &cache, &roma_district(0));

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_search_includes_municipality_level_representatives() {
    let (mut persistence, cache) = create_test_context();
    let request = SearchRepresentativesRequest {
        scope: roma_district(3),
        filter: None,
    };

    let response = search_representatives(&mut persistence, &cache, &request).unwrap();

    let names: Vec<&str> = response
        .representatives
        .iter()
        .map(|r| r.full_name.as_str())
        .collect();
    assert_eq!(names, vec!["Anna Bianchi", "Dario Neri"]);
    assert!(response.representatives.iter().all(|r| r.sections_held == 0));
}

#[test]
fn test_search_filter_matches_email() {
    let (mut persistence, cache) = create_test_context();
    let request = SearchRepresentativesRequest {
        scope: HierarchyQueryRequest::default(),
        filter: Some(String::from("BRUNO.ROSSI@")),
    };

    let response = search_representatives(&mut persistence, &cache, &request).unwrap();

    assert_eq!(response.representatives.len(), 1);
    assert_eq!(response.representatives[0].representative_id, BRUNO);
}

#[test]
fn test_analyze_stored_preference_partitions_sections() {
    let (mut persistence, cache) = create_test_context();
    let request = AnalyzePreferencesRequest {
        representative_id: ANNA,
        preference_text: None,
    };

    let response = analyze_preferences(&mut persistence, &cache, &request).unwrap();

    assert_eq!(response.requested, vec![12, 13, 14, 15, 16, 17, 18]);
    assert_eq!(response.matched_sections.len(), 3);
    assert!(response.already_assigned.is_empty());
    assert_eq!(response.unmatched, vec![15, 16, 17, 18]);
}

#[test]
fn test_analyze_no_preference_matches_nothing() {
    let (mut persistence, cache) = create_test_context();
    let request = AnalyzePreferencesRequest {
        representative_id: BRUNO,
        preference_text: Some(String::from("nessuna preferenza")),
    };

    let response = analyze_preferences(&mut persistence, &cache, &request).unwrap();

    assert!(response.requested.is_empty());
    assert!(response.matched_sections.is_empty());
}

#[test]
fn test_analyze_reports_ranges_too_wide_to_expand() {
    let (mut persistence, cache) = create_test_context();
    let request = AnalyzePreferencesRequest {
        representative_id: ANNA,
        preference_text: Some(String::from("sezioni 1-50000 oppure 12")),
    };

    let response = analyze_preferences(&mut persistence, &cache, &request).unwrap();

    assert_eq!(response.requested, vec![12]);
    assert_eq!(response.matched_sections.len(), 1);
    assert_eq!(
        response.oversized_ranges,
        vec![NumberRange {
            low: 1,
            high: 50_000
        }]
    );
}

#[test]
fn test_analyze_unknown_representative_is_not_found() {
    let (mut persistence, cache) = create_test_context();
    let request = AnalyzePreferencesRequest {
        representative_id: 404,
        preference_text: None,
    };

    let result = analyze_preferences(&mut persistence, &cache, &request);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
