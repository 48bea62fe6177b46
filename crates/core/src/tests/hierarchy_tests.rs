// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    ANNA, BRUNO, CARLA, DARIO, LAZIO, PERUGIA, ROMA, ROMA_PROVINCE, UMBRIA, create_test_engine,
    section_id,
};
use crate::{Cancellation, CoreError, HierarchyContent};
use mappatura_domain::{Level, ProvinceId, Role, Scope};

#[test]
fn test_root_lists_regions_with_aggregates() {
    let mut engine = create_test_engine();

    let view = engine.query_hierarchy(&Scope::root()).unwrap();

    assert_eq!(view.level, Level::Region);
    assert!(!view.auto_skip);
    let nodes = view.content.nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].name, "Lazio");
    assert_eq!(nodes[0].aggregates.total_sections, 9);
    assert_eq!(nodes[0].aggregates.available_representatives, 4);
    assert_eq!(nodes[1].name, "Umbria");
    assert_eq!(nodes[1].aggregates.total_sections, 1);
    assert_eq!(view.summary.total_sections, 10);
    assert_eq!(view.breadcrumbs.len(), 1);
}

#[test]
fn test_region_with_single_province_reports_auto_skip() {
    let mut engine = create_test_engine();

    let view = engine.query_hierarchy(&Scope::for_region(LAZIO)).unwrap();

    assert_eq!(view.level, Level::Province);
    assert!(view.auto_skip);
    assert_eq!(
        view.only_child().and_then(|s| s.province),
        Some(ROMA_PROVINCE)
    );
}

#[test]
fn test_partial_path_is_completed_with_ancestors() {
    let mut engine = create_test_engine();

    let view = engine.query_hierarchy(&Scope::for_municipality(ROMA)).unwrap();

    assert_eq!(view.level, Level::District);
    assert_eq!(view.scope.region, Some(LAZIO));
    assert_eq!(view.scope.province, Some(ROMA_PROVINCE));
    let labels: Vec<&str> = view.breadcrumbs.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Italia", "Lazio", "Roma", "Roma"]);
    assert_eq!(view.content.nodes().len(), 2);
}

#[test]
fn test_district_lists_sections_grouped_by_building() {
    let mut engine = create_test_engine();
    let cancellation = Cancellation::new();
    engine
        .assign(section_id(1), BRUNO, Role::Primary, &cancellation)
        .unwrap();
    engine
        .assign(section_id(2), DARIO, Role::Alternate, &cancellation)
        .unwrap();
    engine
        .assign(section_id(4), BRUNO, Role::Alternate, &cancellation)
        .unwrap();

    let view = engine
        .query_hierarchy(&Scope::for_municipality(ROMA).with_district(1))
        .unwrap();

    assert_eq!(view.level, Level::SectionList);
    assert!(!view.auto_skip);
    let HierarchyContent::Sections { buildings } = &view.content else {
        panic!("expected a section list");
    };
    assert_eq!(buildings.len(), 2);

    let tasso = &buildings[0];
    assert_eq!(tasso.building.name, "Liceo Tasso");
    assert_eq!(tasso.alternate_filled, 1);
    assert_eq!(tasso.warning_count, 1);

    let mazzini = &buildings[1];
    assert_eq!(mazzini.sections.len(), 3);
    assert_eq!(mazzini.primary_filled, 1);
    assert_eq!(mazzini.warning_count, 1);
    assert_eq!(mazzini.building.elector_count, 2100);

    let first = mazzini.sections[0].primary.as_ref().unwrap();
    assert_eq!(first.representative_name, "Bruno Rossi");
    assert!(first.flags.multi_plesso);
    assert!(!first.flags.territorio_mismatch);

    let orphan = mazzini.sections[1].alternate.as_ref().unwrap();
    assert_eq!(orphan.representative_id, DARIO);
    assert!(!orphan.flags.territorio_mismatch);
}

#[test]
fn test_territorio_mismatch_is_flagged() {
    let mut engine = create_test_engine();
    engine
        .assign(section_id(12), CARLA, Role::Primary, &Cancellation::new())
        .unwrap();

    let view = engine
        .query_hierarchy(&Scope::for_municipality(ROMA).with_district(3))
        .unwrap();

    let HierarchyContent::Sections { buildings } = &view.content else {
        panic!("expected a section list");
    };
    let slot = buildings[0].sections[0].primary.as_ref().unwrap();
    assert!(slot.flags.territorio_mismatch);
    assert!(!slot.flags.multi_plesso);
}

#[test]
fn test_aggregates_count_primary_slots_and_free_representatives() {
    let mut engine = create_test_engine();
    let cancellation = Cancellation::new();
    engine
        .assign(section_id(12), ANNA, Role::Primary, &cancellation)
        .unwrap();
    engine
        .assign(section_id(13), BRUNO, Role::Alternate, &cancellation)
        .unwrap();

    let view = engine
        .query_hierarchy(&Scope::for_municipality(ROMA).with_district(3))
        .unwrap();

    assert_eq!(view.summary.total_sections, 3);
    assert_eq!(view.summary.assigned_sections, 1);
    assert_eq!(view.summary.unassigned_sections, 2);
    assert_eq!(view.summary.available_representatives, 0);
}

#[test]
fn test_inconsistent_or_unknown_paths_fail() {
    let mut engine = create_test_engine();

    let inconsistent = Scope {
        region: Some(UMBRIA),
        province: Some(ROMA_PROVINCE),
        ..Scope::root()
    };
    assert!(matches!(
        engine.query_hierarchy(&inconsistent),
        Err(CoreError::Validation { field: "scope", .. })
    ));

    let unknown = Scope {
        province: Some(ProvinceId::new(999)),
        ..Scope::root()
    };
    assert_eq!(
        engine.query_hierarchy(&unknown),
        Err(CoreError::NotFound {
            resource: "Province",
            id: 999,
        })
    );

    let district_without_municipality = Scope {
        province: Some(PERUGIA),
        district: Some(1),
        ..Scope::root()
    };
    assert!(engine.query_hierarchy(&district_without_municipality).is_err());
}

#[test]
fn test_filter_matches_buildings_and_section_numbers() {
    let mut engine = create_test_engine();
    let view = engine
        .query_hierarchy(&Scope::for_municipality(ROMA).with_district(1))
        .unwrap();

    let by_building = view.content.filter("mazzini");
    assert_eq!(by_building.len(), 3);

    let by_number = view.content.filter("4");
    assert_eq!(by_number.len(), 1);

    assert_eq!(view.content.filter("  ").len(), 4);
    assert!(view.content.filter("zzz").is_empty());
}
