// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{ROMA, create_test_territory};
use crate::{PollingBuilding, Scope, SectionId, group_buildings, normalize_label};

#[test]
fn test_sections_are_grouped_by_building() {
    let territory = create_test_territory();
    let scope = Scope::for_municipality(ROMA).with_district(1);

    let buildings: Vec<PollingBuilding> = group_buildings(territory.sections_in(&scope));

    assert_eq!(buildings.len(), 2);
    assert_eq!(buildings[0].name, "Liceo Tasso");
    assert_eq!(buildings[0].section_ids, vec![SectionId::new(4)]);
    assert_eq!(buildings[1].name, "Scuola Mazzini");
    assert_eq!(
        buildings[1].section_ids,
        vec![SectionId::new(1), SectionId::new(2), SectionId::new(3)]
    );
    assert_eq!(buildings[1].elector_count, 2400);
}

#[test]
fn test_same_name_in_different_municipalities_are_distinct_buildings() {
    let mut data = create_test_territory().data().clone();
    for section in &mut data.sections {
        section.building_name = String::from("Scuola");
        section.address = String::from("Piazza Centrale");
    }
    let territory = crate::Territory::new(data);

    let buildings = group_buildings(territory.sections());

    assert_eq!(buildings.len(), 2);
}

#[test]
fn test_normalize_label() {
    assert_eq!(normalize_label("  via   Roma\t12 "), "VIA ROMA 12");
}
