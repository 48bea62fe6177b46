// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Assignment, AssignmentId, District, Municipality, MunicipalityId, Province, ProvinceId, Region,
    RegionId, Representative, RepresentativeId, Role, Section, SectionId, Territory,
    TerritoryData,
};

pub const LAZIO: RegionId = RegionId::new(1);
pub const ROMA_PROVINCE: ProvinceId = ProvinceId::new(10);
pub const ROMA: MunicipalityId = MunicipalityId::new(100);
pub const FRASCATI: MunicipalityId = MunicipalityId::new(101);

pub fn create_test_section(
    id: i64,
    number: u32,
    municipality_id: MunicipalityId,
    district: Option<u32>,
    building: &str,
) -> Section {
    Section {
        id: SectionId::new(id),
        number,
        building_name: building.to_string(),
        address: format!("Via {building} 1"),
        municipality_id,
        district,
        is_active: true,
        elector_count: 800,
    }
}

/// One region, one province, Roma (districted, two districts) and Frascati.
///
/// Roma district 1: sections 1-3 in "Scuola Mazzini", section 4 in "Liceo Tasso".
/// Roma district 3: sections 12-14 in "Scuola Pascoli".
/// Frascati: sections 1-2 in "Scuola Verdi".
pub fn create_test_territory() -> Territory {
    Territory::new(TerritoryData {
        regions: vec![Region {
            id: LAZIO,
            name: String::from("Lazio"),
        }],
        provinces: vec![Province {
            id: ROMA_PROVINCE,
            region_id: LAZIO,
            name: String::from("Roma"),
            code: String::from("RM"),
        }],
        municipalities: vec![
            Municipality {
                id: ROMA,
                province_id: ROMA_PROVINCE,
                name: String::from("Roma"),
                is_districted: true,
            },
            Municipality {
                id: FRASCATI,
                province_id: ROMA_PROVINCE,
                name: String::from("Frascati"),
                is_districted: false,
            },
        ],
        districts: vec![
            District {
                municipality_id: ROMA,
                number: 1,
                name: String::from("Municipio I"),
            },
            District {
                municipality_id: ROMA,
                number: 3,
                name: String::from("Municipio III"),
            },
        ],
        sections: vec![
            create_test_section(1, 1, ROMA, Some(1), "Scuola Mazzini"),
            create_test_section(2, 2, ROMA, Some(1), "Scuola Mazzini"),
            create_test_section(3, 3, ROMA, Some(1), "Scuola Mazzini"),
            create_test_section(4, 4, ROMA, Some(1), "Liceo Tasso"),
            create_test_section(12, 12, ROMA, Some(3), "Scuola Pascoli"),
            create_test_section(13, 13, ROMA, Some(3), "Scuola Pascoli"),
            create_test_section(14, 14, ROMA, Some(3), "Scuola Pascoli"),
            create_test_section(21, 1, FRASCATI, None, "Scuola Verdi"),
            create_test_section(22, 2, FRASCATI, None, "Scuola Verdi"),
        ],
    })
}

pub fn create_test_representative(
    id: i64,
    municipality_id: MunicipalityId,
    district: Option<u32>,
) -> Representative {
    Representative {
        id: RepresentativeId::new(id),
        full_name: format!("Rappresentante {id}"),
        email: format!("rdl{id}@example.org"),
        phone: None,
        municipality_id,
        district,
        preference: String::new(),
        notes: None,
    }
}

pub fn create_test_assignment(id: i64, section: i64, representative: i64, role: Role) -> Assignment {
    Assignment {
        id: AssignmentId::new(id),
        section_id: SectionId::new(section),
        representative_id: RepresentativeId::new(representative),
        role,
    }
}
