// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AggregateCache, MappingEngine, MemoryRepository};
use mappatura_domain::{
    District, Municipality, MunicipalityId, Province, ProvinceId, Region, RegionId,
    Representative, RepresentativeId, Section, SectionId, Territory, TerritoryData,
};
use std::sync::Arc;

pub const LAZIO: RegionId = RegionId::new(1);
pub const UMBRIA: RegionId = RegionId::new(2);
pub const ROMA_PROVINCE: ProvinceId = ProvinceId::new(10);
pub const PERUGIA: ProvinceId = ProvinceId::new(20);
pub const ROMA: MunicipalityId = MunicipalityId::new(100);
pub const FRASCATI: MunicipalityId = MunicipalityId::new(101);
pub const ASSISI: MunicipalityId = MunicipalityId::new(200);

pub const ANNA: RepresentativeId = RepresentativeId::new(1);
pub const BRUNO: RepresentativeId = RepresentativeId::new(2);
pub const CARLA: RepresentativeId = RepresentativeId::new(3);
pub const DARIO: RepresentativeId = RepresentativeId::new(4);

pub fn section_id(id: i64) -> SectionId {
    SectionId::new(id)
}

fn section(
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
        elector_count: 700,
    }
}

/// Lazio has a single province holding Roma (districts 1 and 3) and
/// Frascati. Umbria has a single province holding only Assisi.
///
/// Roma district 1: sections 1-3 in "Scuola Mazzini", section 4 in "Liceo Tasso".
/// Roma district 3: sections 12-14 in "Scuola Pascoli".
/// Frascati: sections 1-2 in "Scuola Verdi". Assisi: section 1 in "Scuola Giotto".
pub fn create_test_territory() -> Territory {
    Territory::new(TerritoryData {
        regions: vec![
            Region {
                id: LAZIO,
                name: String::from("Lazio"),
            },
            Region {
                id: UMBRIA,
                name: String::from("Umbria"),
            },
        ],
        provinces: vec![
            Province {
                id: ROMA_PROVINCE,
                region_id: LAZIO,
                name: String::from("Roma"),
                code: String::from("RM"),
            },
            Province {
                id: PERUGIA,
                region_id: UMBRIA,
                name: String::from("Perugia"),
                code: String::from("PG"),
            },
        ],
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
            Municipality {
                id: ASSISI,
                province_id: PERUGIA,
                name: String::from("Assisi"),
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
            section(1, 1, ROMA, Some(1), "Scuola Mazzini"),
            section(2, 2, ROMA, Some(1), "Scuola Mazzini"),
            section(3, 3, ROMA, Some(1), "Scuola Mazzini"),
            section(4, 4, ROMA, Some(1), "Liceo Tasso"),
            section(12, 12, ROMA, Some(3), "Scuola Pascoli"),
            section(13, 13, ROMA, Some(3), "Scuola Pascoli"),
            section(14, 14, ROMA, Some(3), "Scuola Pascoli"),
            section(21, 1, FRASCATI, None, "Scuola Verdi"),
            section(22, 2, FRASCATI, None, "Scuola Verdi"),
            section(31, 1, ASSISI, None, "Scuola Giotto"),
        ],
    })
}

fn representative(
    id: RepresentativeId,
    name: &str,
    municipality_id: MunicipalityId,
    district: Option<u32>,
    preference: &str,
) -> Representative {
    Representative {
        id,
        full_name: name.to_string(),
        email: format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
        phone: None,
        municipality_id,
        district,
        preference: preference.to_string(),
        notes: None,
    }
}

pub fn create_test_representatives() -> Vec<Representative> {
    vec![
        representative(ANNA, "Anna Bianchi", ROMA, Some(3), "Municipio III, sezioni 12-18"),
        representative(BRUNO, "Bruno Rossi", ROMA, Some(1), "sezione 1 e 4"),
        representative(CARLA, "Carla Verdi", FRASCATI, None, ""),
        representative(DARIO, "Dario Neri", ROMA, None, "nessuna preferenza"),
    ]
}

pub fn create_test_repository() -> MemoryRepository {
    MemoryRepository::new(create_test_territory(), create_test_representatives())
}

pub fn create_test_engine() -> MappingEngine<MemoryRepository> {
    MappingEngine::new(create_test_repository(), Arc::new(AggregateCache::new()))
}
