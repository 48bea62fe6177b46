// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{FRASCATI, LAZIO, ROMA, UMBRIA};
use crate::{AggregateCache, Aggregates, StoreEvent, StoreListener};
use mappatura_domain::{Assignment, AssignmentId, RepresentativeId, Role, Scope, SectionId};

fn counters(total: usize) -> Aggregates {
    Aggregates {
        total_sections: total,
        assigned_sections: 0,
        unassigned_sections: total,
        available_representatives: 0,
    }
}

#[test]
fn test_get_or_insert_computes_once() {
    let cache = AggregateCache::new();
    let mut calls = 0;

    let first = cache.get_or_insert_with(Scope::root(), || {
        calls += 1;
        counters(10)
    });
    let second = cache.get_or_insert_with(Scope::root(), || {
        calls += 1;
        counters(99)
    });

    assert_eq!(first, second);
    assert_eq!(calls, 1);
}

#[test]
fn test_invalidate_drops_ancestors_and_descendants_only() {
    let cache = AggregateCache::new();
    let roma = Scope {
        region: Some(LAZIO),
        ..Scope::for_municipality(ROMA)
    };
    let district = roma.with_district(3);
    let frascati = Scope {
        region: Some(LAZIO),
        ..Scope::for_municipality(FRASCATI)
    };
    for scope in [Scope::root(), Scope::for_region(LAZIO), roma, district, frascati] {
        cache.get_or_insert_with(scope, || counters(1));
    }
    cache.get_or_insert_with(Scope::for_region(UMBRIA), || counters(1));

    let evicted = cache.invalidate(&roma);

    assert_eq!(evicted, 4);
    assert!(cache.get(&frascati).is_some());
    assert!(cache.get(&Scope::for_region(UMBRIA)).is_some());
    assert!(cache.get(&district).is_none());
    assert!(cache.get(&Scope::root()).is_none());
}

#[test]
fn test_cache_ignores_write_events() {
    let cache = AggregateCache::new();
    cache.get_or_insert_with(Scope::root(), || counters(3));
    let assignment = Assignment {
        id: AssignmentId::new(1),
        section_id: SectionId::new(1),
        representative_id: RepresentativeId::new(1),
        role: Role::Primary,
    };

    cache.on_event(&StoreEvent::Assigned(assignment.clone()));
    cache.on_event(&StoreEvent::Removed(assignment));
    assert_eq!(cache.len(), 1);

    cache.on_event(&StoreEvent::CacheInvalidated(Scope::root()));
    assert!(cache.is_empty());
}
