// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_seeded_persistence;
use crate::error::PersistenceError;
use mappatura_domain::{AssignmentId, RepresentativeId, Role, SectionId};

const ANNA: RepresentativeId = RepresentativeId::new(1);
const BRUNO: RepresentativeId = RepresentativeId::new(2);

#[test]
fn test_insert_assignment_allocates_id() {
    let mut persistence = create_seeded_persistence();

    let first = persistence
        .insert_assignment(SectionId::new(12), ANNA, Role::Primary)
        .unwrap();
    let second = persistence
        .insert_assignment(SectionId::new(12), BRUNO, Role::Alternate)
        .unwrap();

    assert!(first.id.value() > 0);
    assert!(second.id > first.id);
    assert_eq!(persistence.list_assignments().unwrap(), vec![first, second]);
}

#[test]
fn test_second_assignment_to_same_slot_is_slot_occupied() {
    let mut persistence = create_seeded_persistence();
    persistence
        .insert_assignment(SectionId::new(12), ANNA, Role::Primary)
        .unwrap();

    let result = persistence.insert_assignment(SectionId::new(12), BRUNO, Role::Primary);

    assert_eq!(
        result,
        Err(PersistenceError::SlotOccupied {
            section_id: SectionId::new(12),
            role: Role::Primary,
        })
    );
    assert_eq!(persistence.list_assignments().unwrap().len(), 1);
}

#[test]
fn test_same_representative_may_hold_both_roles_in_distinct_sections() {
    let mut persistence = create_seeded_persistence();

    persistence
        .insert_assignment(SectionId::new(12), ANNA, Role::Primary)
        .unwrap();
    persistence
        .insert_assignment(SectionId::new(13), ANNA, Role::Alternate)
        .unwrap();

    let held = persistence.list_assignments_for_representative(ANNA).unwrap();
    assert_eq!(held.len(), 2);
    assert!(
        persistence
            .list_assignments_for_representative(BRUNO)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_unknown_section_violates_foreign_key() {
    let mut persistence = create_seeded_persistence();

    let result = persistence.insert_assignment(SectionId::new(999), ANNA, Role::Primary);

    assert!(matches!(result, Err(PersistenceError::ForeignKeyViolation(_))));
}

#[test]
fn test_find_slot_returns_occupant() {
    let mut persistence = create_seeded_persistence();
    let created = persistence
        .insert_assignment(SectionId::new(1), BRUNO, Role::Alternate)
        .unwrap();

    let alternate = persistence
        .find_slot(SectionId::new(1), Role::Alternate)
        .unwrap();
    let primary = persistence
        .find_slot(SectionId::new(1), Role::Primary)
        .unwrap();

    assert_eq!(alternate, Some(created));
    assert_eq!(primary, None);
}

#[test]
fn test_delete_assignment_empties_slot() {
    let mut persistence = create_seeded_persistence();
    let created = persistence
        .insert_assignment(SectionId::new(12), ANNA, Role::Primary)
        .unwrap();

    let removed = persistence.delete_assignment(created.id).unwrap();

    assert_eq!(removed, created);
    assert!(persistence.get_assignment(created.id).unwrap().is_none());
    assert!(
        persistence
            .find_slot(SectionId::new(12), Role::Primary)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_missing_assignment_is_not_found() {
    let mut persistence = create_seeded_persistence();

    let result = persistence.delete_assignment(AssignmentId::new(42));

    assert_eq!(
        result,
        Err(PersistenceError::NotFound {
            resource: "Assignment",
            id: 42,
        })
    );
}

#[test]
fn test_assignment_ids_are_not_reused() {
    let mut persistence = create_seeded_persistence();
    let first = persistence
        .insert_assignment(SectionId::new(12), ANNA, Role::Primary)
        .unwrap();
    persistence.delete_assignment(first.id).unwrap();

    let second = persistence
        .insert_assignment(SectionId::new(12), ANNA, Role::Primary)
        .unwrap();

    assert!(second.id > first.id);
}
