// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use pdfile::{Element, MessageBox, ObjectBox, Patch, PatchFile, Placement, Position, UNSET};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Object,
    Message,
    Sub,
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![Just(Kind::Object), Just(Kind::Message), Just(Kind::Sub)]
}

fn element(k: Kind, i: usize) -> Element {
    match k {
        Kind::Object => ObjectBox::new("f").arg(i).into(),
        Kind::Message => MessageBox::new([i]).into(),
        Kind::Sub => Patch::subpatch(format!("sub{i}")).into(),
    }
}

proptest! {
    #[test]
    fn object_boxes_are_numbered_in_insertion_order(kinds in prop::collection::vec(kind(), 0..40)) {
        let mut file = PatchFile::create("p.pd");
        let main = file.main_mut();
        let ids: Vec<_> = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| main.add(element(*k, i), None))
            .collect();

        let mut expected = 0;
        for (k, id) in kinds.iter().zip(&ids) {
            let placed = main.element(*id).unwrap();
            match k {
                Kind::Object => {
                    prop_assert_eq!(placed.creation_index, Some(expected));
                    expected += 1;
                }
                Kind::Message | Kind::Sub => prop_assert_eq!(placed.creation_index, None),
            }
        }
        prop_assert_eq!(main.layout().object_count(), expected);
    }

    #[test]
    fn auto_placed_elements_step_by_delta(
        x in -500i32..500,
        y in -500i32..500,
        dx in -50i32..50,
        dy in -50i32..50,
    ) {
        let mut file = PatchFile::create("p.pd");
        let main = file.main_mut();
        main.add(ObjectBox::new("a").at(x, y), None);
        let b = main.add(ObjectBox::new("b"), None);
        prop_assert_eq!(main.element(b).unwrap().position, Position::new(x, y + 50));

        main.set_auto_placement_delta(Some(dx), Some(dy));
        let c = main.add(MessageBox::new(["bang"]), None);
        prop_assert_eq!(
            main.element(c).unwrap().position,
            Position::new(x + dx, y + 50 + dy)
        );
    }

    #[test]
    fn explicit_positions_are_never_moved(
        points in prop::collection::vec((-1000i32..1000, -1000i32..1000), 1..20),
        dx in -50i32..50,
    ) {
        let mut file = PatchFile::create("p.pd");
        let main = file.main_mut();
        main.set_auto_placement_delta(Some(dx), None);
        for (x, y) in points {
            let id = main.add(ObjectBox::new("f").at(x, y), None);
            prop_assert_eq!(main.element(id).unwrap().position, Position::new(x, y));
            main.add(ObjectBox::new("g"), None);
        }
    }
}

#[test]
fn delta_change_only_affects_later_insertions() {
    let mut file = PatchFile::create("p.pd");
    let main = file.main_mut();
    let a = main.add(ObjectBox::new("a"), None);
    let b = main.add(ObjectBox::new("b"), None);
    main.set_auto_placement_delta(Some(100), Some(0));
    let c = main.add(ObjectBox::new("c"), None);
    let d = main.add(ObjectBox::new("d"), None);

    let pos = |id| main.element(id).unwrap().position;
    assert_eq!(pos(a), Position::new(0, 50));
    assert_eq!(pos(b), Position::new(0, 100));
    assert_eq!(pos(c), Position::new(100, 100));
    assert_eq!(pos(d), Position::new(200, 100));
}

#[test]
fn raw_sentinel_coordinates_are_auto_placed() {
    let mut file = PatchFile::create("p.pd");
    let main = file.main_mut();
    main.add(ObjectBox::new("a").at(40, 40), None);
    let b = main.add(
        ObjectBox::new("b").placed(Placement::from_raw(UNSET, 7)),
        None,
    );
    assert_eq!(main.element(b).unwrap().position, Position::new(40, 7));
}

#[test]
fn auto_placement_clamps_at_the_coordinate_limits() {
    let mut file = PatchFile::create("p.pd");
    let main = file.main_mut();
    main.add(ObjectBox::new("a").at(0, i32::MAX - 10), None);
    let b = main.add(ObjectBox::new("b"), None);
    assert_eq!(main.element(b).unwrap().position, Position::new(0, i32::MAX));

    main.add(ObjectBox::new("c").at(i32::MIN + 5, 0), None);
    main.set_auto_placement_delta(Some(-100), None);
    let d = main.add(ObjectBox::new("d"), None);
    assert_eq!(main.element(d).unwrap().position, Position::new(i32::MIN, 50));
}

#[test]
fn subpatch_box_advances_the_parent_cursor() {
    let mut file = PatchFile::create("p.pd");
    let main = file.main_mut();
    main.add(ObjectBox::new("a"), None);
    let sub = main.add(Patch::subpatch("s"), None);
    let after = main.add(ObjectBox::new("b"), None);
    assert_eq!(main.element(sub).unwrap().position, Position::new(0, 100));
    assert_eq!(main.element(after).unwrap().position, Position::new(0, 150));
    assert_eq!(main.element(after).unwrap().creation_index, Some(1));
}

#[test]
fn nested_scopes_number_independently() {
    let mut file = PatchFile::create("p.pd");
    let main = file.main_mut();
    main.add(ObjectBox::new("a"), None);
    main.add(ObjectBox::new("b"), None);
    let sub = main.add(Patch::subpatch("s"), None);
    let inner = main.subpatch_mut(sub).unwrap();
    let first = inner.add(ObjectBox::new("inlet"), None);
    assert_eq!(inner.element(first).unwrap().creation_index, Some(0));
    assert_eq!(inner.element(first).unwrap().position, Position::new(0, 50));
}
