//! Integration tests: room store behavior through the public API (rv-core).
//!
//! Exercises design lifecycle, furniture registry, selection and cart
//! independence on a frozen clock.

use pretty_assertions::assert_eq;
use rv_core::*;

fn frozen_store() -> RoomStore {
    RoomStore::with_clock(Box::new(FixedClock(from_millis(1_709_208_000_000))))
}

fn sofa() -> NewFurniture {
    template("sofa").unwrap().instantiate()
}

// ─── Timestamps ─────────────────────────────────────────────────────────

#[test]
fn every_affecting_mutation_advances_updated_at() {
    let mut store = frozen_store();
    let design = store.create_design(NewDesign::named("Den"));
    let d = store.design(design).unwrap();
    assert_eq!(d.created_at, d.updated_at);

    let mut last = d.updated_at;
    let mut check = |store: &RoomStore| {
        let now = store.design(design).unwrap().updated_at;
        assert!(now > last, "{now:?} should be after {last:?}");
        last = now;
    };

    store.update_design(
        design,
        DesignPatch {
            name: Some("Den 2".into()),
            ..Default::default()
        },
    );
    check(&store);

    let item = store.add_furniture(sofa()).unwrap();
    check(&store);

    store.update_furniture(item, FurniturePatch::position(1.0, 1.0));
    check(&store);

    store.update_furniture(item, FurniturePatch::position(1.5, 1.0));
    check(&store);

    store.delete_furniture(item);
    check(&store);
}

// ─── Designs ────────────────────────────────────────────────────────────

#[test]
fn create_design_uses_default_geometry() {
    let mut store = frozen_store();
    store.create_design(NewDesign::named("Den"));

    let d = &store.designs()[0];
    assert_eq!(d.name, "Den");
    assert_eq!((d.width, d.length, d.height), (5.0, 4.0, 2.5));
    assert_eq!(d.wall_color, "#F5F5F5");
    assert_eq!(d.floor_color, "#D2B48C");
    assert_eq!(d.furniture.len(), 0);
}

#[test]
fn deleting_current_vs_other_design() {
    let mut store = frozen_store();
    let first = store.create_design(NewDesign::named("First"));
    let second = store.create_design(NewDesign::named("Second"));

    store.delete_design(first);
    assert_eq!(store.current_design_id(), Some(second));

    store.delete_design(second);
    assert_eq!(store.current_design_id(), None);
    assert!(store.designs().is_empty());
}

#[test]
fn select_design_clears_selection_regardless_of_prior_state() {
    let mut store = frozen_store();
    let a = store.create_design(NewDesign::named("A"));
    let item = store.add_furniture(sofa()).unwrap();
    let b = store.create_design(NewDesign::named("B"));

    for target in [a, b, a, DesignId::intern("unknown")] {
        store.select_furniture(Some(item));
        store.select_design(target);
        assert_eq!(store.selected_furniture_id(), None);
    }
}

#[test]
fn seeded_store_has_sample_but_nothing_current() {
    let store = RoomStore::with_sample(Box::new(FixedClock(from_millis(0))));
    assert_eq!(store.designs().len(), 1);
    assert_eq!(store.designs()[0].id.as_str(), SAMPLE_DESIGN_ID);
    assert!(store.current_design().is_none());
    assert!(store.cart().is_empty());
}

// ─── Furniture ──────────────────────────────────────────────────────────

#[test]
fn add_furniture_without_current_design_changes_nothing() {
    let mut store = frozen_store();
    let design = store.create_design(NewDesign::named("Den"));
    store.select_design(DesignId::intern("nowhere"));
    let rev = store.revision();

    assert_eq!(store.add_furniture(sofa()), None);
    assert_eq!(store.revision(), rev);
    assert!(store.design(design).unwrap().furniture.is_empty());
}

#[test]
fn deleting_selected_furniture_clears_selection() {
    let mut store = frozen_store();
    store.create_design(NewDesign::named("Den"));
    let item = store.add_furniture(sofa()).unwrap();
    store.select_furniture(Some(item));
    assert_eq!(store.selected_furniture().map(|f| f.id), Some(item));

    store.delete_furniture(item);
    assert_eq!(store.selected_furniture_id(), None);
}

#[test]
fn select_furniture_accepts_unknown_ids() {
    let mut store = frozen_store();
    store.create_design(NewDesign::named("Den"));
    let ghost = FurnitureId::intern("not-in-design");

    assert!(store.select_furniture(Some(ghost)));
    assert_eq!(store.selected_furniture_id(), Some(ghost));
    // Stored, but does not resolve to an item.
    assert!(store.selected_furniture().is_none());
}

#[test]
fn den_scenario() {
    let mut store = frozen_store();
    let den = store.create_design(NewDesign::named("Den"));
    assert!(store.designs().iter().any(|d| d.id == den && d.furniture.is_empty()));

    let id = store.add_furniture(sofa()).unwrap();
    let current = store.current_design().unwrap();
    assert_eq!(current.furniture.len(), 1);
    let item = current.furniture(id).unwrap();
    assert_eq!((item.width, item.height, item.depth), (2.2, 0.85, 0.95));
    assert_eq!(item.color, "#696969");

    store.update_furniture(id, FurniturePatch::rotation(90));
    assert_eq!(store.current_design().unwrap().furniture(id).unwrap().rotation, 90);

    store.delete_furniture(id);
    assert_eq!(store.current_design().unwrap().furniture.len(), 0);
    assert_eq!(store.selected_furniture_id(), None);
}

// ─── Cart ───────────────────────────────────────────────────────────────

#[test]
fn cart_copy_is_independent_of_source() {
    let mut store = frozen_store();
    store.create_design(NewDesign::named("Den"));
    let id = store.add_furniture(sofa()).unwrap();
    let snapshot = store.current_design().unwrap().furniture(id).unwrap().clone();
    store.add_to_cart(&snapshot);

    store.update_furniture(
        id,
        FurniturePatch {
            name: Some("Renamed".into()),
            rotation: Some(180),
            position: Some(Position::new(2.0, 2.0)),
            ..Default::default()
        },
    );

    assert_eq!(store.cart(), &[snapshot][..]);
}

// ─── Dispatch ───────────────────────────────────────────────────────────

#[test]
fn mutations_dispatch_like_direct_calls() {
    let mut store = frozen_store();
    assert!(store.apply(RoomMutation::CreateDesign {
        fields: Box::new(NewDesign::named("Den")),
    }));
    assert!(store.apply(RoomMutation::AddFurniture {
        furniture: Box::new(sofa()),
    }));
    let id = store.current_design().unwrap().furniture[0].id;

    let changed = store.apply_all([
        RoomMutation::SelectFurniture { id: Some(id) },
        RoomMutation::UpdateFurniture {
            id,
            patch: FurniturePatch::rotation(-90),
        },
    ]);
    assert!(changed);
    assert_eq!(store.selected_furniture().unwrap().rotation, -90);
    assert_eq!(store.selected_furniture().unwrap().normalized_rotation(), 270);

    assert!(!store.apply(RoomMutation::DeleteDesign {
        id: DesignId::intern("missing"),
    }));
}

#[test]
fn notices_follow_mutations() {
    let mut store = frozen_store();
    store.create_design(NewDesign::named("Den"));
    let id = store.add_furniture(sofa()).unwrap();
    let item = store.current_design().unwrap().furniture(id).unwrap().clone();
    store.add_to_cart(&item);
    store.remove_from_cart(id);
    store.clear_cart();

    let messages: Vec<String> = store.take_notices().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "New room design created!",
            "Added Living Room Sofa to the room!",
            "Added Living Room Sofa to cart!",
            "Item removed from cart!",
            "Cart cleared!",
        ]
    );
}
