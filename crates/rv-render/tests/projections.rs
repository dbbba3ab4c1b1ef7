//! The plan and the 3D scene are two projections of the same design: every
//! item must land in the same place, with the same rotation, in both.

use pretty_assertions::assert_eq;
use rv_core::catalog::sample_design;
use rv_core::clock::from_millis;
use rv_core::id::FurnitureId;
use rv_core::model::{NewFurniture, Position, RoomDesign};
use rv_render::hit::hit_test;
use rv_render::plan::{PLAN_SCALE, layout_plan};
use rv_render::scene3d::{Node3d, build_scene};

fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn den_with_rotated_bed() -> RoomDesign {
    let mut design = sample_design(from_millis(0));
    let bed = NewFurniture {
        kind: "bed".into(),
        name: "Bed".into(),
        position: Position { x: 2.5, y: 1.0 },
        rotation: 90,
        width: 1.6,
        height: 0.5,
        depth: 2.0,
        color: "#FFFFFF".into(),
        material: "fabric".into(),
    }
    .into_item(FurnitureId::intern("bed-1"));
    design.furniture.push(bed);
    design
}

#[test]
fn plan_centers_match_scene_groups() {
    let design = den_with_rotated_bed();
    let layout = layout_plan(&design, None);
    let scene = build_scene(&design, None);

    assert_eq!(layout.rects.len(), scene.furniture_groups().len());
    for rect in &layout.rects {
        let idx = scene.furniture_node(rect.id).expect("group per item");
        let Node3d::Group {
            position, rotation, ..
        } = &scene.graph[idx]
        else {
            panic!("furniture node is not a group");
        };
        let (cx, cy) = rect.center();
        assert!(near(position[0], cx / PLAN_SCALE), "{:?} x", rect.id);
        assert!(near(position[2], cy / PLAN_SCALE), "{:?} z", rect.id);
        assert!(near(rotation[1], rect.radians()), "{:?} yaw", rect.id);
    }
}

#[test]
fn picking_agrees_between_views() {
    let design = den_with_rotated_bed();
    let selected = FurnitureId::intern("bed-1");
    let layout = layout_plan(&design, Some(selected));
    let scene = build_scene(&design, Some(selected));

    // Centre of the rotated bed in the plan.
    let (cx, cy) = layout.rect(selected).expect("bed rect").center();
    assert_eq!(hit_test(&layout, cx, cy), Some(selected));

    // Any mesh under the bed group resolves back to the bed.
    let group = scene.furniture_node(selected).expect("bed group");
    for child in scene.children(group) {
        assert_eq!(scene.furniture_at(child), Some(selected));
    }
    assert_eq!(layout.rects.iter().filter(|r| r.selected).count(), 1);
}

#[test]
fn empty_room_has_structure_but_no_items() {
    let mut design = sample_design(from_millis(0));
    design.furniture.clear();
    let layout = layout_plan(&design, None);
    let scene = build_scene(&design, None);

    assert!(layout.rects.is_empty());
    assert!(scene.furniture_groups().is_empty());
    // Ambient light, sun, room shell.
    assert_eq!(scene.children(scene.root).len(), 3);
    assert_eq!(hit_test(&layout, 250.0, 200.0), None);
}
