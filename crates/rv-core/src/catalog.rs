//! Static furniture catalog and the seeded sample design.

use crate::clock::Timestamp;
use crate::id::{DesignId, FurnitureId};
use crate::model::*;

/// Placeable furniture, in picker order.
pub static FURNITURE_TEMPLATES: [FurnitureTemplate; 8] = [
    FurnitureTemplate {
        kind: "dining_chair",
        name: "Dining Chair",
        width: 0.45,
        height: 0.95,
        depth: 0.5,
        color: "#8B4513",
        material: "wood",
    },
    FurnitureTemplate {
        kind: "dining_table",
        name: "Dining Table",
        width: 1.6,
        height: 0.75,
        depth: 0.9,
        color: "#A0522D",
        material: "wood",
    },
    FurnitureTemplate {
        kind: "sofa",
        name: "Living Room Sofa",
        width: 2.2,
        height: 0.85,
        depth: 0.95,
        color: "#696969",
        material: "fabric",
    },
    FurnitureTemplate {
        kind: "armchair",
        name: "Armchair",
        width: 0.85,
        height: 0.85,
        depth: 0.85,
        color: "#808080",
        material: "fabric",
    },
    FurnitureTemplate {
        kind: "coffee_table",
        name: "Coffee Table",
        width: 1.2,
        height: 0.45,
        depth: 0.6,
        color: "#8B4513",
        material: "wood",
    },
    FurnitureTemplate {
        kind: "bookshelf",
        name: "Bookshelf",
        width: 0.8,
        height: 2.0,
        depth: 0.35,
        color: "#D2B48C",
        material: "wood",
    },
    FurnitureTemplate {
        kind: "bed",
        name: "Double Bed",
        width: 1.6,
        height: 0.6,
        depth: 2.0,
        color: "#A0522D",
        material: "wood",
    },
    FurnitureTemplate {
        kind: "wardrobe",
        name: "Wardrobe",
        width: 1.2,
        height: 2.0,
        depth: 0.6,
        color: "#DEB887",
        material: "wood",
    },
];

/// Look up a template by its type key.
pub fn template(kind: &str) -> Option<&'static FurnitureTemplate> {
    FURNITURE_TEMPLATES.iter().find(|t| t.kind == kind)
}

pub const SAMPLE_DESIGN_ID: &str = "sample-1";

/// The "Living Room Sample" every signed-in session starts with.
///
/// Its coffee table uses the type key `table`, which has no dedicated 3D
/// assembly and therefore renders as the fallback box.
pub fn sample_design(now: Timestamp) -> RoomDesign {
    let furniture = vec![
        FurnitureItem {
            id: FurnitureId::intern("furniture-1"),
            kind: "sofa".into(),
            name: "Sofa".into(),
            position: Position::new(0.5, 0.5),
            rotation: 0,
            width: 2.0,
            height: 0.8,
            depth: 0.9,
            color: "#696969".into(),
            material: "fabric".into(),
        },
        FurnitureItem {
            id: FurnitureId::intern("furniture-2"),
            kind: "table".into(),
            name: "Coffee Table".into(),
            position: Position::new(2.0, 1.5),
            rotation: 0,
            width: 1.2,
            height: 0.45,
            depth: 0.6,
            color: "#8B4513".into(),
            material: "wood".into(),
        },
    ];

    RoomDesign {
        furniture,
        ..RoomDesign::from_fields(
            DesignId::intern(SAMPLE_DESIGN_ID),
            NewDesign::named("Living Room Sample"),
            now,
        )
    }
}
