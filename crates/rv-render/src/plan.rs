//! Top-down plan projection of a design.
//!
//! Plan space is pixels at [`PLAN_SCALE`] px per meter, origin at the room's
//! top-left corner. The wall border is an overlay drawn inset along the
//! canvas edge on top of the furniture; it does not shift coordinates.

use rv_core::id::FurnitureId;
use rv_core::model::{Color, RoomDesign};
use serde::Serialize;

/// Pixels per meter.
pub const PLAN_SCALE: f32 = 100.0;

/// Width of the wall overlay along the canvas edge.
pub const WALL_BORDER_PX: f32 = 8.0;

/// One furniture footprint in plan pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRect {
    pub id: FurnitureId,
    /// Unrotated top-left corner.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Degrees, clockwise about the rect's own center.
    pub rotation: i32,
    /// Stored hex string, passed through for hosts that style with CSS.
    pub color: String,
    #[serde(skip)]
    pub fill: Color,
    pub label: String,
    pub selected: bool,
}

impl PlanRect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn radians(&self) -> f32 {
        (self.rotation as f32).to_radians()
    }

    /// Whether `(px, py)` falls inside the rotated footprint (edges inclusive).
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let (cx, cy) = self.center();
        let (sin, cos) = self.radians().sin_cos();
        let dx = px - cx;
        let dy = py - cy;
        // Rotate the point back into the rect's unrotated frame.
        let lx = dx * cos + dy * sin;
        let ly = -dx * sin + dy * cos;
        lx.abs() <= self.width / 2.0 && ly.abs() <= self.height / 2.0
    }
}

/// A design projected for the 2D canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLayout {
    pub width: f32,
    pub height: f32,
    pub floor_color: String,
    pub wall_color: String,
    #[serde(skip)]
    pub floor: Color,
    #[serde(skip)]
    pub wall: Color,
    pub wall_border: f32,
    /// Furniture in paint order (insertion order; last is topmost).
    pub rects: Vec<PlanRect>,
}

impl PlanLayout {
    pub fn rect(&self, id: FurnitureId) -> Option<&PlanRect> {
        self.rects.iter().find(|r| r.id == id)
    }
}

/// Project `design` into plan pixels.
///
/// Items with non-finite geometry (lenient field input can store `NaN`) are
/// left out of the layout.
pub fn layout_plan(design: &RoomDesign, selected: Option<FurnitureId>) -> PlanLayout {
    let rects = design
        .furniture
        .iter()
        .filter(|item| {
            let ok = item.has_finite_geometry();
            if !ok {
                log::debug!("plan: skipping {} with non-finite geometry", item.id);
            }
            ok
        })
        .map(|item| PlanRect {
            id: item.id,
            x: item.position.x * PLAN_SCALE,
            y: item.position.y * PLAN_SCALE,
            width: item.width * PLAN_SCALE,
            height: item.depth * PLAN_SCALE,
            rotation: item.rotation,
            color: item.color.clone(),
            fill: Color::from_hex_or_fallback(&item.color),
            label: item.name.clone(),
            selected: selected == Some(item.id),
        })
        .collect();

    PlanLayout {
        width: finite_or_zero(design.width) * PLAN_SCALE,
        height: finite_or_zero(design.length) * PLAN_SCALE,
        floor_color: design.floor_color.clone(),
        wall_color: design.wall_color.clone(),
        floor: Color::from_hex_or_fallback(&design.floor_color),
        wall: Color::from_hex_or_fallback(&design.wall_color),
        wall_border: WALL_BORDER_PX,
        rects,
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
