//! Plan layout → Vello drawing commands.
//!
//! Paint order: floor, furniture (insertion order), selection outlines, then
//! the wall border overlay on top.

use crate::plan::{PlanLayout, PlanRect};
use kurbo::{Affine, Rect, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Outline drawn around the selected item.
pub const SELECTION_COLOR: Color = Color::from_rgba8(0x3B, 0x82, 0xF6, 0xFF);
pub const SELECTION_WIDTH: f64 = 2.0;

/// Paint the plan to a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`.
/// The caller presents the scene.
pub fn paint_plan(scene: &mut Scene, layout: &PlanLayout) {
    let floor = Rect::new(0.0, 0.0, layout.width as f64, layout.height as f64);
    scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(layout.floor), None, &floor);

    for rect in &layout.rects {
        paint_furniture(scene, rect);
    }

    paint_walls(scene, layout);
}

fn paint_furniture(scene: &mut Scene, rect: &PlanRect) {
    let (cx, cy) = rect.center();
    let transform = Affine::translate((cx as f64, cy as f64)) * Affine::rotate(rect.radians() as f64);
    let half_w = rect.width as f64 / 2.0;
    let half_h = rect.height as f64 / 2.0;
    let shape = Rect::new(-half_w, -half_h, half_w, half_h);

    scene.fill(Fill::NonZero, transform, to_peniko(rect.fill), None, &shape);

    if rect.selected {
        let stroke = Stroke::new(SELECTION_WIDTH);
        scene.stroke(&stroke, transform, SELECTION_COLOR, None, &shape);
    }

    // Label text needs a font context; hosts draw labels themselves.
    log::trace!("LABEL {:?} at ({cx}, {cy})", rect.label);
}

fn paint_walls(scene: &mut Scene, layout: &PlanLayout) {
    let inset = layout.wall_border as f64 / 2.0;
    let w = layout.width as f64;
    let h = layout.height as f64;
    if w <= inset * 2.0 || h <= inset * 2.0 {
        return;
    }
    let border = Rect::new(inset, inset, w - inset, h - inset);
    let stroke = Stroke::new(layout.wall_border as f64);
    scene.stroke(&stroke, Affine::IDENTITY, to_peniko(layout.wall), None, &border);
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn to_peniko(c: rv_core::model::Color) -> Color {
    let [r, g, b, a] = c.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}
