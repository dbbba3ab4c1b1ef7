//! Canvas2D plan renderer.
//!
//! Draws a `PlanLayout` to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Same paint order as the Vello painter:
//! floor, furniture, selection outline, wall border on top.

use rv_render::plan::{PlanLayout, PlanRect};
use std::f64::consts::PI;
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub empty_text: &'static str,
    pub label: &'static str,
    /// Label color on light furniture fills.
    pub label_on_light: &'static str,
    pub selection: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#F4F4F5",
            empty_text: "#71717A",
            label: "#FFFFFF",
            label_on_light: "#27272A",
            selection: "#3B82F6",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#18181B",
            empty_text: "#A1A1AA",
            label: "#FFFFFF",
            label_on_light: "#18181B",
            selection: "#60A5FA",
        }
    }
}

/// Render the plan, or the empty prompt when there is no layout.
pub fn render_plan(
    ctx: &CanvasRenderingContext2d,
    layout: Option<&PlanLayout>,
    canvas_width: f64,
    canvas_height: f64,
    theme: &CanvasTheme,
) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    let Some(layout) = layout else {
        draw_empty_prompt(ctx, canvas_width, canvas_height, theme);
        return;
    };

    ctx.set_fill_style_str(&layout.floor.to_hex());
    ctx.fill_rect(0.0, 0.0, layout.width as f64, layout.height as f64);

    for rect in &layout.rects {
        draw_furniture(ctx, rect, theme);
    }

    draw_walls(ctx, layout);
}

// ─── Drawing primitives ─────────────────────────────────────────────────

fn draw_furniture(ctx: &CanvasRenderingContext2d, rect: &PlanRect, theme: &CanvasTheme) {
    let (cx, cy) = rect.center();
    let (w, h) = (rect.width as f64, rect.height as f64);

    ctx.save();
    let _ = ctx.translate(cx as f64, cy as f64);
    let _ = ctx.rotate(rect.rotation as f64 * PI / 180.0);

    ctx.set_fill_style_str(&rect.fill.to_hex());
    ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);

    if rect.selected {
        ctx.set_stroke_style_str(theme.selection);
        ctx.set_line_width(2.0);
        ctx.stroke_rect(-w / 2.0, -h / 2.0, w, h);
    }

    ctx.set_font("500 12px Inter, sans-serif");
    ctx.set_fill_style_str(label_color(rect, theme));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(&rect.label, 0.0, 0.0);

    ctx.restore();
}

fn label_color(rect: &PlanRect, theme: &CanvasTheme) -> &'static str {
    if rect.fill.luminance() > 0.7 {
        theme.label_on_light
    } else {
        theme.label
    }
}

fn draw_walls(ctx: &CanvasRenderingContext2d, layout: &PlanLayout) {
    let border = layout.wall_border as f64;
    let (w, h) = (layout.width as f64, layout.height as f64);
    if w <= border || h <= border {
        return;
    }
    ctx.set_stroke_style_str(&layout.wall.to_hex());
    ctx.set_line_width(border);
    let inset = border / 2.0;
    ctx.stroke_rect(inset, inset, w - border, h - border);
}

fn draw_empty_prompt(ctx: &CanvasRenderingContext2d, w: f64, h: f64, theme: &CanvasTheme) {
    ctx.set_font("14px Inter, sans-serif");
    ctx.set_fill_style_str(theme.empty_text);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(rv_editor::panel::EMPTY_PROMPT, w / 2.0, h / 2.0);
}
