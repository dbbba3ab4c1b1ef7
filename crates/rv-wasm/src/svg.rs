//! SVG export of the 2D plan.

use rv_render::plan::PlanLayout;
use std::fmt::Write;

const SELECTION_STROKE: &str = "#3B82F6";

/// Serialize the plan as a standalone SVG document, one `<g>` per item.
pub fn render_svg(layout: &PlanLayout) -> String {
    let (w, h) = (layout.width, layout.height);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\"/>",
        layout.floor.to_hex()
    );

    for rect in &layout.rects {
        let (cx, cy) = rect.center();
        let _ = writeln!(
            svg,
            "  <g id=\"{}\" transform=\"rotate({} {cx} {cy})\">",
            escape_xml(rect.id.as_str()),
            rect.rotation
        );
        let stroke = if rect.selected {
            format!(" stroke=\"{SELECTION_STROKE}\" stroke-width=\"2\"")
        } else {
            String::new()
        };
        let _ = writeln!(
            svg,
            "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"{stroke}/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rect.fill.to_hex()
        );
        let _ = writeln!(
            svg,
            "    <text x=\"{cx}\" y=\"{cy}\" fill=\"#FFFFFF\" font-size=\"12\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
            escape_xml(&rect.label)
        );
        svg.push_str("  </g>\n");
    }

    let border = layout.wall_border;
    if w > border && h > border {
        let inset = border / 2.0;
        let _ = writeln!(
            svg,
            "  <rect x=\"{inset}\" y=\"{inset}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{border}\"/>",
            w - border,
            h - border,
            layout.wall.to_hex()
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
