//! Hit testing: point → furniture lookup.
//!
//! Reverse-walks the plan rects (front-to-back) to find which item is at a
//! given (x, y) plan position.

use crate::plan::PlanLayout;
use rv_core::id::FurnitureId;

/// Find the topmost furniture at position (px, py).
/// Returns `None` if no item is hit (bare floor).
pub fn hit_test(layout: &PlanLayout, px: f32, py: f32) -> Option<FurnitureId> {
    // Last painted = topmost
    layout
        .rects
        .iter()
        .rev()
        .find(|r| r.contains(px, py))
        .map(|r| r.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::layout_plan;
    use rv_core::catalog::sample_design;
    use rv_core::clock::from_millis;
    use rv_core::model::Position;

    #[test]
    fn hit_test_basic() {
        let layout = layout_plan(&sample_design(from_millis(0)), None);

        // Inside the sofa (50..250, 50..140)
        assert_eq!(hit_test(&layout, 100.0, 100.0).map(|id| id.as_str().to_string()), Some("furniture-1".into()));
        // Inside the coffee table (200..320, 150..210)
        assert_eq!(hit_test(&layout, 300.0, 200.0).map(|id| id.as_str().to_string()), Some("furniture-2".into()));
        // Bare floor
        assert_eq!(hit_test(&layout, 450.0, 350.0), None);
    }

    #[test]
    fn hit_test_topmost_wins() {
        let mut design = sample_design(from_millis(0));
        // Move the table over the sofa.
        design.furniture[1].position = Position::new(0.5, 0.5);
        let layout = layout_plan(&design, None);

        let top = hit_test(&layout, 60.0, 60.0).unwrap();
        assert_eq!(top.as_str(), "furniture-2");
        // Outside the table, the sofa underneath is still reachable.
        assert_eq!(hit_test(&layout, 240.0, 130.0).unwrap().as_str(), "furniture-1");
    }

    #[test]
    fn hit_test_respects_rotation() {
        let mut design = sample_design(from_millis(0));
        design.furniture.truncate(1);
        design.furniture[0].rotation = 90;
        let layout = layout_plan(&design, None);

        // Sofa center is (150, 95). Unrotated it covers x 50..250; rotated a
        // quarter turn it only spans x 105..195.
        assert_eq!(hit_test(&layout, 60.0, 95.0), None);
        assert!(hit_test(&layout, 150.0, 180.0).is_some());
    }
}
