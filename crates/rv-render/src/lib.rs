pub mod hit;
pub mod paint;
pub mod plan;
pub mod scene3d;

pub use hit::hit_test;
pub use paint::paint_plan;
pub use plan::{PLAN_SCALE, PlanLayout, PlanRect, WALL_BORDER_PX, layout_plan};
pub use scene3d::{MeshAssembly, Node3d, Primitive, Scene3d, build_scene};
