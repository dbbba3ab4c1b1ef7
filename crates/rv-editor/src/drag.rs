//! Tool system for the 2D plan canvas.
//!
//! A tool translates input events into `RoomMutation`s that the caller
//! applies to the `RoomStore`. The plan has a single tool: select and drag.

use crate::input::InputEvent;
use rv_core::id::FurnitureId;
use rv_core::model::{FurnitureItem, FurniturePatch, Position, RoomDesign};
use rv_core::store::RoomMutation;
use rv_render::plan::PLAN_SCALE;

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    /// Handle an input event against the design being edited. `hit` is the
    /// topmost furniture under the pointer, if any.
    fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<FurnitureId>,
        design: &RoomDesign,
    ) -> Vec<RoomMutation>;
}

/// In-flight drag. The offset is the pointer position relative to the
/// item's top-left corner at grab time, in plan pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub id: FurnitureId,
    pub offset_x: f32,
    pub offset_y: f32,
}

#[derive(Debug, Default)]
pub struct PlanDragTool {
    dragging: Option<DragState>,
}

impl PlanDragTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<&DragState> {
        self.dragging.as_ref()
    }

    /// Abandon any drag in progress (e.g. when the design changes).
    pub fn cancel(&mut self) {
        self.dragging = None;
    }
}

impl Tool for PlanDragTool {
    fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<FurnitureId>,
        design: &RoomDesign,
    ) -> Vec<RoomMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let grabbed = hit.and_then(|id| design.furniture(id));
                match grabbed {
                    Some(item) => {
                        self.dragging = Some(DragState {
                            id: item.id,
                            offset_x: x - item.position.x * PLAN_SCALE,
                            offset_y: y - item.position.y * PLAN_SCALE,
                        });
                        vec![RoomMutation::SelectFurniture { id: Some(item.id) }]
                    }
                    None => {
                        // Bare floor: deselect.
                        self.dragging = None;
                        vec![RoomMutation::SelectFurniture { id: None }]
                    }
                }
            }

            InputEvent::PointerMove { x, y } => {
                let Some(drag) = self.dragging else {
                    return vec![];
                };
                let Some(item) = design.furniture(drag.id) else {
                    return vec![];
                };
                let candidate = Position::new(
                    (x - drag.offset_x) / PLAN_SCALE,
                    (y - drag.offset_y) / PLAN_SCALE,
                );
                let position = clamp_to_room(candidate, item, design);
                log::trace!("drag {} -> ({}, {})", drag.id, position.x, position.y);
                vec![RoomMutation::UpdateFurniture {
                    id: drag.id,
                    patch: FurniturePatch::position(position.x, position.y),
                }]
            }

            InputEvent::PointerUp { .. } => {
                self.dragging = None;
                vec![]
            }
        }
    }
}

/// Keep an item's top-left corner inside the room: `x ∈ [0, W − w]`,
/// `y ∈ [0, L − d]`. Uses the unrotated footprint. When the item is larger
/// than the room the lower bound wins and the axis clamps to 0.
pub fn clamp_to_room(candidate: Position, item: &FurnitureItem, design: &RoomDesign) -> Position {
    Position::new(
        clamp_axis(candidate.x, design.width - item.width),
        clamp_axis(candidate.y, design.length - item.depth),
    )
}

fn clamp_axis(v: f32, upper: f32) -> f32 {
    0f32.max(upper.min(v))
}
