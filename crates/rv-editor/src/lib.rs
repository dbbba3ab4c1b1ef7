pub mod app;
pub mod designs_list;
pub mod drag;
pub mod input;
pub mod panel;

pub use app::{App, Session};
pub use drag::{PlanDragTool, Tool};
pub use input::InputEvent;
pub use panel::{ControlPanel, FurnitureField, PanelTab, RoomField};
