//! WASM bridge for Room Vision: exposes the app session to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Projections are returned as
//! JSON strings; mutators return `true` when the host should re-render.

mod render2d;
mod svg;

use rv_core::id::{DesignId, FurnitureId};
use rv_core::model::{DesignPatch, FurniturePatch, ViewMode};
use rv_editor::designs_list::create_named;
use rv_editor::{App, FurnitureField, InputEvent, PanelTab, RoomField, Session};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The main WASM-facing controller.
///
/// Holds the auth gate and, while signed in, the room session. All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct RoomVisionApp {
    app: App,
    /// Dark mode flag: `false` = light (default), `true` = dark.
    dark_mode: bool,
}

impl Default for RoomVisionApp {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl RoomVisionApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            app: App::new(),
            dark_mode: false,
        }
    }

    // ─── Auth ────────────────────────────────────────────────────────────

    pub fn login(&mut self, username: &str, password: &str) -> bool {
        self.app.login(username, password)
    }

    pub fn logout(&mut self) {
        self.app.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.app.is_authenticated()
    }

    /// `{"title": ..., "user": {...}}`
    pub fn header_json(&self) -> String {
        to_json(&self.app.header())
    }

    /// Drain pending toasts as a JSON array.
    pub fn take_notices_json(&mut self) -> String {
        to_json(&self.app.take_notices())
    }

    // ─── Projections ─────────────────────────────────────────────────────

    pub fn dashboard_json(&self) -> String {
        self.with_session_json("null", |s| to_json(&s.dashboard()))
    }

    pub fn designs_json(&self) -> String {
        self.with_session_json("null", |s| to_json(&s.designs_list()))
    }

    pub fn current_design_json(&self) -> String {
        self.with_session_json("null", |s| to_json(&s.store.current_design()))
    }

    pub fn panel_json(&self) -> String {
        self.with_session_json("null", |s| to_json(&s.panel_view()))
    }

    pub fn plan_json(&self) -> String {
        self.with_session_json("null", |s| to_json(&s.plan_layout()))
    }

    /// The 3D preview as a nested node tree plus camera.
    pub fn scene_json(&self) -> String {
        self.with_session_json("null", |s| match s.scene() {
            Some(scene) => to_json(&SceneJson {
                camera: scene.camera,
                root: scene.tree(),
            }),
            None => "null".to_string(),
        })
    }

    pub fn cart_json(&self) -> String {
        self.with_session_json("[]", |s| to_json(&s.store.cart()))
    }

    /// Store revision; bumps on every effective mutation.
    pub fn revision(&self) -> f64 {
        self.with_session(0.0, |s| s.store.revision() as f64)
    }

    // ─── Designs ─────────────────────────────────────────────────────────

    /// Create a design (an empty name gets the default). Returns its id, or an
    /// empty string when signed out.
    pub fn create_design(&mut self, name: &str) -> String {
        self.with_session_mut(String::new(), |s| create_named(&mut s.store, name).to_string())
    }

    /// Merge a JSON `DesignPatch` (camelCase keys) into a design.
    pub fn update_design_json(&mut self, design_id: &str, patch_json: &str) -> bool {
        let patch: DesignPatch = match decode(patch_json) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("update_design_json: {e}");
                return false;
            }
        };
        let id = DesignId::intern(design_id);
        self.with_session_mut(false, |s| s.store.update_design(id, patch))
    }

    pub fn delete_design(&mut self, design_id: &str) -> bool {
        let id = DesignId::intern(design_id);
        self.with_session_mut(false, |s| s.store.delete_design(id))
    }

    pub fn select_design(&mut self, design_id: &str) -> bool {
        let id = DesignId::intern(design_id);
        self.with_session_mut(false, |s| s.store.select_design(id))
    }

    // ─── Furniture ───────────────────────────────────────────────────────

    /// Place a catalog template. Returns the new id or an empty string.
    pub fn add_template(&mut self, kind: &str) -> String {
        self.with_session_mut(String::new(), |s| {
            s.panel
                .add_template(&mut s.store, kind)
                .map(|id| id.to_string())
                .unwrap_or_default()
        })
    }

    /// Merge a JSON `FurniturePatch` into an item of the current design.
    pub fn update_furniture_json(&mut self, furniture_id: &str, patch_json: &str) -> bool {
        let patch: FurniturePatch = match decode(patch_json) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("update_furniture_json: {e}");
                return false;
            }
        };
        let id = FurnitureId::intern(furniture_id);
        self.with_session_mut(false, |s| s.store.update_furniture(id, patch))
    }

    pub fn delete_furniture(&mut self, furniture_id: &str) -> bool {
        let id = FurnitureId::intern(furniture_id);
        self.with_session_mut(false, |s| s.store.delete_furniture(id))
    }

    /// Select by id from either canvas; an empty id clears the selection.
    pub fn select_furniture(&mut self, furniture_id: &str) -> bool {
        let id = (!furniture_id.is_empty()).then(|| FurnitureId::intern(furniture_id));
        self.with_session_mut(false, |s| s.store.select_furniture(id))
    }

    pub fn set_view_mode(&mut self, mode: &str) -> bool {
        let Some(mode) = ViewMode::parse(mode) else {
            log::warn!("set_view_mode: unknown mode {mode:?}");
            return false;
        };
        self.with_session_mut(false, |s| s.panel.set_view_mode(&mut s.store, mode))
    }

    // ─── Control panel ───────────────────────────────────────────────────

    pub fn select_tab(&mut self, tab: &str) -> bool {
        let Some(tab) = PanelTab::parse(tab) else {
            return false;
        };
        self.with_session_mut(false, |s| s.panel.select_tab(tab, &s.store))
    }

    /// Room form edit, e.g. `("width", "5.5")` or `("wallColor", "#FFFFFF")`.
    pub fn edit_room_field(&mut self, field: &str, text: &str) -> bool {
        let Some(field) = RoomField::parse(field) else {
            log::warn!("edit_room_field: unknown field {field:?}");
            return false;
        };
        self.with_session_mut(false, |s| s.panel.edit_room(&mut s.store, field, text))
    }

    pub fn edit_furniture_field(&mut self, field: &str, text: &str) -> bool {
        let Some(field) = FurnitureField::parse(field) else {
            log::warn!("edit_furniture_field: unknown field {field:?}");
            return false;
        };
        self.with_session_mut(false, |s| s.panel.edit_furniture(&mut s.store, field, text))
    }

    pub fn set_rotation(&mut self, degrees: i32) -> bool {
        self.with_session_mut(false, |s| s.panel.set_rotation(&mut s.store, degrees))
    }

    pub fn rotate_left(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.rotate_left(&mut s.store))
    }

    pub fn rotate_right(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.rotate_right(&mut s.store))
    }

    pub fn deselect(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.deselect(&mut s.store))
    }

    pub fn add_selected_to_cart(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.add_selected_to_cart(&mut s.store))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.delete_selected(&mut s.store))
    }

    pub fn delete_room(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.delete_room(&mut s.store))
    }

    pub fn remove_from_cart(&mut self, furniture_id: &str) -> bool {
        let id = FurnitureId::intern(furniture_id);
        self.with_session_mut(false, |s| s.panel.remove_cart_line(&mut s.store, id))
    }

    pub fn clear_cart(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.clear_cart(&mut s.store))
    }

    pub fn purchase(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.purchase(&mut s.store))
    }

    pub fn open_fullscreen(&mut self) -> bool {
        self.with_session_mut(false, |s| s.panel.open_fullscreen(&s.store))
    }

    pub fn close_fullscreen(&mut self) {
        self.with_session_mut((), |s| s.panel.close_fullscreen());
    }

    // ─── 2D canvas ───────────────────────────────────────────────────────

    /// Handle pointer down on the plan. Returns true if a repaint is needed.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.pointer(InputEvent::from_pointer_down(x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.pointer(InputEvent::from_pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.pointer(InputEvent::from_pointer_up(x, y))
    }

    /// Size the canvas to the plan and paint it. Returns `false` when no 2D
    /// context is available.
    pub fn render(&self, canvas: &HtmlCanvasElement) -> bool {
        let layout = self.app.session().and_then(Session::plan_layout);
        if let Some(layout) = &layout {
            canvas.set_width(layout.width.max(0.0) as u32);
            canvas.set_height(layout.height.max(0.0) as u32);
        }
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|o| o.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::warn!("render: no 2d context");
            return false;
        };
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        render2d::render_plan(
            &ctx,
            layout.as_ref(),
            canvas.width() as f64,
            canvas.height() as f64,
            &theme,
        );
        true
    }

    /// Set the canvas theme.
    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    /// Export the current plan as SVG (empty string without a design).
    pub fn export_svg(&self) -> String {
        self.app
            .session()
            .and_then(Session::plan_layout)
            .map(|layout| svg::render_svg(&layout))
            .unwrap_or_default()
    }
}

impl RoomVisionApp {
    fn with_session<T>(&self, signed_out: T, f: impl FnOnce(&Session) -> T) -> T {
        match self.app.session() {
            Some(s) => f(s),
            None => signed_out,
        }
    }

    /// JSON projection of the session, or `signed_out` verbatim.
    fn with_session_json(&self, signed_out: &str, f: impl FnOnce(&Session) -> String) -> String {
        self.with_session(None, |s| Some(f(s)))
            .unwrap_or_else(|| signed_out.to_string())
    }

    fn with_session_mut<T>(&mut self, signed_out: T, f: impl FnOnce(&mut Session) -> T) -> T {
        match self.app.session_mut() {
            Some(s) => f(s),
            None => signed_out,
        }
    }

    fn pointer(&mut self, event: InputEvent) -> bool {
        self.with_session_mut(false, |s| s.pointer(event))
    }
}

#[derive(Serialize)]
struct SceneJson<'a> {
    camera: rv_render::scene3d::Camera,
    root: rv_render::scene3d::SceneTree<'a>,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid JSON: {e}"))
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Room Vision WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
