//! Design controls panel.
//!
//! Turns form edits and button presses into store mutations, and projects
//! the store into a serializable [`PanelView`] for the host UI.
//!
//! | Tab       | Enabled when                     |
//! |-----------|----------------------------------|
//! | Room      | always                           |
//! | Furniture | selection resolves to an item    |
//! | Add       | always                           |
//! | View      | always                           |
//! | Cart      | always (badge when non-empty)    |

use rv_core::catalog::{FURNITURE_TEMPLATES, template};
use rv_core::id::FurnitureId;
use rv_core::input::{parse_degrees, parse_float};
use rv_core::model::*;
use rv_core::notice::{Notice, NoticeLevel};
use rv_core::store::RoomStore;
use serde::Serialize;

pub const EMPTY_PROMPT: &str = "Select or create a room design to start";
pub const EMPTY_CART_TEXT: &str = "Your cart is empty";

/// Upper bound of the rotation slider (step 1).
pub const ROTATION_SLIDER_MAX: i32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTab {
    #[default]
    Room,
    Furniture,
    Add,
    View,
    Cart,
}

impl PanelTab {
    pub const ALL: [PanelTab; 5] = [
        PanelTab::Room,
        PanelTab::Furniture,
        PanelTab::Add,
        PanelTab::View,
        PanelTab::Cart,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelTab::Room => "Room",
            PanelTab::Furniture => "Furniture",
            PanelTab::Add => "Add",
            PanelTab::View => "View",
            PanelTab::Cart => "Cart",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label().eq_ignore_ascii_case(s))
    }
}

/// Editable room fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    Width,
    Length,
    Height,
    WallColor,
    FloorColor,
}

impl RoomField {
    /// Field keys as used by the host form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "width" => Some(RoomField::Width),
            "length" => Some(RoomField::Length),
            "height" => Some(RoomField::Height),
            "wallColor" => Some(RoomField::WallColor),
            "floorColor" => Some(RoomField::FloorColor),
            _ => None,
        }
    }
}

/// Editable furniture fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnitureField {
    Name,
    Type,
    Width,
    Height,
    Depth,
    Rotation,
    Color,
}

impl FurnitureField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(FurnitureField::Name),
            "type" => Some(FurnitureField::Type),
            "width" => Some(FurnitureField::Width),
            "height" => Some(FurnitureField::Height),
            "depth" => Some(FurnitureField::Depth),
            "rotation" => Some(FurnitureField::Rotation),
            "color" => Some(FurnitureField::Color),
            _ => None,
        }
    }
}

// ─── View model ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub tab: PanelTab,
    pub label: &'static str,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: FurnitureId,
    pub name: String,
    pub dimensions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView<'a> {
    pub active_tab: PanelTab,
    pub tabs: Vec<TabView>,
    /// Set when there is no current design; the rest is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_prompt: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<&'a RoomDesign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furniture: Option<&'a FurnitureItem>,
    pub templates: &'static [FurnitureTemplate],
    pub view_mode: ViewMode,
    pub can_fullscreen: bool,
    pub fullscreen: bool,
    pub cart: Vec<CartLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_empty_text: Option<&'static str>,
    pub purchase_label: String,
}

/// `"{w}m × {d}m × {h}m"`, as shown on cart lines.
/// `(r + delta) % 360` with truncating remainder, widened so it cannot
/// overflow at the ends of `i32`. The result always lies in `-359..=359`.
fn quarter_turn(rotation: i32, delta: i64) -> i32 {
    ((i64::from(rotation) + delta) % 360) as i32
}

pub fn cart_dimensions(item: &FurnitureItem) -> String {
    format!("{}m × {}m × {}m", item.width, item.depth, item.height)
}

// ─── Panel ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ControlPanel {
    active_tab: PanelTab,
    fullscreen: bool,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab_enabled(tab: PanelTab, store: &RoomStore) -> bool {
        match tab {
            PanelTab::Furniture => store.selected_furniture().is_some(),
            _ => true,
        }
    }

    /// The tab being shown. A Furniture tab whose selection went away shows
    /// as Room.
    pub fn active_tab(&self, store: &RoomStore) -> PanelTab {
        if Self::tab_enabled(self.active_tab, store) {
            self.active_tab
        } else {
            PanelTab::Room
        }
    }

    /// Switch tabs. Disabled tabs cannot be selected.
    pub fn select_tab(&mut self, tab: PanelTab, store: &RoomStore) -> bool {
        if !Self::tab_enabled(tab, store) {
            return false;
        }
        self.active_tab = tab;
        true
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn view<'a>(&self, store: &'a RoomStore) -> PanelView<'a> {
        let tabs = PanelTab::ALL
            .into_iter()
            .map(|tab| TabView {
                tab,
                label: tab.label(),
                enabled: Self::tab_enabled(tab, store),
                badge: (tab == PanelTab::Cart && !store.cart().is_empty())
                    .then_some(store.cart().len()),
            })
            .collect();

        let cart = store
            .cart()
            .iter()
            .map(|item| CartLine {
                id: item.id,
                name: item.name.clone(),
                dimensions: cart_dimensions(item),
            })
            .collect();

        PanelView {
            active_tab: self.active_tab(store),
            tabs,
            empty_prompt: store.current_design().is_none().then_some(EMPTY_PROMPT),
            room: store.current_design(),
            furniture: store.selected_furniture(),
            templates: &FURNITURE_TEMPLATES,
            view_mode: store.view_mode(),
            can_fullscreen: store.view_mode() == ViewMode::ThreeD,
            fullscreen: self.fullscreen,
            cart,
            cart_empty_text: store.cart().is_empty().then_some(EMPTY_CART_TEXT),
            purchase_label: format!("Purchase ({})", store.cart().len()),
        }
    }

    // ─── Room tab ────────────────────────────────────────────────────────

    /// Apply a room form edit. Numeric fields parse leniently; text with no
    /// numeric prefix stores `NaN`.
    pub fn edit_room(&self, store: &mut RoomStore, field: RoomField, text: &str) -> bool {
        let Some(id) = store.current_design_id() else {
            return false;
        };
        let mut patch = DesignPatch::default();
        match field {
            RoomField::Width => patch.width = Some(parse_float(text)),
            RoomField::Length => patch.length = Some(parse_float(text)),
            RoomField::Height => patch.height = Some(parse_float(text)),
            RoomField::WallColor => patch.wall_color = Some(text.to_string()),
            RoomField::FloorColor => patch.floor_color = Some(text.to_string()),
        }
        store.update_design(id, patch)
    }

    pub fn delete_room(&mut self, store: &mut RoomStore) -> bool {
        match store.current_design_id() {
            Some(id) => store.delete_design(id),
            None => false,
        }
    }

    // ─── Furniture tab ───────────────────────────────────────────────────

    pub fn edit_furniture(&self, store: &mut RoomStore, field: FurnitureField, text: &str) -> bool {
        let Some(id) = store.selected_furniture().map(|f| f.id) else {
            return false;
        };
        let mut patch = FurniturePatch::default();
        match field {
            FurnitureField::Name => patch.name = Some(text.to_string()),
            FurnitureField::Type => patch.kind = Some(text.to_string()),
            FurnitureField::Width => patch.width = Some(parse_float(text)),
            FurnitureField::Height => patch.height = Some(parse_float(text)),
            FurnitureField::Depth => patch.depth = Some(parse_float(text)),
            FurnitureField::Color => patch.color = Some(text.to_string()),
            FurnitureField::Rotation => match parse_degrees(text) {
                Some(deg) => patch.rotation = Some(deg.clamp(0, ROTATION_SLIDER_MAX)),
                None => return false,
            },
        }
        store.update_furniture(id, patch)
    }

    /// Rotation slider value, clamped to the slider range.
    pub fn set_rotation(&self, store: &mut RoomStore, degrees: i32) -> bool {
        self.update_selected(store, |_| FurniturePatch::rotation(degrees.clamp(0, ROTATION_SLIDER_MAX)))
    }

    /// `(r - 90) % 360`, truncating, so the result can go negative.
    pub fn rotate_left(&self, store: &mut RoomStore) -> bool {
        self.update_selected(store, |item| FurniturePatch::rotation(quarter_turn(item.rotation, -90)))
    }

    /// `(r + 90) % 360`.
    pub fn rotate_right(&self, store: &mut RoomStore) -> bool {
        self.update_selected(store, |item| FurniturePatch::rotation(quarter_turn(item.rotation, 90)))
    }

    pub fn deselect(&mut self, store: &mut RoomStore) -> bool {
        store.select_furniture(None)
    }

    /// Snapshot the selected item into the cart, then deselect it.
    pub fn add_selected_to_cart(&mut self, store: &mut RoomStore) -> bool {
        let Some(item) = store.selected_furniture().cloned() else {
            return false;
        };
        store.add_to_cart(&item);
        store.select_furniture(None);
        true
    }

    pub fn delete_selected(&mut self, store: &mut RoomStore) -> bool {
        match store.selected_furniture().map(|f| f.id) {
            Some(id) => store.delete_furniture(id),
            None => false,
        }
    }

    fn update_selected(
        &self,
        store: &mut RoomStore,
        patch: impl FnOnce(&FurnitureItem) -> FurniturePatch,
    ) -> bool {
        let Some(item) = store.selected_furniture() else {
            return false;
        };
        let (id, patch) = (item.id, patch(item));
        store.update_furniture(id, patch)
    }

    // ─── Add tab ─────────────────────────────────────────────────────────

    /// Place a fresh copy of the template with this type key.
    pub fn add_template(&self, store: &mut RoomStore, kind: &str) -> Option<FurnitureId> {
        let Some(t) = template(kind) else {
            log::warn!("unknown furniture template {kind:?}");
            return None;
        };
        store.add_furniture(t.instantiate())
    }

    // ─── View tab ────────────────────────────────────────────────────────

    pub fn set_view_mode(&mut self, store: &mut RoomStore, mode: ViewMode) -> bool {
        if mode != ViewMode::ThreeD {
            self.fullscreen = false;
        }
        store.set_view_mode(mode)
    }

    /// Open the fullscreen 3D viewer. Only offered in 3D mode.
    pub fn open_fullscreen(&mut self, store: &RoomStore) -> bool {
        if store.view_mode() != ViewMode::ThreeD {
            return false;
        }
        self.fullscreen = true;
        true
    }

    pub fn close_fullscreen(&mut self) {
        self.fullscreen = false;
    }

    // ─── Cart tab ────────────────────────────────────────────────────────

    pub fn remove_cart_line(&mut self, store: &mut RoomStore, id: FurnitureId) -> bool {
        store.remove_from_cart(id)
    }

    pub fn clear_cart(&mut self, store: &mut RoomStore) -> bool {
        store.clear_cart()
    }

    /// There is no purchase flow; a non-empty cart only gets a notice.
    pub fn purchase(&self, store: &mut RoomStore) -> bool {
        if store.cart().is_empty() {
            return false;
        }
        store.notify(Notice {
            level: NoticeLevel::Info,
            message: "Coming Soon!".into(),
            description: Some("Purchase functionality will be available soon.".into()),
        });
        true
    }
}
