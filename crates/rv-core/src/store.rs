//! The room store: single source of truth for designs, selection, view mode
//! and cart.
//!
//! Every change goes through one of the mutators below (or the equivalent
//! [`RoomMutation`] passed to [`RoomStore::apply`]). Mutators never fail;
//! when a precondition is unmet (unknown id, no current design) they are
//! silent no-ops and report `false`.
//!
//! The current design is held by id, so there is no separate "current
//! design" copy to keep in sync with the designs list. Views re-project from
//! [`RoomStore::current_design`] whenever [`RoomStore::revision`] moves.

use crate::catalog::sample_design;
use crate::clock::{Clock, MonotonicStamper, SystemClock};
use crate::id::{DesignId, FurnitureId};
use crate::model::*;
use crate::notice::{Notice, Notices};

/// A reified store mutation, produced by editor tools and UI panels.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomMutation {
    CreateDesign {
        fields: Box<NewDesign>,
    },
    UpdateDesign {
        id: DesignId,
        patch: DesignPatch,
    },
    DeleteDesign {
        id: DesignId,
    },
    SelectDesign {
        id: DesignId,
    },
    AddFurniture {
        furniture: Box<NewFurniture>,
    },
    UpdateFurniture {
        id: FurnitureId,
        patch: FurniturePatch,
    },
    DeleteFurniture {
        id: FurnitureId,
    },
    SelectFurniture {
        id: Option<FurnitureId>,
    },
    SetViewMode {
        mode: ViewMode,
    },
    AddToCart {
        item: Box<FurnitureItem>,
    },
    RemoveFromCart {
        id: FurnitureId,
    },
    ClearCart,
}

#[derive(Debug)]
pub struct RoomStore {
    designs: Vec<RoomDesign>,
    current: Option<DesignId>,
    selected_furniture: Option<FurnitureId>,
    view_mode: ViewMode,
    cart: Vec<FurnitureItem>,
    notices: Notices,
    stamper: MonotonicStamper,
    revision: u64,
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomStore {
    /// An empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            designs: Vec::new(),
            current: None,
            selected_furniture: None,
            view_mode: ViewMode::default(),
            cart: Vec::new(),
            notices: Notices::new(),
            stamper: MonotonicStamper::new(clock),
            revision: 0,
        }
    }

    /// A store seeded with the sample design (nothing selected).
    pub fn with_sample(clock: Box<dyn Clock>) -> Self {
        let mut store = Self::with_clock(clock);
        let now = store.stamper.stamp();
        store.designs.push(sample_design(now));
        store
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn designs(&self) -> &[RoomDesign] {
        &self.designs
    }

    pub fn design(&self, id: DesignId) -> Option<&RoomDesign> {
        self.designs.iter().find(|d| d.id == id)
    }

    pub fn current_design_id(&self) -> Option<DesignId> {
        self.current
    }

    pub fn current_design(&self) -> Option<&RoomDesign> {
        self.current.and_then(|id| self.design(id))
    }

    pub fn selected_furniture_id(&self) -> Option<FurnitureId> {
        self.selected_furniture
    }

    /// The selected item, if the selection resolves in the current design.
    pub fn selected_furniture(&self) -> Option<&FurnitureItem> {
        let id = self.selected_furniture?;
        self.current_design()?.furniture(id)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn cart(&self) -> &[FurnitureItem] {
        &self.cart
    }

    /// Bumped on every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Queue a notice on behalf of a UI panel.
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push_notice(notice);
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// Apply a reified mutation. Returns `true` if state changed.
    pub fn apply(&mut self, mutation: RoomMutation) -> bool {
        match mutation {
            RoomMutation::CreateDesign { fields } => {
                self.create_design(*fields);
                true
            }
            RoomMutation::UpdateDesign { id, patch } => self.update_design(id, patch),
            RoomMutation::DeleteDesign { id } => self.delete_design(id),
            RoomMutation::SelectDesign { id } => self.select_design(id),
            RoomMutation::AddFurniture { furniture } => self.add_furniture(*furniture).is_some(),
            RoomMutation::UpdateFurniture { id, patch } => self.update_furniture(id, patch),
            RoomMutation::DeleteFurniture { id } => self.delete_furniture(id),
            RoomMutation::SelectFurniture { id } => self.select_furniture(id),
            RoomMutation::SetViewMode { mode } => self.set_view_mode(mode),
            RoomMutation::AddToCart { item } => {
                self.add_to_cart(&item);
                true
            }
            RoomMutation::RemoveFromCart { id } => self.remove_from_cart(id),
            RoomMutation::ClearCart => self.clear_cart(),
        }
    }

    /// Apply a batch, returning `true` if any mutation changed state.
    pub fn apply_all(&mut self, mutations: impl IntoIterator<Item = RoomMutation>) -> bool {
        mutations
            .into_iter()
            .fold(false, |changed, m| self.apply(m) || changed)
    }

    // ─── Designs ─────────────────────────────────────────────────────────

    /// Append a new design and make it current.
    pub fn create_design(&mut self, fields: NewDesign) -> DesignId {
        let id = DesignId::generate();
        let now = self.stamper.stamp();
        log::debug!("create design {id} ({:?})", fields.name);
        self.designs.push(RoomDesign::from_fields(id, fields, now));
        self.current = Some(id);
        self.notices.success("New room design created!");
        self.bump();
        id
    }

    /// Merge `patch` into the design with `id`, refreshing `updated_at`.
    pub fn update_design(&mut self, id: DesignId, patch: DesignPatch) -> bool {
        let now = self.stamper.stamp();
        let Some(design) = self.designs.iter_mut().find(|d| d.id == id) else {
            log::debug!("update_design: no design {id}");
            return false;
        };
        design.apply_patch(&patch);
        design.updated_at = now;
        self.notices.success("Room design updated!");
        self.bump();
        true
    }

    /// Remove a design. Deleting the current design clears current and the
    /// furniture selection.
    pub fn delete_design(&mut self, id: DesignId) -> bool {
        let before = self.designs.len();
        self.designs.retain(|d| d.id != id);
        if self.designs.len() == before {
            return false;
        }
        if self.current == Some(id) {
            self.current = None;
            self.selected_furniture = None;
        }
        log::debug!("deleted design {id}");
        self.notices.success("Room design deleted!");
        self.bump();
        true
    }

    /// Make `id` current (or none, if unknown) and clear furniture selection.
    pub fn select_design(&mut self, id: DesignId) -> bool {
        self.current = self.design(id).map(|d| d.id);
        self.selected_furniture = None;
        self.bump();
        true
    }

    // ─── Furniture ───────────────────────────────────────────────────────

    /// Append furniture to the current design. `None` without a current design.
    pub fn add_furniture(&mut self, furniture: NewFurniture) -> Option<FurnitureId> {
        let now = self.stamper.stamp();
        let design = self.current_design_mut()?;
        let id = FurnitureId::generate();
        let name = furniture.name.clone();
        design.furniture.push(furniture.into_item(id));
        design.updated_at = now;
        log::debug!("added furniture {id} to {}", design.id);
        self.notices.success(format!("Added {name} to the room!"));
        self.bump();
        Some(id)
    }

    /// Merge `patch` into an item of the current design. Called on every
    /// drag move as well as for form edits, so it stays quiet (no notice).
    pub fn update_furniture(&mut self, id: FurnitureId, patch: FurniturePatch) -> bool {
        let now = self.stamper.stamp();
        let Some(design) = self.current_design_mut() else {
            return false;
        };
        let Some(item) = design.furniture_mut(id) else {
            return false;
        };
        item.apply_patch(&patch);
        design.updated_at = now;
        self.bump();
        true
    }

    /// Remove an item from the current design, clearing the selection if it
    /// pointed at that item.
    pub fn delete_furniture(&mut self, id: FurnitureId) -> bool {
        let now = self.stamper.stamp();
        let Some(design) = self.current_design_mut() else {
            return false;
        };
        let before = design.furniture.len();
        design.furniture.retain(|f| f.id != id);
        if design.furniture.len() == before {
            return false;
        }
        design.updated_at = now;
        if self.selected_furniture == Some(id) {
            self.selected_furniture = None;
        }
        self.notices.success("Furniture removed from the room!");
        self.bump();
        true
    }

    /// Set the selection directly. The id is not checked against the
    /// current design.
    pub fn select_furniture(&mut self, id: Option<FurnitureId>) -> bool {
        if self.selected_furniture == id {
            return false;
        }
        self.selected_furniture = id;
        self.bump();
        true
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if self.view_mode == mode {
            return false;
        }
        self.view_mode = mode;
        self.bump();
        true
    }

    // ─── Cart ────────────────────────────────────────────────────────────

    /// Append a value snapshot of `item`. Later edits to the source item do
    /// not reach the cart copy.
    pub fn add_to_cart(&mut self, item: &FurnitureItem) {
        self.cart.push(item.clone());
        self.notices.success(format!("Added {} to cart!", item.name));
        self.bump();
    }

    /// Drop every cart entry with `id`.
    pub fn remove_from_cart(&mut self, id: FurnitureId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|item| item.id != id);
        if self.cart.len() == before {
            return false;
        }
        self.notices.success("Item removed from cart!");
        self.bump();
        true
    }

    pub fn clear_cart(&mut self) -> bool {
        let changed = !self.cart.is_empty();
        self.cart.clear();
        self.notices.success("Cart cleared!");
        if changed {
            self.bump();
        }
        changed
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn current_design_mut(&mut self) -> Option<&mut RoomDesign> {
        let id = self.current?;
        self.designs.iter_mut().find(|d| d.id == id)
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Latest stamp handed out, for tests asserting monotonicity.
    #[cfg(test)]
    fn stamp_now(&mut self) -> crate::clock::Timestamp {
        self.stamper.stamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::template;
    use crate::clock::{FixedClock, from_millis};
    use pretty_assertions::assert_eq;

    fn store() -> RoomStore {
        RoomStore::with_clock(Box::new(FixedClock(from_millis(1_000))))
    }

    #[test]
    fn create_design_sets_current_with_equal_timestamps() {
        let mut s = store();
        let id = s.create_design(NewDesign::named("Den"));
        let d = s.current_design().unwrap();
        assert_eq!(d.id, id);
        assert_eq!(d.created_at, d.updated_at);
        assert!(d.furniture.is_empty());
    }

    #[test]
    fn update_design_merges_and_advances_updated_at() {
        let mut s = store();
        let id = s.create_design(NewDesign::named("Den"));
        let created = s.design(id).unwrap().updated_at;

        assert!(s.update_design(
            id,
            DesignPatch {
                width: Some(6.0),
                ..Default::default()
            }
        ));
        let d = s.design(id).unwrap();
        assert_eq!(d.width, 6.0);
        assert_eq!(d.length, 4.0);
        assert!(d.updated_at > created);
    }

    #[test]
    fn update_unknown_design_is_noop() {
        let mut s = store();
        let rev = s.revision();
        assert!(!s.update_design(DesignId::intern("missing"), DesignPatch::default()));
        assert_eq!(s.revision(), rev);
    }

    #[test]
    fn delete_other_design_keeps_current() {
        let mut s = store();
        let a = s.create_design(NewDesign::named("A"));
        let b = s.create_design(NewDesign::named("B"));
        assert_eq!(s.current_design_id(), Some(b));
        assert!(s.delete_design(a));
        assert_eq!(s.current_design_id(), Some(b));
        assert!(s.delete_design(b));
        assert_eq!(s.current_design_id(), None);
    }

    #[test]
    fn deleting_current_design_clears_selection() {
        let mut s = store();
        let d = s.create_design(NewDesign::named("A"));
        let f = s
            .add_furniture(template("bed").unwrap().instantiate())
            .unwrap();
        s.select_furniture(Some(f));
        s.delete_design(d);
        assert_eq!(s.selected_furniture_id(), None);
    }

    #[test]
    fn select_design_always_clears_furniture_selection() {
        let mut s = RoomStore::with_sample(Box::new(FixedClock(from_millis(0))));
        let sample = s.designs()[0].id;
        s.select_design(sample);
        s.select_furniture(Some(FurnitureId::intern("furniture-1")));
        s.select_design(sample);
        assert_eq!(s.selected_furniture_id(), None);
        assert_eq!(s.current_design_id(), Some(sample));

        s.select_design(DesignId::intern("nope"));
        assert_eq!(s.current_design_id(), None);
    }

    #[test]
    fn add_furniture_without_current_design_is_noop() {
        let mut s = store();
        assert_eq!(s.add_furniture(template("sofa").unwrap().instantiate()), None);
        assert!(s.designs().is_empty());
        assert!(s.take_notices().is_empty());
    }

    #[test]
    fn furniture_ids_are_unique_within_design() {
        let mut s = store();
        s.create_design(NewDesign::named("A"));
        let ids: Vec<_> = (0..5)
            .filter_map(|_| s.add_furniture(template("armchair").unwrap().instantiate()))
            .collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn update_unknown_furniture_leaves_design_untouched() {
        let mut s = store();
        let d = s.create_design(NewDesign::named("A"));
        let before = s.design(d).unwrap().updated_at;
        assert!(!s.update_furniture(FurnitureId::intern("ghost"), FurniturePatch::rotation(90)));
        assert_eq!(s.design(d).unwrap().updated_at, before);
    }

    #[test]
    fn delete_unselected_furniture_keeps_selection() {
        let mut s = store();
        s.create_design(NewDesign::named("A"));
        let a = s.add_furniture(template("bed").unwrap().instantiate()).unwrap();
        let b = s.add_furniture(template("bed").unwrap().instantiate()).unwrap();
        s.select_furniture(Some(a));
        assert!(s.delete_furniture(b));
        assert_eq!(s.selected_furniture_id(), Some(a));
    }

    #[test]
    fn cart_keeps_snapshot_after_source_edit() {
        let mut s = store();
        s.create_design(NewDesign::named("A"));
        let id = s.add_furniture(template("sofa").unwrap().instantiate()).unwrap();
        let item = s.current_design().unwrap().furniture(id).unwrap().clone();
        s.add_to_cart(&item);

        s.update_furniture(
            id,
            FurniturePatch {
                color: Some("#000000".into()),
                width: Some(3.0),
                ..Default::default()
            },
        );
        s.delete_furniture(id);

        assert_eq!(s.cart().len(), 1);
        assert_eq!(s.cart()[0].color, "#696969");
        assert_eq!(s.cart()[0].width, 2.2);
    }

    #[test]
    fn cart_remove_and_clear() {
        let mut s = store();
        s.create_design(NewDesign::named("A"));
        let id = s.add_furniture(template("bed").unwrap().instantiate()).unwrap();
        let item = s.current_design().unwrap().furniture(id).unwrap().clone();
        s.add_to_cart(&item);
        s.add_to_cart(&item);
        assert!(s.remove_from_cart(id));
        assert!(s.cart().is_empty());
        assert!(!s.remove_from_cart(id));

        s.add_to_cart(&item);
        assert!(s.clear_cart());
        assert!(s.cart().is_empty());
    }

    #[test]
    fn view_mode_toggle() {
        let mut s = store();
        assert_eq!(s.view_mode(), ViewMode::TwoD);
        assert!(s.apply(RoomMutation::SetViewMode {
            mode: ViewMode::ThreeD
        }));
        assert!(!s.set_view_mode(ViewMode::ThreeD));
        assert_eq!(s.view_mode(), ViewMode::ThreeD);
    }

    #[test]
    fn notices_are_queued_in_order() {
        let mut s = store();
        s.create_design(NewDesign::named("A"));
        s.add_furniture(template("sofa").unwrap().instantiate());
        let messages: Vec<_> = s.take_notices().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec![
                "New room design created!".to_string(),
                "Added Living Room Sofa to the room!".to_string(),
            ]
        );
        assert!(s.take_notices().is_empty());
    }

    #[test]
    fn stamps_stay_monotonic_across_operations() {
        let mut s = store();
        let d = s.create_design(NewDesign::named("A"));
        let t0 = s.design(d).unwrap().updated_at;
        assert!(s.stamp_now() > t0);
    }
}
