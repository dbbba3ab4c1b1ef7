//! Integration tests: signed-in session driving the plan canvas
//! (rv-editor ↔ rv-render ↔ rv-core).

use pretty_assertions::assert_eq;
use rv_core::clock::{FixedClock, from_millis};
use rv_core::id::FurnitureId;
use rv_core::model::{NewDesign, Position};
use rv_editor::designs_list::create_named;
use rv_editor::{App, FurnitureField, InputEvent, PanelTab};

fn signed_in() -> App {
    let mut app = App::with_clock(|| Box::new(FixedClock(from_millis(0))));
    assert!(app.login("designer1", "password123"));
    app
}

fn open_sample(app: &mut App) {
    let session = app.session_mut().unwrap();
    let sample = session.store.designs()[0].id;
    session.store.select_design(sample);
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn drag_sofa_across_plan() {
    let mut app = signed_in();
    open_sample(&mut app);
    let session = app.session_mut().unwrap();
    let sofa = FurnitureId::intern("furniture-1");

    // Grab the sofa 10 px in from its corner.
    assert!(session.pointer(InputEvent::from_pointer_down(60.0, 60.0)));
    assert_eq!(session.store.selected_furniture_id(), Some(sofa));
    assert!(session.is_dragging());

    assert!(session.pointer(InputEvent::from_pointer_move(160.0, 260.0)));
    let item = session.store.current_design().unwrap().furniture(sofa).unwrap();
    assert_eq!(item.position, Position::new(1.5, 2.5));

    assert!(!session.pointer(InputEvent::from_pointer_up(160.0, 260.0)));
    assert!(!session.is_dragging());
}

#[test]
fn drag_result_always_inside_room() {
    let mut app = signed_in();
    open_sample(&mut app);
    let session = app.session_mut().unwrap();
    let table = FurnitureId::intern("furniture-2");

    session.pointer(InputEvent::from_pointer_down(210.0, 160.0));
    assert_eq!(session.store.selected_furniture_id(), Some(table));

    let (room_w, room_l) = (5.0, 4.0);
    for (x, y) in [(-1e4, -1e4), (1e4, 1e4), (-50.0, 300.0), (700.0, -3.0), (250.0, 250.0)] {
        session.pointer(InputEvent::from_pointer_move(x, y));
        let item = session.store.current_design().unwrap().furniture(table).unwrap();
        assert!(item.position.x >= 0.0 && item.position.x <= room_w - item.width);
        assert!(item.position.y >= 0.0 && item.position.y <= room_l - item.depth);
    }
}

#[test]
fn clicking_floor_clears_selection() {
    let mut app = signed_in();
    open_sample(&mut app);
    let session = app.session_mut().unwrap();

    session.pointer(InputEvent::from_pointer_down(60.0, 60.0));
    session.pointer(InputEvent::from_pointer_up(60.0, 60.0));
    assert!(session.store.selected_furniture_id().is_some());

    session.pointer(InputEvent::from_pointer_down(480.0, 380.0));
    assert_eq!(session.store.selected_furniture_id(), None);
}

#[test]
fn pointer_without_design_is_ignored() {
    let mut app = signed_in();
    let session = app.session_mut().unwrap();
    assert!(!session.pointer(InputEvent::from_pointer_down(60.0, 60.0)));
    assert!(session.plan_layout().is_none());
}

// ─── Panel ──────────────────────────────────────────────────────────────

#[test]
fn panel_edits_reach_both_views() {
    let mut app = signed_in();
    let session = app.session_mut().unwrap();
    create_named(&mut session.store, "Den");
    let id = session.panel.add_template(&mut session.store, "bed").unwrap();
    session.store.select_furniture(Some(id));
    assert!(session.panel.select_tab(PanelTab::Furniture, &session.store));

    session
        .panel
        .edit_furniture(&mut session.store, FurnitureField::Color, "#336699");

    let layout = session.plan_layout().unwrap();
    assert_eq!(layout.rect(id).unwrap().color, "#336699");
    let scene = session.scene().unwrap();
    assert!(scene.furniture_node(id).is_some());
}

// ─── Session lifetime ───────────────────────────────────────────────────

#[test]
fn logout_drops_room_state() {
    let mut app = signed_in();
    {
        let session = app.session_mut().unwrap();
        session.store.create_design(NewDesign::named("Scratch"));
        assert_eq!(session.store.designs().len(), 2);
    }

    app.logout();
    assert!(app.session().is_none());

    assert!(app.login("designer1", "password123"));
    let session = app.session().unwrap();
    assert_eq!(session.store.designs().len(), 1);
    assert_eq!(session.store.designs()[0].name, "Living Room Sample");
}
