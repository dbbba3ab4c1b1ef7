//! Application shell: header, auth gate and the signed-in session.
//!
//! The room store lives inside [`Session`], which exists only while a user
//! is signed in. Logging in mounts a fresh store seeded with the sample
//! design; logging out drops it along with every unsaved design and the
//! cart.

use crate::designs_list::{DesignsListView, designs_list};
use crate::drag::{PlanDragTool, Tool};
use crate::input::InputEvent;
use crate::panel::{ControlPanel, EMPTY_PROMPT, PanelView};
use rv_core::auth::{AuthState, User};
use rv_core::clock::{Clock, SystemClock};
use rv_core::model::ViewMode;
use rv_core::notice::Notice;
use rv_core::store::RoomStore;
use rv_render::hit::hit_test;
use rv_render::plan::{PlanLayout, layout_plan};
use rv_render::scene3d::{Scene3d, build_scene};
use serde::Serialize;

pub const APP_TITLE: &str = "Room Vision Designer";

type ClockFactory = Box<dyn Fn() -> Box<dyn Clock>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView<'a> {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<&'a User>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Which canvas occupies the center pane.
    pub canvas: ViewMode,
    /// Shown in place of either canvas when no design is current.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_prompt: Option<&'static str>,
}

/// Everything that exists only while signed in.
#[derive(Debug)]
pub struct Session {
    pub store: RoomStore,
    pub panel: ControlPanel,
    drag: PlanDragTool,
}

impl Session {
    fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            store: RoomStore::with_sample(clock),
            panel: ControlPanel::new(),
            drag: PlanDragTool::new(),
        }
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView {
            canvas: self.store.view_mode(),
            empty_prompt: self.store.current_design().is_none().then_some(EMPTY_PROMPT),
        }
    }

    pub fn designs_list(&self) -> DesignsListView {
        designs_list(&self.store)
    }

    pub fn panel_view(&self) -> PanelView<'_> {
        self.panel.view(&self.store)
    }

    pub fn plan_layout(&self) -> Option<PlanLayout> {
        let design = self.store.current_design()?;
        Some(layout_plan(design, self.store.selected_furniture_id()))
    }

    pub fn scene(&self) -> Option<Scene3d> {
        let design = self.store.current_design()?;
        Some(build_scene(design, self.store.selected_furniture_id()))
    }

    /// Feed a plan pointer event through the drag tool. Returns `true` if
    /// the store changed and the canvas needs repainting.
    pub fn pointer(&mut self, event: InputEvent) -> bool {
        let Some(design) = self.store.current_design() else {
            self.drag.cancel();
            return false;
        };
        let hit = match event {
            InputEvent::PointerDown { x, y } => {
                let layout = layout_plan(design, self.store.selected_furniture_id());
                hit_test(&layout, x, y)
            }
            _ => None,
        };
        let mutations = self.drag.handle(&event, hit, design);
        self.store.apply_all(mutations)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.dragging().is_some()
    }
}

pub struct App {
    auth: AuthState,
    session: Option<Session>,
    clock: ClockFactory,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("auth", &self.auth)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_clock(|| Box::new(SystemClock))
    }

    /// Sessions stamp designs with clocks from `clock`.
    pub fn with_clock(clock: impl Fn() -> Box<dyn Clock> + 'static) -> Self {
        Self {
            auth: AuthState::new(),
            session: None,
            clock: Box::new(clock),
        }
    }

    pub fn header(&self) -> HeaderView<'_> {
        HeaderView {
            title: APP_TITLE,
            user: self.auth.user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Sign in. A successful login mounts a session if none is mounted yet.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if !self.auth.login(username, password) {
            return false;
        }
        if self.session.is_none() {
            log::info!("mounting room session");
            self.session = Some(Session::new((self.clock)()));
        }
        true
    }

    /// Sign out and drop the session.
    pub fn logout(&mut self) {
        self.auth.logout();
        if self.session.take().is_some() {
            log::info!("room session dropped");
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Drain auth and room notices, auth first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let mut notices = self.auth.take_notices();
        if let Some(session) = &mut self.session {
            notices.extend(session.store.take_notices());
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rv_core::clock::{FixedClock, from_millis};

    fn app() -> App {
        App::with_clock(|| Box::new(FixedClock(from_millis(0))))
    }

    #[test]
    fn header_shows_user_after_login() {
        let mut app = app();
        assert_eq!(app.header().title, "Room Vision Designer");
        assert!(app.header().user.is_none());

        assert!(app.login("designer2", "password123"));
        assert_eq!(app.header().user.unwrap().name, "Yeshan");
    }

    #[test]
    fn session_only_while_signed_in() {
        let mut app = app();
        assert!(app.session().is_none());
        assert!(!app.login("designer1", "nope"));
        assert!(app.session().is_none());

        app.login("designer1", "password123");
        let session = app.session().unwrap();
        assert_eq!(session.store.designs().len(), 1);
        assert!(session.store.current_design().is_none());

        app.logout();
        assert!(app.session().is_none());
    }

    #[test]
    fn dashboard_reports_canvas() {
        let mut app = app();
        app.login("designer1", "password123");
        let session = app.session_mut().unwrap();
        assert_eq!(session.dashboard().empty_prompt, Some(EMPTY_PROMPT));

        let sample = session.store.designs()[0].id;
        session.store.select_design(sample);
        session.store.set_view_mode(ViewMode::ThreeD);
        assert_eq!(
            session.dashboard(),
            DashboardView {
                canvas: ViewMode::ThreeD,
                empty_prompt: None,
            }
        );
        assert!(session.scene().is_some());
    }

    #[test]
    fn notices_are_merged() {
        let mut app = app();
        app.login("designer1", "password123");
        let messages: Vec<_> = app.take_notices().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Welcome back, Tharuka Muthukuda!".to_string()]);
    }
}
