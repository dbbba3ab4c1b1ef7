pub mod auth;
pub mod catalog;
pub mod clock;
pub mod id;
pub mod input;
pub mod model;
pub mod notice;
pub mod store;

pub use auth::{AuthState, User};
pub use catalog::{FURNITURE_TEMPLATES, SAMPLE_DESIGN_ID, sample_design, template};
pub use clock::{Clock, FixedClock, MonotonicStamper, SystemClock, Timestamp, date_string, from_millis};
pub use id::{DesignId, FurnitureId};
pub use model::*;
pub use notice::{Notice, NoticeLevel, Notices};
pub use store::{RoomMutation, RoomStore};
