//! "My Designs" sidebar: summaries plus create / view / delete.

use rv_core::clock::date_string;
use rv_core::id::DesignId;
use rv_core::model::{NewDesign, RoomDesign};
use rv_core::store::RoomStore;
use serde::Serialize;

pub const DESIGNS_TITLE: &str = "My Designs";
pub const EMPTY_DESIGNS_TEXT: &str = "No designs yet. Create your first room design!";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSummary {
    pub id: DesignId,
    pub name: String,
    /// `"Size: {w}m × {l}m × {h}m"`
    pub size: String,
    /// `"Furniture: {n} items"`
    pub furniture: String,
    /// UTC calendar date of the last update.
    pub last_updated: String,
    pub current: bool,
}

impl DesignSummary {
    pub fn of(design: &RoomDesign, current: bool) -> Self {
        Self {
            id: design.id,
            name: design.name.clone(),
            size: format!(
                "Size: {}m × {}m × {}m",
                design.width, design.length, design.height
            ),
            furniture: format!("Furniture: {} items", design.furniture.len()),
            last_updated: date_string(design.updated_at),
            current,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignsListView {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_text: Option<&'static str>,
    pub designs: Vec<DesignSummary>,
}

pub fn designs_list(store: &RoomStore) -> DesignsListView {
    let current = store.current_design_id();
    let designs: Vec<_> = store
        .designs()
        .iter()
        .map(|d| DesignSummary::of(d, current == Some(d.id)))
        .collect();
    DesignsListView {
        title: DESIGNS_TITLE,
        empty_text: designs.is_empty().then_some(EMPTY_DESIGNS_TEXT),
        designs,
    }
}

/// Name used when the dialog is submitted blank.
pub fn default_design_name(store: &RoomStore) -> String {
    format!("Room Design {}", store.designs().len() + 1)
}

/// Create a design with default geometry and colors from the "New Design"
/// dialog. It becomes current. Only an empty name gets the default;
/// whitespace is kept as typed.
pub fn create_named(store: &mut RoomStore, name: &str) -> DesignId {
    let name = match name {
        "" => default_design_name(store),
        _ => name.to_string(),
    };
    store.create_design(NewDesign::named(name))
}
