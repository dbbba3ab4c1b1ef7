//! Core data model for room designs.
//!
//! A `RoomDesign` owns an insertion-ordered list of `FurnitureItem`s. Items
//! are instantiated from immutable `FurnitureTemplate`s (see `catalog`).
//! Positions are in meters, top-left anchored in plan space; rotation is in
//! whole degrees and interpreted mod 360 by the renderers.
//!
//! Partial edits travel as `DesignPatch` / `FurniturePatch`: every field is
//! optional and only `Some` fields are merged.

use crate::clock::Timestamp;
use crate::id::{DesignId, FurnitureId};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    /// Neutral grey used when a stored color string does not parse.
    pub const FALLBACK: Color = Color::rgba(0.5, 0.5, 0.5, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Parse, falling back to [`Color::FALLBACK`].
    pub fn from_hex_or_fallback(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::FALLBACK)
    }

    /// Channels as 8-bit values.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Emit as `#RRGGBB` (or `#RRGGBBAA` when not opaque).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Perceived luminance (sRGB weights), 0.0 ..= 1.0.
    pub fn luminance(&self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Plan-space position in meters (top-left anchor).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which canvas the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::TwoD => "2d",
            ViewMode::ThreeD => "3d",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "2d" => Some(ViewMode::TwoD),
            "3d" => Some(ViewMode::ThreeD),
            _ => None,
        }
    }
}

// ─── Furniture ───────────────────────────────────────────────────────────

/// A catalog entry. Never mutated; copied into a design on instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FurnitureTemplate {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: &'static str,
    pub material: &'static str,
}

impl FurnitureTemplate {
    /// Furniture fields for a fresh placement at the room origin, unrotated.
    pub fn instantiate(&self) -> NewFurniture {
        NewFurniture {
            kind: self.kind.to_string(),
            name: self.name.to_string(),
            position: Position::ORIGIN,
            rotation: 0,
            width: self.width,
            height: self.height,
            depth: self.depth,
            color: self.color.to_string(),
            material: self.material.to_string(),
        }
    }
}

/// Furniture fields without an id, as supplied to `add_furniture`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFurniture {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub position: Position,
    pub rotation: i32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: String,
    pub material: String,
}

impl NewFurniture {
    pub fn into_item(self, id: FurnitureId) -> FurnitureItem {
        FurnitureItem {
            id,
            kind: self.kind,
            name: self.name,
            position: self.position,
            rotation: self.rotation,
            width: self.width,
            height: self.height,
            depth: self.depth,
            color: self.color,
            material: self.material,
        }
    }
}

/// A furniture instance owned by exactly one design (or a cart snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: FurnitureId,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub position: Position,
    /// Whole degrees, any value; interpreted mod 360.
    pub rotation: i32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: String,
    pub material: String,
}

impl FurnitureItem {
    /// Rotation normalized into `0..360`.
    pub fn normalized_rotation(&self) -> i32 {
        self.rotation.rem_euclid(360)
    }

    /// Whether all geometry is finite (lenient field input can write NaN).
    pub fn has_finite_geometry(&self) -> bool {
        [
            self.position.x,
            self.position.y,
            self.width,
            self.height,
            self.depth,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Merge `Some` fields of `patch` into this item.
    pub fn apply_patch(&mut self, patch: &FurniturePatch) {
        if let Some(kind) = &patch.kind {
            self.kind = kind.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(depth) = patch.depth {
            self.depth = depth;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(material) = &patch.material {
            self.material = material.clone();
        }
    }
}

/// Partial furniture update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FurniturePatch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub position: Option<Position>,
    pub rotation: Option<i32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub depth: Option<f32>,
    pub color: Option<String>,
    pub material: Option<String>,
}

impl FurniturePatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            position: Some(Position::new(x, y)),
            ..Default::default()
        }
    }

    pub fn rotation(degrees: i32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }
}

// ─── Designs ─────────────────────────────────────────────────────────────

pub const DEFAULT_ROOM_WIDTH: f32 = 5.0;
pub const DEFAULT_ROOM_LENGTH: f32 = 4.0;
pub const DEFAULT_ROOM_HEIGHT: f32 = 2.5;
pub const DEFAULT_WALL_COLOR: &str = "#F5F5F5";
pub const DEFAULT_FLOOR_COLOR: &str = "#D2B48C";

/// Design fields without id and timestamps, as supplied to `create_design`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDesign {
    pub name: String,
    pub width: f32,
    pub length: f32,
    pub height: f32,
    pub wall_color: String,
    pub floor_color: String,
    #[serde(default)]
    pub furniture: Vec<FurnitureItem>,
}

impl NewDesign {
    /// A 5 × 4 × 2.5 m room with neutral colors and no furniture.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: DEFAULT_ROOM_WIDTH,
            length: DEFAULT_ROOM_LENGTH,
            height: DEFAULT_ROOM_HEIGHT,
            wall_color: DEFAULT_WALL_COLOR.to_string(),
            floor_color: DEFAULT_FLOOR_COLOR.to_string(),
            furniture: Vec::new(),
        }
    }
}

/// A single room's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDesign {
    pub id: DesignId,
    pub name: String,
    /// Footprint along plan x (meters).
    pub width: f32,
    /// Footprint along plan y (meters).
    pub length: f32,
    /// Ceiling height (meters).
    pub height: f32,
    pub wall_color: String,
    pub floor_color: String,
    pub furniture: Vec<FurnitureItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoomDesign {
    pub fn from_fields(id: DesignId, fields: NewDesign, now: Timestamp) -> Self {
        Self {
            id,
            name: fields.name,
            width: fields.width,
            length: fields.length,
            height: fields.height,
            wall_color: fields.wall_color,
            floor_color: fields.floor_color,
            furniture: fields.furniture,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn furniture(&self, id: FurnitureId) -> Option<&FurnitureItem> {
        self.furniture.iter().find(|f| f.id == id)
    }

    pub fn furniture_mut(&mut self, id: FurnitureId) -> Option<&mut FurnitureItem> {
        self.furniture.iter_mut().find(|f| f.id == id)
    }

    /// Merge `Some` fields of `patch` into this design (timestamps untouched).
    pub fn apply_patch(&mut self, patch: &DesignPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(length) = patch.length {
            self.length = length;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(wall_color) = &patch.wall_color {
            self.wall_color = wall_color.clone();
        }
        if let Some(floor_color) = &patch.floor_color {
            self.floor_color = floor_color.clone();
        }
    }
}

/// Partial design update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignPatch {
    pub name: Option<String>,
    pub width: Option<f32>,
    pub length: Option<f32>,
    pub height: Option<f32>,
    pub wall_color: Option<String>,
    pub floor_color: Option<String>,
}
