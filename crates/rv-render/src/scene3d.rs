//! 3D preview scene assembly.
//!
//! Builds a renderer-agnostic scene DAG (`petgraph` stable graph, parent →
//! child edges) from a design: the room shell (floor plane and four walls),
//! lights, and one group per furniture item assembled from box and cylinder
//! primitives chosen by the item's type key.
//!
//! Coordinates are meters, Y up. Plan x maps to X and plan y maps to Z.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use rv_core::id::FurnitureId;
use rv_core::model::{Color, FurnitureItem, RoomDesign};
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::f32::consts::PI;

pub type Vec3 = [f32; 3];

pub const WALL_THICKNESS: f32 = 0.1;
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const SUN_INTENSITY: f32 = 1.0;
pub const SUN_POSITION: Vec3 = [5.0, 5.0, 5.0];
pub const SHADOW_MAP_SIZE: u32 = 1024;
pub const CAMERA_POSITION: Vec3 = [5.0, 5.0, 5.0];
/// Emissive intensity applied to a selected fallback box.
pub const SELECTED_GLOW: f32 = 0.1;

// ─── Geometry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Geometry {
    Plane { width: f32, length: f32 },
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshMaterial {
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive: Option<Color>,
    pub emissive_intensity: f32,
}

impl MeshMaterial {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            emissive: None,
            emissive_intensity: 0.0,
        }
    }
}

/// One part of a furniture assembly, positioned relative to the item's
/// group origin (its bounding-box center).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub part: &'static str,
    pub geometry: Geometry,
    pub offset: Vec3,
    /// Replaces the item color for this part (the mattress is always white).
    pub color_override: Option<Color>,
}

impl Primitive {
    fn cuboid(part: &'static str, size: Vec3, offset: Vec3) -> Self {
        Self {
            part,
            geometry: Geometry::Box {
                width: size[0],
                height: size[1],
                depth: size[2],
            },
            offset,
            color_override: None,
        }
    }

    fn cylinder(part: &'static str, radius: f32, height: f32, offset: Vec3) -> Self {
        Self {
            part,
            geometry: Geometry::Cylinder { radius, height },
            offset,
            color_override: None,
        }
    }
}

// ─── Assemblies ──────────────────────────────────────────────────────────

/// How an item's type key is turned into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshAssembly {
    Chair,
    Table,
    Sofa,
    Shelving,
    Bed,
    /// A plain box for any unrecognized type key.
    Fallback,
}

/// Type key → assembly. Keys not listed here use [`MeshAssembly::Fallback`].
const ASSEMBLIES: &[(&str, MeshAssembly)] = &[
    ("dining_chair", MeshAssembly::Chair),
    ("dining_table", MeshAssembly::Table),
    ("coffee_table", MeshAssembly::Table),
    ("sofa", MeshAssembly::Sofa),
    ("armchair", MeshAssembly::Sofa),
    ("bookshelf", MeshAssembly::Shelving),
    ("wardrobe", MeshAssembly::Shelving),
    ("bed", MeshAssembly::Bed),
];

/// Corner signs for four legs.
const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)];

impl MeshAssembly {
    pub fn for_kind(kind: &str) -> Self {
        ASSEMBLIES
            .iter()
            .find(|(key, _)| *key == kind)
            .map(|(_, a)| *a)
            .unwrap_or(MeshAssembly::Fallback)
    }

    /// Primitives for an item of the given dimensions.
    pub fn primitives(self, w: f32, h: f32, d: f32) -> SmallVec<[Primitive; 8]> {
        let mut parts = SmallVec::new();
        match self {
            MeshAssembly::Chair => {
                parts.push(Primitive::cuboid("seat", [w, h / 4.0, d], [0.0, -h / 4.0, 0.0]));
                parts.push(Primitive::cuboid(
                    "back",
                    [w, h / 2.0, 0.05],
                    [0.0, h / 4.0, -d / 2.0 + 0.05],
                ));
                for (sx, sz) in CORNERS {
                    parts.push(Primitive::cylinder(
                        "leg",
                        0.02,
                        h / 2.0,
                        [sx * (w / 2.0 - 0.05), -h / 2.0, sz * (d / 2.0 - 0.05)],
                    ));
                }
            }
            MeshAssembly::Table => {
                parts.push(Primitive::cuboid("top", [w, h / 6.0, d], [0.0, 0.0, 0.0]));
                for (sx, sz) in CORNERS {
                    parts.push(Primitive::cylinder(
                        "leg",
                        0.05,
                        h,
                        [sx * (w / 2.0 - 0.1), -h / 2.0, sz * (d / 2.0 - 0.1)],
                    ));
                }
            }
            MeshAssembly::Sofa => {
                parts.push(Primitive::cuboid("base", [w, h / 2.0, d], [0.0, -h / 4.0, 0.0]));
                parts.push(Primitive::cuboid(
                    "back",
                    [w, h / 2.0, 0.2],
                    [0.0, h / 4.0, -d / 2.0 + 0.1],
                ));
                for sx in [-1.0, 1.0] {
                    parts.push(Primitive::cuboid(
                        "arm",
                        [0.2, h * 0.7, d],
                        [sx * (w / 2.0 - 0.1), 0.0, 0.0],
                    ));
                }
            }
            MeshAssembly::Shelving => {
                parts.push(Primitive::cuboid("back", [w, h, 0.05], [0.0, 0.0, -d / 2.0]));
                for i in 0..4 {
                    parts.push(Primitive::cuboid(
                        "shelf",
                        [w, 0.04, d],
                        [0.0, -h / 2.0 + i as f32 * h / 4.0, 0.0],
                    ));
                }
                for sx in [-1.0, 1.0] {
                    parts.push(Primitive::cuboid("side", [0.05, h, d], [sx * w / 2.0, 0.0, 0.0]));
                }
            }
            MeshAssembly::Bed => {
                parts.push(Primitive {
                    color_override: Some(Color::WHITE),
                    ..Primitive::cuboid("mattress", [w, h / 2.0, d], [0.0, -h / 4.0, 0.0])
                });
                parts.push(Primitive::cuboid(
                    "frame",
                    [w + 0.1, h / 4.0, d + 0.1],
                    [0.0, -h / 2.0, 0.0],
                ));
                parts.push(Primitive::cuboid("headboard", [w, h, 0.1], [0.0, 0.0, -d / 2.0]));
            }
            MeshAssembly::Fallback => {
                parts.push(Primitive::cuboid("body", [w, h, d], [0.0, 0.0, 0.0]));
            }
        }
        parts
    }
}

// ─── Scene nodes ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Light {
    Ambient {
        intensity: f32,
    },
    #[serde(rename_all = "camelCase")]
    Directional {
        position: Vec3,
        intensity: f32,
        cast_shadow: bool,
        shadow_map_size: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum Node3d {
    Root,
    #[serde(rename_all = "camelCase")]
    Group {
        name: String,
        position: Vec3,
        /// Euler angles in radians (XYZ).
        rotation: Vec3,
        #[serde(skip_serializing_if = "Option::is_none")]
        furniture: Option<FurnitureId>,
    },
    #[serde(rename_all = "camelCase")]
    Mesh {
        name: String,
        geometry: Geometry,
        position: Vec3,
        rotation: Vec3,
        material: MeshMaterial,
        cast_shadow: bool,
        receive_shadow: bool,
    },
    Light(Light),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub position: Vec3,
    /// Orbit target.
    pub target: Vec3,
}

/// Nested view of the scene for serialization to hosts.
#[derive(Debug, Clone, Serialize)]
pub struct SceneTree<'a> {
    #[serde(flatten)]
    pub node: &'a Node3d,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneTree<'a>>,
}

/// The assembled 3D scene.
#[derive(Debug, Clone)]
pub struct Scene3d {
    pub graph: StableDiGraph<Node3d, ()>,
    pub root: NodeIndex,
    pub camera: Camera,
    furniture_index: HashMap<FurnitureId, NodeIndex>,
}

impl Scene3d {
    fn new(camera: Camera) -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(Node3d::Root);
        Self {
            graph,
            root,
            camera,
            furniture_index: HashMap::new(),
        }
    }

    fn add_node(&mut self, parent: NodeIndex, node: Node3d) -> NodeIndex {
        let furniture = match &node {
            Node3d::Group { furniture, .. } => *furniture,
            _ => None,
        };
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        if let Some(id) = furniture {
            self.furniture_index.insert(id, idx);
        }
        idx
    }

    /// Children in insertion order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// The furniture a clicked node belongs to: walks up to the nearest
    /// furniture group.
    pub fn furniture_at(&self, idx: NodeIndex) -> Option<FurnitureId> {
        let mut cursor = Some(idx);
        while let Some(current) = cursor {
            if let Some(Node3d::Group {
                furniture: Some(id), ..
            }) = self.graph.node_weight(current)
            {
                return Some(*id);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// The group node for a furniture item.
    pub fn furniture_node(&self, id: FurnitureId) -> Option<NodeIndex> {
        self.furniture_index.get(&id).copied()
    }

    /// Furniture groups in paint order.
    pub fn furniture_groups(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                matches!(
                    self.graph[idx],
                    Node3d::Group {
                        furniture: Some(_),
                        ..
                    }
                )
            })
            .collect()
    }

    pub fn tree(&self) -> SceneTree<'_> {
        self.subtree(self.root)
    }

    fn subtree(&self, idx: NodeIndex) -> SceneTree<'_> {
        SceneTree {
            node: &self.graph[idx],
            children: self.children(idx).into_iter().map(|c| self.subtree(c)).collect(),
        }
    }
}

// ─── Assembly ────────────────────────────────────────────────────────────

/// Assemble the preview scene for `design`.
pub fn build_scene(design: &RoomDesign, selected: Option<FurnitureId>) -> Scene3d {
    let (w, l, h) = (design.width, design.length, design.height);
    let mut scene = Scene3d::new(Camera {
        position: CAMERA_POSITION,
        target: [w / 2.0, 0.0, l / 2.0],
    });
    let root = scene.root;

    scene.add_node(
        root,
        Node3d::Light(Light::Ambient {
            intensity: AMBIENT_INTENSITY,
        }),
    );
    scene.add_node(
        root,
        Node3d::Light(Light::Directional {
            position: SUN_POSITION,
            intensity: SUN_INTENSITY,
            cast_shadow: true,
            shadow_map_size: SHADOW_MAP_SIZE,
        }),
    );

    add_room_shell(&mut scene, design);

    for item in &design.furniture {
        if !item.has_finite_geometry() {
            log::debug!("scene3d: skipping {} with non-finite geometry", item.id);
            continue;
        }
        add_furniture(&mut scene, item, selected == Some(item.id));
    }

    log::trace!(
        "scene3d: {} nodes for {} ({w}×{l}×{h})",
        scene.graph.node_count(),
        design.id
    );
    scene
}

fn add_room_shell(scene: &mut Scene3d, design: &RoomDesign) {
    let (w, l, h) = (design.width, design.length, design.height);
    let floor = MeshMaterial::solid(Color::from_hex_or_fallback(&design.floor_color));
    let wall = MeshMaterial::solid(Color::from_hex_or_fallback(&design.wall_color));

    let room = scene.add_node(
        scene.root,
        Node3d::Group {
            name: "room".into(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            furniture: None,
        },
    );

    scene.add_node(
        room,
        Node3d::Mesh {
            name: "floor".into(),
            geometry: Geometry::Plane { width: w, length: l },
            position: [w / 2.0, 0.0, l / 2.0],
            rotation: [-PI / 2.0, 0.0, 0.0],
            material: floor,
            cast_shadow: false,
            receive_shadow: true,
        },
    );

    let walls = [
        ("wall_back", [w, h, WALL_THICKNESS], [w / 2.0, h / 2.0, 0.0]),
        ("wall_left", [WALL_THICKNESS, h, l], [0.0, h / 2.0, l / 2.0]),
        ("wall_right", [WALL_THICKNESS, h, l], [w, h / 2.0, l / 2.0]),
        ("wall_far", [w, h, WALL_THICKNESS], [w / 2.0, h / 2.0, l]),
    ];
    for (name, [bw, bh, bd], position) in walls {
        scene.add_node(
            room,
            Node3d::Mesh {
                name: name.into(),
                geometry: Geometry::Box {
                    width: bw,
                    height: bh,
                    depth: bd,
                },
                position,
                rotation: [0.0; 3],
                material: wall,
                cast_shadow: false,
                receive_shadow: true,
            },
        );
    }
}

fn add_furniture(scene: &mut Scene3d, item: &FurnitureItem, selected: bool) {
    let (w, h, d) = (item.width, item.height, item.depth);
    let group = scene.add_node(
        scene.root,
        Node3d::Group {
            name: item.name.clone(),
            position: [item.position.x + w / 2.0, h / 2.0, item.position.y + d / 2.0],
            rotation: [0.0, item.rotation as f32 * PI / 180.0, 0.0],
            furniture: Some(item.id),
        },
    );

    let assembly = MeshAssembly::for_kind(&item.kind);
    let color = Color::from_hex_or_fallback(&item.color);

    for part in assembly.primitives(w, h, d) {
        let mut material = MeshMaterial::solid(part.color_override.unwrap_or(color));
        if assembly == MeshAssembly::Fallback && selected {
            material.emissive = Some(Color::WHITE);
            material.emissive_intensity = SELECTED_GLOW;
        }
        scene.add_node(
            group,
            Node3d::Mesh {
                name: part.part.into(),
                geometry: part.geometry,
                position: part.offset,
                rotation: [0.0; 3],
                material,
                cast_shadow: true,
                receive_shadow: false,
            },
        );
    }
}
