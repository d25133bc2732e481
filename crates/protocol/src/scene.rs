use serde::{Deserialize, Serialize};

use crate::types::{Color, Vec3};

/// Primitive a 3D renderer should instantiate for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    RoundedBox,
    Sphere,
    Cube,
    Octahedron,
    Torus,
}

/// Resolved visual state of one scene element for the current frame.
///
/// The core never renders 3D itself; it hands renderers the smoothed
/// target values and leaves lighting, materials and camera to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    pub shape: Shape,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f64,
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f64,
    pub opacity: f64,
    /// Optional text rendered next to the node (skill labels).
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
}

/// Everything a renderer needs to draw one frame of a 3D visual.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneFrame {
    /// Translation applied to every node and line (container transform).
    pub group_offset: Vec3,
    pub nodes: Vec<SceneNode>,
    pub lines: Vec<SceneLine>,
}

/// Pointer cursor requested by an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Auto,
    Pointer,
    Grab,
}
