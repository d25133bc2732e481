//! Skills constellation: every skill is a node on a sphere, linked to its
//! neighbours in list order.

use std::f64::consts::PI;

use folio_protocol::{
    Color, CursorStyle, Point, RenderCommand, SceneFrame, SceneLine, SceneNode, Shape, TextAlign,
    ThemeToken, Vec3, Viewport,
};

use crate::anim::Smoothed;
use crate::config::SkillsConfig;
use crate::cursor::CursorController;
use crate::model::Resume;
use crate::palette;

const SMALL_NODE: f64 = 0.1;
const LARGE_NODE: f64 = 0.4;
const MIN_NODE: f64 = 0.15;
const NODE_JITTER: f64 = 0.15;
const EDGE_OPACITY: f64 = 0.15;
const EMISSIVE_INTENSITY: f64 = 0.5;

const MINOR_CATEGORIES: [&str; 2] = ["Tools & Hardware", "Languages"];
const HEADLINE_SKILLS: [&str; 5] = ["Python", "Solidity", "JavaScript", "TypeScript", "Kubernetes"];

/// Point `i` of `n` on a Fibonacci spiral over a sphere of radius `r`.
///
/// Deterministic and roughly even; `i` runs from the south pole (`i = 0`)
/// toward the north pole.
pub fn sphere_point(i: usize, n: usize, r: f64) -> Vec3 {
    if n == 0 {
        return Vec3::ZERO;
    }
    let n_f = n as f64;
    let phi = (-1.0 + 2.0 * i as f64 / n_f).clamp(-1.0, 1.0).acos();
    let theta = (n_f * PI).sqrt() * phi;
    Vec3::new(
        r * theta.cos() * phi.sin(),
        r * theta.sin() * phi.sin(),
        r * phi.cos(),
    )
}

/// Layout for `n` points on a sphere of radius `r`.
pub fn sphere_layout(n: usize, r: f64) -> Vec<Vec3> {
    (0..n).map(|i| sphere_point(i, n, r)).collect()
}

/// Radius of a skill's node.
///
/// Minor categories get small dots, headline skills large ones; the rest
/// get a stable pseudo-random size derived from the label.
pub fn node_size(label: &str, category: &str) -> f64 {
    if MINOR_CATEGORIES.contains(&category) {
        SMALL_NODE
    } else if HEADLINE_SKILLS.iter().any(|s| label.contains(s)) {
        LARGE_NODE
    } else {
        MIN_NODE + label_fraction(label) * NODE_JITTER
    }
}

/// FNV-1a of the label mapped into `[0, 1)`.
fn label_fraction(label: &str) -> f64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in label.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    pub label: String,
    pub category: String,
    pub position: Vec3,
    pub size: f64,
    pub color: Color,
    pub token: ThemeToken,
}

/// Static layout plus per-node hover animation.
#[derive(Debug, Clone)]
pub struct SkillGraph {
    nodes: Vec<SkillNode>,
    scales: Vec<Smoothed<f64>>,
    hovered: Option<usize>,
    config: SkillsConfig,
}

impl SkillGraph {
    /// Lay out every skill once. Positions never change afterwards.
    pub fn new(resume: &Resume, config: SkillsConfig) -> Self {
        let n = resume.skill_count();
        let nodes: Vec<SkillNode> = resume
            .flat_skills()
            .enumerate()
            .map(|(i, (label, category))| SkillNode {
                label: label.to_string(),
                category: category.to_string(),
                position: sphere_point(i, n, config.radius),
                size: node_size(label, category),
                color: palette::category_color(category),
                token: palette::category_token(category),
            })
            .collect();
        Self {
            scales: vec![Smoothed::with_value(1.0); nodes.len()],
            nodes,
            hovered: None,
            config,
        }
    }

    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Undirected edges between list neighbours.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> {
        (1..self.nodes.len()).map(|i| (i - 1, i))
    }

    /// Pointer entered `index` (or left every node with `None`).
    pub fn hover(&mut self, index: Option<usize>, cursor: &mut dyn CursorController) {
        let index = index.filter(|&i| i < self.nodes.len());
        if index == self.hovered {
            return;
        }
        self.hovered = index;
        cursor.set_cursor(if index.is_some() {
            CursorStyle::Grab
        } else {
            CursorStyle::Auto
        });
    }

    /// Advance hover animations one frame and return the scene.
    pub fn tick(&mut self) -> SceneFrame {
        let cfg = self.config;
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (i, (node, scale)) in self.nodes.iter().zip(self.scales.iter_mut()).enumerate() {
            let hovered = self.hovered == Some(i);
            let target = if hovered { cfg.hover_scale } else { 1.0 };
            let scale = scale.tick(target, cfg.hover_alpha);
            let color = if hovered { palette::HOVER } else { node.color };
            nodes.push(SceneNode {
                id: node.label.clone(),
                shape: Shape::Sphere,
                position: node.position,
                rotation: Vec3::ZERO,
                scale: scale * node.size,
                color,
                emissive: color,
                emissive_intensity: EMISSIVE_INTENSITY,
                opacity: 1.0,
                label: Some(node.label.clone()),
            });
        }
        let lines = self
            .edges()
            .map(|(a, b)| SceneLine {
                from: self.nodes[a].position,
                to: self.nodes[b].position,
                color: self.nodes[a].color,
                width: 1.0,
                opacity: EDGE_OPACITY,
            })
            .collect();
        SceneFrame {
            group_offset: Vec3::ZERO,
            nodes,
            lines,
        }
    }

    /// Orthographic 2D projection of the constellation, spun by `yaw`
    /// radians around the vertical axis. Far nodes are drawn first.
    pub fn render_projected(&self, viewport: &Viewport, yaw: f64) -> Vec<RenderCommand> {
        let radius = self.config.radius;
        let scale = viewport.width.min(viewport.height) / (2.0 * radius * 1.2);
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        let project = |v: Vec3| {
            let r = v.rotate_y(yaw);
            let p = Point::new(center.x + r.x * scale, center.y - r.y * scale);
            (p, r.z)
        };

        let mut commands = Vec::with_capacity(self.nodes.len() * 2 + 3);
        commands.push(RenderCommand::BeginGroup {
            id: "skills".into(),
            label: Some("Tech constellation".into()),
        });

        for (a, b) in self.edges() {
            let (from, _) = project(self.nodes[a].position);
            let (to, _) = project(self.nodes[b].position);
            commands.push(RenderCommand::DrawLine {
                from,
                to,
                color: ThemeToken::Border,
                width: 1.0,
            });
        }

        let mut order: Vec<(usize, Point, f64)> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let (p, z) = project(node.position);
                (i, p, z)
            })
            .collect();
        order.sort_by(|a, b| a.2.total_cmp(&b.2));

        for (i, p, z) in order {
            let node = &self.nodes[i];
            let hovered = self.hovered == Some(i);
            let hover = self.scales[i].value().unwrap_or(1.0);
            // Nodes on the far side fade toward the background.
            let depth = ((z / radius) + 1.0) / 2.0;
            let opacity = 0.35 + 0.65 * depth.clamp(0.0, 1.0);
            commands.push(RenderCommand::DrawCircle {
                center: p,
                radius: node.size * hover * scale,
                color: if hovered {
                    ThemeToken::HoverHighlight
                } else {
                    node.token
                },
                opacity,
            });
            commands.push(RenderCommand::DrawText {
                position: Point::new(p.x, p.y - (node.size + 0.2) * scale),
                text: node.label.clone(),
                color: ThemeToken::TextPrimary,
                font_size: (node.size * 0.6).max(0.12) * scale,
                align: TextAlign::Center,
                opacity,
            });
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorState;

    fn graph() -> SkillGraph {
        SkillGraph::new(&Resume::embedded().unwrap(), SkillsConfig::default())
    }

    #[test]
    fn sphere_points_lie_on_sphere() {
        for i in 0..31 {
            let p = sphere_point(i, 31, 3.0);
            assert!((p.length() - 3.0).abs() < 1e-9, "point {i}");
        }
    }

    #[test]
    fn first_point_is_south_pole() {
        let p = sphere_point(0, 10, 2.0);
        assert!((p.z + 2.0).abs() < 1e-12);
        assert!(p.x.abs() < 1e-12 && p.y.abs() < 1e-12);
    }

    #[test]
    fn layout_is_deterministic() {
        assert_eq!(sphere_layout(31, 3.0), sphere_layout(31, 3.0));
        assert_eq!(sphere_point(0, 0, 3.0), Vec3::ZERO);
    }

    #[test]
    fn node_sizes_by_category_and_label() {
        assert_eq!(node_size("Arduino", "Tools & Hardware"), 0.1);
        assert_eq!(node_size("Python", "Programming"), 0.4);
        let react = node_size("React.js", "Programming");
        assert_eq!(react, node_size("React.js", "Programming"));
        let s = node_size("SQL", "Programming");
        assert!((0.15..0.30).contains(&s));
    }

    #[test]
    fn graph_covers_every_skill() {
        let g = graph();
        assert_eq!(g.nodes().len(), 31);
        assert_eq!(g.edges().count(), 30);
        assert_eq!(g.nodes()[0].token, ThemeToken::CategoryProgramming);
    }

    #[test]
    fn hover_grows_node_and_requests_grab() {
        let mut g = graph();
        let mut cursor = CursorState::default();
        g.hover(Some(3), &mut cursor);
        assert_eq!(cursor.current, CursorStyle::Grab);
        let frame = g.tick();
        let base = g.nodes()[3].size;
        assert!(frame.nodes[3].scale > base);
        assert_eq!(frame.nodes[3].color, palette::HOVER);

        g.hover(None, &mut cursor);
        assert_eq!(cursor.current, CursorStyle::Auto);
    }

    #[test]
    fn hover_out_of_range_is_ignored() {
        let mut g = graph();
        let mut cursor = CursorState::default();
        g.hover(Some(500), &mut cursor);
        assert_eq!(g.hovered(), None);
        assert_eq!(cursor.current, CursorStyle::Auto);
    }

    #[test]
    fn projection_draws_every_node() {
        let g = graph();
        let cmds = g.render_projected(&Viewport::sized(600.0, 600.0), 0.3);
        let circles = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawCircle { .. }))
            .count();
        assert_eq!(circles, 31);
    }
}
