//! The "career ledger": one rounded block per job, stacked vertically and
//! linked by connector lines. The active block grows and lights up, and the
//! whole chain slides so the active block sits at the scene origin.

use folio_protocol::{
    Color, Point, RenderCommand, SceneFrame, SceneLine, SceneNode, Shape, TextAlign, ThemeToken,
    Vec3, Viewport,
};

use crate::anim::Smoothed;
use crate::config::ChainConfig;
use crate::model::Experience;
use crate::palette;

/// Block edge length in scene units.
const BLOCK_SIZE: f64 = 1.3;
/// Gap between a block's center and its connector endpoints.
const CONNECTOR_INSET: f64 = 0.7;
const CONTAINER_X: f64 = 1.0;

const LABEL_STEP_PX: f64 = 60.0;
const LABEL_LIFT_PX: f64 = 20.0;
const LABEL_LEFT_PX: f64 = 24.0;
const LABEL_NUDGE_PX: f64 = 8.0;

#[derive(Debug, Clone, Default)]
struct BlockState {
    scale: Smoothed<f64>,
    color: Smoothed<Color>,
    emissive: Smoothed<Color>,
    emissive_intensity: Smoothed<f64>,
    spin: f64,
}

/// Animated state of the block chain.
#[derive(Debug, Clone)]
pub struct BlockChain {
    ids: Vec<String>,
    blocks: Vec<BlockState>,
    offset: Smoothed<f64>,
    config: ChainConfig,
}

impl BlockChain {
    pub fn new(experience: &[Experience], config: ChainConfig) -> Self {
        Self {
            ids: experience.iter().map(|e| e.id.clone()).collect(),
            blocks: vec![BlockState::default(); experience.len()],
            // The container starts at rest and glides to its first target.
            offset: Smoothed::with_value(0.0),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Current container offset (scene units).
    pub fn offset(&self) -> f64 {
        self.offset.value().unwrap_or(0.0)
    }

    /// Current smoothed scale of block `index`, once it has been ticked.
    pub fn scale(&self, index: usize) -> Option<f64> {
        self.blocks.get(index).and_then(|b| b.scale.value())
    }

    /// Advance every block one frame toward its target for `active` and
    /// return the resulting scene. `elapsed` is seconds since mount and only
    /// drives the idle wobble.
    pub fn tick(&mut self, active: usize, elapsed: f64) -> SceneFrame {
        let cfg = self.config;
        let spacing = cfg.item_spacing;
        let offset = self.offset.tick(active as f64 * spacing, cfg.offset_alpha);

        let count = self.blocks.len();
        let mut nodes = Vec::with_capacity(count);
        let mut lines = Vec::with_capacity(count.saturating_sub(1));

        for (i, block) in self.blocks.iter_mut().enumerate() {
            let is_active = i == active;
            let accent = palette::accent(i);

            let (scale, color, emissive, intensity) = if is_active {
                (
                    cfg.active_scale,
                    accent,
                    accent,
                    cfg.active_emissive_intensity,
                )
            } else {
                (
                    cfg.inactive_scale,
                    palette::BLOCK_INACTIVE,
                    Color::BLACK,
                    0.0,
                )
            };

            let scale = block.scale.tick(scale, cfg.scale_alpha);
            let color = block.color.tick(color, cfg.color_alpha);
            let emissive = block.emissive.tick(emissive, cfg.color_alpha);
            let emissive_intensity = block.emissive_intensity.tick(intensity, cfg.color_alpha);

            block.spin += cfg.spin_per_frame;
            let wobble = (elapsed * 0.3 + i as f64 * 0.5).sin() * 0.03;

            let y = -(i as f64) * spacing;
            nodes.push(SceneNode {
                id: self.ids[i].clone(),
                shape: Shape::RoundedBox,
                position: Vec3::new(0.0, y, 0.0),
                rotation: Vec3::new(wobble, block.spin, 0.0),
                scale,
                color,
                emissive,
                emissive_intensity,
                opacity: 1.0,
                label: None,
            });

            if i + 1 < count {
                let (color, width, opacity) = if is_active {
                    (accent, 2.0, 0.6)
                } else {
                    (palette::CONNECTOR_MUTED, 1.0, 0.3)
                };
                lines.push(SceneLine {
                    from: Vec3::new(0.0, y - CONNECTOR_INSET, 0.0),
                    to: Vec3::new(0.0, y - spacing + CONNECTOR_INSET, 0.0),
                    color,
                    width,
                    opacity,
                });
            }
        }

        SceneFrame {
            group_offset: Vec3::new(CONTAINER_X, offset, 0.0),
            nodes,
            lines,
        }
    }

    /// Index of the block under a point in chain-local scene coordinates
    /// (after removing the container offset), if any.
    pub fn hit_test(&self, local: Vec3) -> Option<usize> {
        let half = BLOCK_SIZE / 2.0;
        let spacing = self.config.item_spacing;
        if local.x.abs() > half {
            return None;
        }
        let index = (-local.y / spacing).round();
        if index < 0.0 || index as usize >= self.blocks.len() {
            return None;
        }
        let center = -index * spacing;
        ((local.y - center).abs() <= half).then_some(index as usize)
    }
}

/// Opacity of a label `distance` jobs away from the active one.
pub fn label_opacity(distance: usize) -> f64 {
    match distance {
        0 => 1.0,
        1 => 0.2,
        _ => 0.0,
    }
}

/// Company/date labels floating beside the chain.
///
/// Labels are stacked `60px` apart around the vertical center, shifted so
/// the active one sits at the middle; only the active label and its direct
/// neighbours are visible.
pub fn render_labels(
    experience: &[Experience],
    active: usize,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let center_y = viewport.height / 2.0;
    let mut commands = Vec::with_capacity(experience.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "chain-labels".into(),
        label: Some("Career ledger".into()),
    });

    for (i, job) in experience.iter().enumerate() {
        let distance = i.abs_diff(active);
        let opacity = label_opacity(distance);
        if opacity == 0.0 {
            continue;
        }
        let is_active = distance == 0;
        let offset = (i as f64 - active as f64) * LABEL_STEP_PX;
        let y = center_y + offset - LABEL_LIFT_PX;
        let x = LABEL_LEFT_PX + if is_active { 0.0 } else { LABEL_NUDGE_PX };

        commands.push(RenderCommand::DrawText {
            position: Point::new(x, y),
            text: job.company.clone(),
            color: if is_active {
                ThemeToken::TextPrimary
            } else {
                ThemeToken::TextMuted
            },
            font_size: 16.0,
            align: TextAlign::Left,
            opacity,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x, y + 18.0),
            text: job.date.clone(),
            color: if is_active {
                ThemeToken::Primary
            } else {
                ThemeToken::TextMuted
            },
            font_size: 12.0,
            align: TextAlign::Left,
            opacity,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
