//! Landing section: floating background shapes and the name/role header.

use folio_protocol::{
    Color, Point, RenderCommand, SceneFrame, SceneNode, Shape, TextAlign, ThemeToken, Vec3,
    Viewport,
};
use serde::Serialize;

use crate::model::Personal;
use crate::views::wrap_text;

const SHAPE_OPACITY: f64 = 0.8;
/// Page progress over which the hero fades out.
const FADE_END: f64 = 0.2;
const FADE_MIN_SCALE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroShape {
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f64,
    pub color: Color,
}

pub const HERO_SHAPES: [HeroShape; 4] = [
    HeroShape {
        shape: Shape::Cube,
        position: Vec3::new(-3.0, 2.0, -2.0),
        rotation: Vec3::new(0.0, 0.5, 0.0),
        scale: 1.2,
        color: Color::rgb8(0x4f, 0x46, 0xe5),
    },
    HeroShape {
        shape: Shape::Octahedron,
        position: Vec3::new(4.0, -1.0, -4.0),
        rotation: Vec3::new(0.5, 0.0, 0.0),
        scale: 1.5,
        color: Color::rgb8(0x0e, 0xa5, 0xe9),
    },
    HeroShape {
        shape: Shape::Torus,
        position: Vec3::new(-4.0, -3.0, -5.0),
        rotation: Vec3::new(0.0, 0.0, 0.5),
        scale: 1.0,
        color: Color::rgb8(0xf4, 0x3f, 0x5e),
    },
    HeroShape {
        shape: Shape::Cube,
        position: Vec3::new(3.0, 3.0, -6.0),
        rotation: Vec3::new(0.2, 0.2, 0.0),
        scale: 0.8,
        color: Color::rgb8(0xcb, 0xd5, 0xe1),
    },
];

impl HeroShape {
    /// Pose at `t` seconds: a slow sway plus a vertical bob.
    pub fn at(&self, t: f64) -> (Vec3, Vec3) {
        let sway = Vec3::new(
            (t / 4.0).cos() / 8.0,
            (t / 4.0).sin() / 8.0,
            (t / 4.0).sin() / 8.0,
        );
        let bob = Vec3::new(0.0, (t / 1.5).sin() / 10.0, 0.0);
        (self.position + bob, self.rotation + sway)
    }
}

/// Scene for the hero background at `t` seconds.
pub fn hero_frame(t: f64) -> SceneFrame {
    let nodes = HERO_SHAPES
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (position, rotation) = s.at(t);
            SceneNode {
                id: format!("hero-{i}"),
                shape: s.shape,
                position,
                rotation,
                scale: s.scale,
                color: s.color,
                emissive: Color::BLACK,
                emissive_intensity: 0.0,
                opacity: SHAPE_OPACITY,
                label: None,
            }
        })
        .collect();
    SceneFrame {
        group_offset: Vec3::ZERO,
        nodes,
        lines: Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroFade {
    pub opacity: f64,
    pub scale: f64,
}

/// Hero opacity/scale for whole-page scroll progress `progress`.
pub fn hero_fade(progress: f64) -> HeroFade {
    let t = if progress.is_nan() {
        0.0
    } else {
        (progress / FADE_END).clamp(0.0, 1.0)
    };
    HeroFade {
        opacity: 1.0 - t,
        scale: 1.0 - (1.0 - FADE_MIN_SCALE) * t,
    }
}

/// Name, role and bio over a flat projection of the floating shapes.
pub fn render_hero(
    personal: &Personal,
    viewport: &Viewport,
    t: f64,
    fade: HeroFade,
) -> Vec<RenderCommand> {
    let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    let unit = viewport.width.min(viewport.height) / 12.0;

    let mut commands = vec![RenderCommand::BeginGroup {
        id: "hero".into(),
        label: Some(personal.name.clone()),
    }];

    let accents = [
        ThemeToken::AccentIndigo,
        ThemeToken::AccentSky,
        ThemeToken::AccentPink,
        ThemeToken::BlockInactive,
    ];
    for (shape, token) in HERO_SHAPES.iter().zip(accents) {
        let (p, _) = shape.at(t);
        // Crude perspective: deeper shapes shrink toward the center.
        let depth = 1.0 / (1.0 - p.z * 0.1);
        commands.push(RenderCommand::DrawCircle {
            center: Point::new(center.x + p.x * unit * depth, center.y - p.y * unit * depth),
            radius: shape.scale * unit * 0.5 * depth,
            color: token,
            opacity: SHAPE_OPACITY * 0.4 * fade.opacity,
        });
    }

    let title_size = 48.0 * fade.scale;
    commands.push(RenderCommand::DrawText {
        position: Point::new(center.x, center.y - title_size),
        text: personal.name.clone(),
        color: ThemeToken::TextPrimary,
        font_size: title_size,
        align: TextAlign::Center,
        opacity: fade.opacity,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(center.x, center.y),
        text: personal.role.clone(),
        color: ThemeToken::Primary,
        font_size: 20.0 * fade.scale,
        align: TextAlign::Center,
        opacity: fade.opacity,
    });
    let bio_size = 14.0 * fade.scale;
    for (i, line) in wrap_text(&personal.bio, viewport.width * 0.6, bio_size)
        .into_iter()
        .enumerate()
    {
        commands.push(RenderCommand::DrawText {
            position: Point::new(center.x, center.y + 36.0 + i as f64 * bio_size * 1.5),
            text: line,
            color: ThemeToken::TextSecondary,
            font_size: bio_size,
            align: TextAlign::Center,
            opacity: fade.opacity,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resume;

    #[test]
    fn pose_at_zero() {
        let (pos, rot) = HERO_SHAPES[0].at(0.0);
        assert_eq!(pos, Vec3::new(-3.0, 2.0, -2.0));
        assert!((rot.x - 0.125).abs() < 1e-12);
        assert!((rot.y - 0.5).abs() < 1e-12);
        assert_eq!(rot.z, 0.0);
    }

    #[test]
    fn shapes_bob() {
        let t = 1.5 * std::f64::consts::FRAC_PI_2;
        let (pos, _) = HERO_SHAPES[1].at(t);
        assert!((pos.y - (-1.0 + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn frame_has_four_translucent_shapes() {
        let frame = hero_frame(3.0);
        assert_eq!(frame.nodes.len(), 4);
        assert!(frame.nodes.iter().all(|n| n.opacity == 0.8));
        assert_eq!(frame.nodes[2].shape, Shape::Torus);
    }

    #[test]
    fn fade_endpoints() {
        let start = HeroFade {
            opacity: 1.0,
            scale: 1.0,
        };
        assert_eq!(hero_fade(0.0), start);
        let half = hero_fade(0.1);
        assert!((half.opacity - 0.5).abs() < 1e-12);
        assert!((half.scale - 0.975).abs() < 1e-12);
        let gone = hero_fade(0.7);
        assert_eq!(gone.opacity, 0.0);
        assert!((gone.scale - 0.95).abs() < 1e-12);
        assert_eq!(hero_fade(-1.0).opacity, 1.0);
        assert_eq!(hero_fade(f64::NAN).opacity, 1.0);
    }

    #[test]
    fn header_shows_name_and_role() {
        let resume = Resume::embedded().unwrap();
        let cmds = render_hero(
            &resume.personal,
            &Viewport::sized(1000.0, 700.0),
            0.0,
            hero_fade(0.0),
        );
        let texts: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&resume.personal.name.as_str()));
        assert!(texts.contains(&resume.personal.role.as_str()));
    }
}
