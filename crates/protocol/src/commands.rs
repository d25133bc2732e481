use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each page section. Renderers
/// consume this list sequentially; each command carries all the data it
/// needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a text label and a logical
    /// hit identifier (block index, board square) for click handling.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<String>,
        hit_id: Option<u64>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        /// 0.0 (invisible) to 1.0 (opaque).
        opacity: f64,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Draw a filled circle (captured markers, skill nodes).
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
        opacity: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Push an affine transform (applied to all subsequent commands until
    /// the matching `PopTransform`).
    PushTransform { translate: Point, scale: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group (e.g. a page section). Renderers may use this
    /// for batching, layer separation, or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    /// Convenience constructor for fully opaque text.
    pub fn text(
        position: Point,
        text: impl Into<String>,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    ) -> Self {
        RenderCommand::DrawText {
            position,
            text: text.into(),
            color,
            font_size,
            align,
            opacity: 1.0,
        }
    }

    /// Convenience constructor for an unlabeled, non-interactive rectangle.
    pub fn fill(rect: Rect, color: ThemeToken) -> Self {
        RenderCommand::DrawRect {
            rect,
            color,
            border_color: None,
            label: None,
            hit_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_variant_tags() {
        let cmd = RenderCommand::fill(Rect::new(0.0, 0.0, 4.0, 4.0), ThemeToken::BoardDark);
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.starts_with("{\"DrawRect\""));
        assert!(json.contains("\"BoardDark\""));
    }
}
