pub mod chain;
pub mod detail;
pub mod gallery;
pub mod hero;
pub mod progress;
pub mod skills;

use folio_protocol::{Point, RenderCommand};

/// Estimated glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Estimated rendered width of `text` at `font_size`.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * CHAR_WIDTH_FACTOR
}

/// Greedy word wrap against the width estimate. A single word wider than
/// `max_width` gets a line of its own.
pub fn wrap_text(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let max_chars = (max_width / (font_size * CHAR_WIDTH_FACTOR)).floor().max(1.0) as usize;
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let wlen = word.chars().count();
        if len > 0 && len + 1 + wlen > max_chars {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        line.push_str(word);
        len += wlen;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Shift every positioned command by `(dx, dy)`. Used to place a view that
/// lays itself out from the origin inside a larger section.
pub fn translate(commands: &mut [RenderCommand], dx: f64, dy: f64) {
    let shift = |p: &mut Point| {
        p.x += dx;
        p.y += dy;
    };
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, .. } | RenderCommand::SetClip { rect } => {
                rect.x += dx;
                rect.y += dy;
            }
            RenderCommand::DrawText { position, .. } => shift(position),
            RenderCommand::DrawLine { from, to, .. } => {
                shift(from);
                shift(to);
            }
            RenderCommand::DrawCircle { center, .. } => shift(center),
            RenderCommand::ClearClip
            | RenderCommand::PushTransform { .. }
            | RenderCommand::PopTransform
            | RenderCommand::BeginGroup { .. }
            | RenderCommand::EndGroup => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::Rect;

    #[test]
    fn translate_moves_geometry() {
        let mut cmds = vec![
            RenderCommand::fill(
                Rect::new(1.0, 2.0, 3.0, 4.0),
                folio_protocol::ThemeToken::Surface,
            ),
            RenderCommand::DrawLine {
                from: Point::new(0.0, 0.0),
                to: Point::new(1.0, 1.0),
                color: folio_protocol::ThemeToken::Border,
                width: 1.0,
            },
        ];
        translate(&mut cmds, 10.0, 20.0);
        let RenderCommand::DrawRect { rect, .. } = &cmds[0] else {
            panic!("expected a rect");
        };
        assert_eq!((rect.x, rect.y), (11.0, 22.0));
        let RenderCommand::DrawLine { to, .. } = &cmds[1] else {
            panic!("expected a line");
        };
        assert_eq!((to.x, to.y), (11.0, 21.0));
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // 10px font => 6px per char => 5 chars at 30px.
        assert_eq!(wrap_text("aa bb cc", 30.0, 10.0), vec!["aa bb", "cc"]);
        assert_eq!(wrap_text("abcdefgh x", 30.0, 10.0), vec!["abcdefgh", "x"]);
        assert!(wrap_text("   ", 30.0, 10.0).is_empty());
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        assert_eq!(text_width("♛♛", 10.0), 12.0);
    }
}
