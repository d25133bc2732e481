//! Rasterize `RenderCommand`s into a ratatui buffer.
//!
//! Commands are laid out in pixels; each terminal cell stands for a
//! `CELL_W` x `CELL_H` pixel block.

use folio_protocol::{Point, RenderCommand, TextAlign, ThemeToken};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

pub const CELL_W: f64 = 8.0;
pub const CELL_H: f64 = 16.0;

pub fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Rgb(22, 27, 38),
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::Primary => Color::Rgb(129, 140, 248),
        ThemeToken::Secondary => Color::Rgb(56, 189, 248),
        ThemeToken::AccentIndigo => Color::Rgb(79, 70, 229),
        ThemeToken::AccentSky => Color::Rgb(2, 132, 199),
        ThemeToken::AccentAmber => Color::Rgb(217, 119, 6),
        ThemeToken::AccentEmerald => Color::Rgb(5, 150, 105),
        ThemeToken::AccentPink => Color::Rgb(219, 39, 119),
        ThemeToken::BlockInactive => Color::Rgb(71, 85, 105),
        ThemeToken::ConnectorMuted => Color::DarkGray,
        ThemeToken::ProgressTrack => Color::DarkGray,
        ThemeToken::ProgressVisited => Color::Rgb(129, 140, 248),
        ThemeToken::ProgressUpcoming => Color::DarkGray,
        ThemeToken::BoardLight => Color::Rgb(203, 213, 225),
        ThemeToken::BoardDark => Color::Rgb(100, 116, 139),
        ThemeToken::BoardFrame => Color::Rgb(15, 23, 42),
        ThemeToken::ActiveRing => Color::LightBlue,
        ThemeToken::PieceBlack => Color::Black,
        ThemeToken::PieceQueen => Color::Yellow,
        ThemeToken::ProjectEmerald => Color::Green,
        ThemeToken::ProjectBlue => Color::Blue,
        ThemeToken::ProjectPurple => Color::Magenta,
        ThemeToken::ProjectOrange => Color::Rgb(234, 88, 12),
        ThemeToken::CategoryProgramming => Color::Rgb(79, 70, 229),
        ThemeToken::CategoryData => Color::Rgb(14, 165, 233),
        ThemeToken::CategoryDevOps => Color::Rgb(245, 158, 11),
        ThemeToken::CategoryTools => Color::Rgb(100, 116, 139),
        ThemeToken::CategoryLanguages => Color::Rgb(236, 72, 153),
        ThemeToken::CategoryOther => Color::Gray,
        ThemeToken::HoverHighlight => Color::LightRed,
        ThemeToken::ModalBackdrop => Color::Black,
        ThemeToken::LinkedIn => Color::Rgb(0, 119, 181),
    }
}

fn cell(area: Rect, p: Point) -> Option<(u16, u16)> {
    let col = (p.x / CELL_W).floor();
    let row = (p.y / CELL_H).floor();
    if col < 0.0 || row < 0.0 || col >= f64::from(area.width) || row >= f64::from(area.height) {
        return None;
    }
    Some((area.x + col as u16, area.y + row as u16))
}

fn put(buf: &mut Buffer, area: Rect, p: Point, ch: char, fg: Color) {
    if let Some((x, y)) = cell(area, p) {
        buf[(x, y)].set_char(ch).set_fg(fg);
    }
}

fn put_text(buf: &mut Buffer, area: Rect, p: Point, text: &str, fg: Color) {
    for (i, ch) in text.chars().enumerate() {
        put(buf, area, Point::new(p.x + i as f64 * CELL_W, p.y), ch, fg);
    }
}

/// Paint `commands` into `area` of `buf`, in order.
pub fn paint(commands: &[RenderCommand], buf: &mut Buffer, area: Rect) {
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                let bg = theme_to_color(*color);
                let mut y = rect.y;
                while y < rect.y + rect.h {
                    let mut x = rect.x;
                    while x < rect.x + rect.w {
                        if let Some((cx, cy)) = cell(area, Point::new(x, y)) {
                            buf[(cx, cy)].set_char(' ').set_bg(bg);
                        }
                        x += CELL_W;
                    }
                    y += CELL_H;
                }
                if let Some(border) = border_color
                    && rect.h >= 2.0 * CELL_H
                {
                    let fg = theme_to_color(*border);
                    let mut x = rect.x;
                    while x < rect.x + rect.w {
                        put(buf, area, Point::new(x, rect.y), '─', fg);
                        put(buf, area, Point::new(x, rect.y + rect.h - CELL_H), '─', fg);
                        x += CELL_W;
                    }
                }
                if let Some(label) = label {
                    let max = (rect.w / CELL_W) as usize;
                    let shown: String = label.chars().take(max).collect();
                    put_text(
                        buf,
                        area,
                        Point::new(rect.x, rect.y + rect.h / 2.0),
                        &shown,
                        theme_to_color(ThemeToken::TextPrimary),
                    );
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                opacity,
                ..
            } => {
                if *opacity <= 0.0 {
                    continue;
                }
                let fg = if *opacity < 0.5 {
                    Color::DarkGray
                } else {
                    theme_to_color(*color)
                };
                let width = text.chars().count() as f64 * CELL_W;
                let x = match align {
                    TextAlign::Left => position.x,
                    TextAlign::Center => position.x - width / 2.0,
                    TextAlign::Right => position.x - width,
                };
                put_text(buf, area, Point::new(x, position.y), text, fg);
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let fg = theme_to_color(*color);
                let dx = to.x - from.x;
                let dy = to.y - from.y;
                let glyph = if dx.abs() < CELL_W {
                    '│'
                } else if dy.abs() < CELL_H {
                    '─'
                } else {
                    '·'
                };
                let steps = (dx.abs() / CELL_W).max(dy.abs() / CELL_H).ceil().max(1.0) as usize;
                for i in 0..=steps {
                    let t = i as f64 / steps as f64;
                    put(
                        buf,
                        area,
                        Point::new(from.x + dx * t, from.y + dy * t),
                        glyph,
                        fg,
                    );
                }
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                opacity,
            } => {
                if *opacity <= 0.0 {
                    continue;
                }
                let glyph = if *radius >= CELL_W { '●' } else { '•' };
                put(buf, area, *center, glyph, theme_to_color(*color));
            }
            // No clipping, transforms or grouping in cell output
            _ => {}
        }
    }
}

/// Topmost hit target under `p`: the last rect carrying a `hit_id` that
/// contains the point.
pub fn hit_at(commands: &[RenderCommand], p: Point) -> Option<u64> {
    commands.iter().rev().find_map(|cmd| match cmd {
        RenderCommand::DrawRect {
            rect,
            hit_id: Some(id),
            ..
        } if rect.contains(p) => Some(*id),
        _ => None,
    })
}
