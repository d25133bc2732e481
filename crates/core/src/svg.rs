//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use folio_protocol::{RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:Inter,system-ui,sans-serif">"#,
    );

    let bg = resolve_color(ThemeToken::Background, dark);
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#
    );

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" rx="4""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let _ = write!(svg, r#" stroke="{}""#, resolve_color(*border, dark));
                }
                svg.push('>');
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
                svg.push_str("</rect>");

                // Label inside the rect if it fits at all
                if let Some(label) = label
                    && rect.w > 30.0
                {
                    let text_color = resolve_color(ThemeToken::TextPrimary, dark);
                    let tx = rect.x + 8.0;
                    let ty = rect.y + rect.h * 0.7;
                    let max_chars = (rect.w / 7.0) as usize;
                    let text = if label.chars().count() > max_chars && max_chars > 2 {
                        let truncated: String = label.chars().take(max_chars - 1).collect();
                        format!("{truncated}…")
                    } else {
                        label.to_string()
                    };
                    let _ = write!(
                        svg,
                        r#"<text x="{tx}" y="{ty}" fill="{text_color}" font-size="12" style="pointer-events:none">{}</text>"#,
                        escape_xml(&text),
                    );
                }
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                opacity,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}" fill-opacity="{opacity}"/>"#,
                    center.x, center.y,
                );
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
                opacity,
            } => {
                if *opacity <= 0.0 {
                    continue;
                }
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}" fill-opacity="{opacity}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                );
            }
            // Transform/clip/group commands don't affect static SVG output
            _ => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    // Theme-independent accents first.
    match token {
        ThemeToken::AccentIndigo | ThemeToken::CategoryProgramming => return "#4f46e5",
        ThemeToken::AccentSky => return "#0284c7",
        ThemeToken::AccentAmber => return "#d97706",
        ThemeToken::AccentEmerald | ThemeToken::ProjectEmerald => return "#059669",
        ThemeToken::AccentPink => return "#db2777",
        ThemeToken::ProjectBlue => return "#2563eb",
        ThemeToken::ProjectPurple => return "#9333ea",
        ThemeToken::ProjectOrange => return "#ea580c",
        ThemeToken::CategoryData => return "#0ea5e9",
        ThemeToken::CategoryDevOps => return "#f59e0b",
        ThemeToken::CategoryTools => return "#64748b",
        ThemeToken::CategoryLanguages => return "#ec4899",
        ThemeToken::HoverHighlight => return "#f43f5e",
        ThemeToken::LinkedIn => return "#0077b5",
        _ => {}
    }
    if dark {
        match token {
            ThemeToken::Background => "#0f172a",
            ThemeToken::Surface => "#1e293b",
            ThemeToken::Border | ThemeToken::ConnectorMuted => "#334155",
            ThemeToken::TextPrimary => "#f1f5f9",
            ThemeToken::TextSecondary => "#cbd5e1",
            ThemeToken::TextMuted => "#94a3b8",
            ThemeToken::Primary | ThemeToken::ProgressVisited => "#818cf8",
            ThemeToken::Secondary => "#38bdf8",
            ThemeToken::BlockInactive | ThemeToken::ProgressTrack => "#475569",
            ThemeToken::ProgressUpcoming => "#334155",
            ThemeToken::BoardLight => "#e2e8f0",
            ThemeToken::BoardDark => "#64748b",
            ThemeToken::BoardFrame => "#020617",
            ThemeToken::ActiveRing => "#818cf8",
            ThemeToken::PieceBlack => "#020617",
            ThemeToken::PieceQueen => "#fbbf24",
            ThemeToken::ModalBackdrop => "#020617",
            _ => "#94a3b8",
        }
    } else {
        match token {
            ThemeToken::Background => "#f8fafc",
            ThemeToken::Surface => "#ffffff",
            ThemeToken::Border | ThemeToken::ConnectorMuted => "#e2e8f0",
            ThemeToken::TextPrimary => "#0f172a",
            ThemeToken::TextSecondary => "#475569",
            ThemeToken::TextMuted => "#94a3b8",
            ThemeToken::Primary | ThemeToken::ProgressVisited => "#4f46e5",
            ThemeToken::Secondary => "#0ea5e9",
            ThemeToken::BlockInactive | ThemeToken::ProgressTrack => "#cbd5e1",
            ThemeToken::ProgressUpcoming => "#e2e8f0",
            ThemeToken::BoardLight => "#f1f5f9",
            ThemeToken::BoardDark => "#94a3b8",
            ThemeToken::BoardFrame => "#1e293b",
            ThemeToken::ActiveRing => "#4f46e5",
            ThemeToken::PieceBlack => "#0f172a",
            ThemeToken::PieceQueen => "#f59e0b",
            ThemeToken::ModalBackdrop => "#0f172a",
            _ => "#64748b",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::{Point, Rect};

    #[test]
    fn basic_svg_output() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(10.0, 20.0, 100.0, 18.0),
            color: ThemeToken::AccentAmber,
            border_color: Some(ThemeToken::Border),
            label: Some("Rust".into()),
            hit_id: Some(1),
        }];
        let svg = render_svg(&commands, 800.0, 400.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Rust"));
        assert!(svg.contains("#d97706"));
        assert!(svg.contains(r##"stroke="#334155""##));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::text(
            Point::new(0.0, 0.0),
            "Research & <Development>",
            ThemeToken::TextPrimary,
            14.0,
            TextAlign::Left,
        )];
        let svg = render_svg(&commands, 400.0, 100.0, false);
        assert!(svg.contains("Research &amp; &lt;Development&gt;"));
    }

    #[test]
    fn circles_and_hidden_text() {
        let commands = vec![
            RenderCommand::DrawCircle {
                center: Point::new(5.0, 6.0),
                radius: 2.0,
                color: ThemeToken::ProjectBlue,
                opacity: 0.5,
            },
            RenderCommand::DrawText {
                position: Point::new(0.0, 0.0),
                text: "ghost".into(),
                color: ThemeToken::TextMuted,
                font_size: 12.0,
                align: TextAlign::Center,
                opacity: 0.0,
            },
        ];
        let svg = render_svg(&commands, 10.0, 10.0, false);
        assert!(svg.contains(r#"<circle cx="5" cy="6" r="2""#));
        assert!(!svg.contains("ghost"));
    }
}
