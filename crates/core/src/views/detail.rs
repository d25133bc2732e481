//! Experience detail card and the education grid.

use folio_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::model::{Education, Experience};
use crate::views::{text_width, wrap_text};

const PADDING: f64 = 32.0;
const BODY_PX: f64 = 14.0;
const LINE_PX: f64 = 22.0;
const TAG_PX: f64 = 12.0;

fn card(rect: Rect, commands: &mut Vec<RenderCommand>) {
    commands.push(RenderCommand::DrawRect {
        rect,
        color: ThemeToken::Surface,
        border_color: Some(ThemeToken::Border),
        label: None,
        hit_id: None,
    });
}

/// Date pill, company, role, location, bullet list and technology tags
/// for one job, laid out inside `rect`. Bullets that would run past the
/// tag row are cut, with a count of the hidden ones.
pub fn render_experience(job: &Experience, rect: Rect) -> Vec<RenderCommand> {
    let mut commands = vec![RenderCommand::BeginGroup {
        id: format!("experience-{}", job.id),
        label: Some(job.company.clone()),
    }];
    card(rect, &mut commands);

    let x = rect.x + PADDING;
    let right = rect.x + rect.w - PADDING;
    let width = (right - x).max(0.0);
    let mut y = rect.y + PADDING;

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(x, y, text_width(&job.date, TAG_PX) + 16.0, 20.0),
        color: ThemeToken::Background,
        border_color: None,
        label: Some(job.date.clone()),
        hit_id: None,
    });
    commands.push(RenderCommand::text(
        Point::new(right, y + 14.0),
        job.location.clone(),
        ThemeToken::TextMuted,
        BODY_PX,
        TextAlign::Right,
    ));
    y += 52.0;
    commands.push(RenderCommand::text(
        Point::new(x, y),
        job.company.clone(),
        ThemeToken::TextPrimary,
        28.0,
        TextAlign::Left,
    ));
    y += 30.0;
    commands.push(RenderCommand::text(
        Point::new(x, y),
        job.role.clone(),
        ThemeToken::TextSecondary,
        18.0,
        TextAlign::Left,
    ));
    y += 36.0;

    let tags_y = rect.y + rect.h - PADDING - 24.0;
    'bullets: for (shown, item) in job.description.iter().enumerate() {
        let lines = wrap_text(item, width - 20.0, BODY_PX);
        for (i, line) in lines.into_iter().enumerate() {
            if y + LINE_PX > tags_y - 16.0 {
                commands.push(RenderCommand::text(
                    Point::new(right, tags_y - 16.0),
                    format!("… {} more", job.description.len() - shown),
                    ThemeToken::TextMuted,
                    TAG_PX,
                    TextAlign::Right,
                ));
                break 'bullets;
            }
            if i == 0 {
                commands.push(RenderCommand::text(
                    Point::new(x, y),
                    "›",
                    ThemeToken::Primary,
                    BODY_PX,
                    TextAlign::Left,
                ));
            }
            commands.push(RenderCommand::text(
                Point::new(x + 20.0, y),
                line,
                ThemeToken::TextSecondary,
                BODY_PX,
                TextAlign::Left,
            ));
            y += LINE_PX;
        }
        y += 8.0;
    }

    commands.push(RenderCommand::DrawLine {
        from: Point::new(x, tags_y - 8.0),
        to: Point::new(right, tags_y - 8.0),
        color: ThemeToken::Border,
        width: 1.0,
    });
    let mut tag_x = x;
    for tech in job.technologies() {
        let w = text_width(tech, TAG_PX) + 16.0;
        if tag_x + w > right {
            break;
        }
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(tag_x, tags_y, w, 24.0),
            color: ThemeToken::Background,
            border_color: Some(ThemeToken::Border),
            label: Some(tech.clone()),
            hit_id: None,
        });
        tag_x += w + 8.0;
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

/// Two-column grid of education cards filling `rect` top-down.
pub fn render_education(education: &[Education], rect: Rect) -> Vec<RenderCommand> {
    let mut commands = vec![RenderCommand::BeginGroup {
        id: "education".into(),
        label: Some("Education".into()),
    }];
    let gap = 24.0;
    let col_w = (rect.w - gap) / 2.0;
    let rows = education.len().div_ceil(2).max(1);
    let card_h = (rect.h - gap * (rows - 1) as f64) / rows as f64;

    for (i, edu) in education.iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        let cell = Rect::new(
            rect.x + col * (col_w + gap),
            rect.y + row * (card_h + gap),
            col_w,
            card_h,
        );
        card(cell, &mut commands);
        let x = cell.x + PADDING;
        let mut y = cell.y + PADDING;
        commands.push(RenderCommand::text(
            Point::new(x, y),
            edu.date.clone(),
            ThemeToken::Secondary,
            TAG_PX,
            TextAlign::Left,
        ));
        y += 28.0;
        commands.push(RenderCommand::text(
            Point::new(x, y),
            edu.institution.clone(),
            ThemeToken::TextPrimary,
            22.0,
            TextAlign::Left,
        ));
        y += 26.0;
        commands.push(RenderCommand::text(
            Point::new(x, y),
            edu.degree.clone(),
            ThemeToken::Primary,
            BODY_PX,
            TextAlign::Left,
        ));
        y += 28.0;
        for detail in &edu.details {
            for line in wrap_text(detail, cell.w - 2.0 * PADDING - 16.0, 13.0) {
                if y > cell.y + cell.h - PADDING {
                    break;
                }
                commands.push(RenderCommand::text(
                    Point::new(x + 16.0, y),
                    line,
                    ThemeToken::TextSecondary,
                    13.0,
                    TextAlign::Left,
                ));
                y += 18.0;
            }
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resume;

    fn texts(cmds: &[RenderCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn experience_card_shows_header() {
        let resume = Resume::embedded().unwrap();
        let job = &resume.experience[0];
        let cmds = render_experience(job, Rect::new(0.0, 0.0, 700.0, 600.0));
        let t = texts(&cmds);
        assert!(t.contains(&job.company.as_str()));
        assert!(t.contains(&job.role.as_str()));
        assert!(t.contains(&job.location.as_str()));
    }

    #[test]
    fn bullets_stop_before_tag_row() {
        let resume = Resume::embedded().unwrap();
        let rect = Rect::new(0.0, 0.0, 500.0, 320.0);
        let cmds = render_experience(&resume.experience[0], rect);
        let tag_row = rect.h - PADDING - 24.0;
        for c in &cmds {
            if let RenderCommand::DrawText { position, text, .. } = c
                && text != &resume.experience[0].location
            {
                assert!(position.y < tag_row, "{text} overlaps tags");
            }
        }
    }

    #[test]
    fn cut_bullets_are_counted() {
        let resume = Resume::embedded().unwrap();
        let job = &resume.experience[0];

        let short = render_experience(job, Rect::new(0.0, 0.0, 500.0, 320.0));
        let marker = texts(&short)
            .into_iter()
            .find(|t| t.starts_with('…'))
            .expect("overflow marker");
        assert!(marker.ends_with(" more"));
        let hidden: usize = marker
            .trim_start_matches("… ")
            .trim_end_matches(" more")
            .parse()
            .unwrap();
        assert!((1..=job.description.len()).contains(&hidden));

        let tall = render_experience(job, Rect::new(0.0, 0.0, 700.0, 1200.0));
        assert!(!texts(&tall).iter().any(|t| t.starts_with('…')));
    }

    #[test]
    fn education_grid_has_one_card_per_school() {
        let resume = Resume::embedded().unwrap();
        let cmds = render_education(&resume.education, Rect::new(0.0, 0.0, 800.0, 600.0));
        let t = texts(&cmds);
        for edu in &resume.education {
            assert!(t.contains(&edu.institution.as_str()));
        }
    }
}
