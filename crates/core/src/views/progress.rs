//! Work-section progress indicator: dots, a vertical bar and a scroll hint.

use folio_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

const DOT_PX: f64 = 8.0;
const ACTIVE_DOT_PX: f64 = 24.0;
const DOT_GAP_PX: f64 = 8.0;
const BAR_WIDTH_PX: f64 = 2.0;
const BAR_HEIGHT_PX: f64 = 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Active,
    Visited,
    Upcoming,
}

/// One state per item: everything before `active` is visited.
pub fn progress_dots(active: usize, count: usize) -> Vec<DotState> {
    (0..count)
        .map(|i| match i.cmp(&active) {
            std::cmp::Ordering::Less => DotState::Visited,
            std::cmp::Ordering::Equal => DotState::Active,
            std::cmp::Ordering::Greater => DotState::Upcoming,
        })
        .collect()
}

/// Filled fraction of the vertical bar.
pub fn progress_fraction(active: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    ((active + 1) as f64 / count as f64).min(1.0)
}

pub fn scroll_hint(active: usize, count: usize) -> &'static str {
    if active + 1 >= count {
        "✓ DONE"
    } else {
        "↓ SCROLL"
    }
}

/// Dots along the top right, bar and hint underneath. Each dot carries
/// its item index as `hit_id` so the shell can route clicks to it.
pub fn render_progress(active: usize, count: usize, viewport: &Viewport) -> Vec<RenderCommand> {
    let dots = progress_dots(active, count);
    let total_w: f64 = dots
        .iter()
        .map(|d| {
            if *d == DotState::Active {
                ACTIVE_DOT_PX
            } else {
                DOT_PX
            }
        })
        .sum::<f64>()
        + DOT_GAP_PX * count.saturating_sub(1) as f64;
    let right = viewport.width - 24.0;
    let mut x = right - total_w;
    let y = 24.0;

    let mut commands = Vec::with_capacity(count + 6);
    commands.push(RenderCommand::BeginGroup {
        id: "progress".into(),
        label: None,
    });

    for (i, dot) in dots.iter().enumerate() {
        let (w, color) = match dot {
            DotState::Active => (ACTIVE_DOT_PX, ThemeToken::Primary),
            DotState::Visited => (DOT_PX, ThemeToken::ProgressVisited),
            DotState::Upcoming => (DOT_PX, ThemeToken::ProgressUpcoming),
        };
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, w, DOT_PX),
            color,
            border_color: None,
            label: None,
            hit_id: Some(i as u64),
        });
        x += w + DOT_GAP_PX;
    }

    let bar_x = right - BAR_WIDTH_PX;
    let bar_y = y + DOT_PX + 16.0;
    commands.push(RenderCommand::fill(
        Rect::new(bar_x, bar_y, BAR_WIDTH_PX, BAR_HEIGHT_PX),
        ThemeToken::ProgressTrack,
    ));
    commands.push(RenderCommand::fill(
        Rect::new(
            bar_x,
            bar_y,
            BAR_WIDTH_PX,
            BAR_HEIGHT_PX * progress_fraction(active, count),
        ),
        ThemeToken::Primary,
    ));
    commands.push(RenderCommand::DrawText {
        position: Point::new(right, bar_y + BAR_HEIGHT_PX + 16.0),
        text: scroll_hint(active, count).into(),
        color: ThemeToken::TextMuted,
        font_size: 10.0,
        align: TextAlign::Right,
        opacity: 1.0,
    });

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_states_split_at_active() {
        assert_eq!(
            progress_dots(2, 5),
            vec![
                DotState::Visited,
                DotState::Visited,
                DotState::Active,
                DotState::Upcoming,
                DotState::Upcoming,
            ]
        );
        assert!(progress_dots(0, 0).is_empty());
    }

    #[test]
    fn fraction_and_hint() {
        assert_eq!(progress_fraction(0, 5), 0.2);
        assert_eq!(progress_fraction(4, 5), 1.0);
        assert_eq!(progress_fraction(0, 0), 0.0);
        assert_eq!(scroll_hint(3, 5), "↓ SCROLL");
        assert_eq!(scroll_hint(4, 5), "✓ DONE");
    }

    #[test]
    fn dots_are_clickable() {
        let cmds = render_progress(1, 5, &Viewport::sized(800.0, 600.0));
        let ids: Vec<u64> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { hit_id, .. } => *hit_id,
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
