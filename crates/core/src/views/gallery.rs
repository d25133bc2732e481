//! Chess-board project gallery.
//!
//! Projects hide behind black pawns. Clicking a pawn's square moves the
//! queen there, captures the square (revealing the project) and shows the
//! project card. Leaving the section resets the board.

use std::collections::BTreeSet;

use folio_protocol::{CursorStyle, Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::cursor::CursorController;
use crate::model::Project;
use crate::views::wrap_text;

pub const BOARD_FILES: usize = 8;
pub const BOARD_SQUARES: usize = BOARD_FILES * BOARD_FILES;
/// e4.
pub const QUEEN_HOME: u8 = 36;

const FRAME_PX: f64 = 8.0;
const CARD_GAP_PX: f64 = 48.0;
const CARD_PADDING_PX: f64 = 32.0;
const PLACEHOLDER: &str = "Move the Queen to capture black pawns and reveal projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    /// An unrevealed project.
    Pawn,
    Queen,
    /// A revealed project the queen has since left.
    Captured(ThemeToken),
}

/// Everything needed to draw one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareView {
    pub square: u8,
    pub dark: bool,
    pub piece: Option<Piece>,
    /// The square of the project currently shown on the card.
    pub active: bool,
    pub clickable: bool,
}

#[derive(Debug, Clone)]
pub struct Gallery {
    projects: Vec<Project>,
    queen: u8,
    revealed: BTreeSet<u8>,
    active: Option<usize>,
}

impl Gallery {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            queen: QUEEN_HOME,
            revealed: BTreeSet::new(),
            active: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn queen(&self) -> u8 {
        self.queen
    }

    /// Squares captured so far, ascending.
    pub fn revealed(&self) -> impl Iterator<Item = u8> + '_ {
        self.revealed.iter().copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active.map(|i| &self.projects[i])
    }

    fn project_index(&self, square: u8) -> Option<usize> {
        self.projects.iter().position(|p| p.square == square)
    }

    pub fn project_at(&self, square: u8) -> Option<&Project> {
        self.project_index(square).map(|i| &self.projects[i])
    }

    /// Click a square. Squares without a project are ignored; otherwise the
    /// queen moves there, the square joins the revealed set (idempotently)
    /// and the project becomes active.
    pub fn click(&mut self, square: u8) -> Option<&Project> {
        let index = self.project_index(square)?;
        self.queen = square;
        if self.revealed.insert(square) {
            log::debug!("captured {}", self.projects[index].id);
        }
        self.active = Some(index);
        Some(&self.projects[index])
    }

    /// Pointer over `square`: clickable squares request the pointer cursor.
    pub fn hover(&self, square: Option<u8>, cursor: &mut dyn CursorController) {
        let clickable = square.and_then(|s| self.project_at(s)).is_some();
        cursor.set_cursor(if clickable {
            CursorStyle::Pointer
        } else {
            CursorStyle::Auto
        });
    }

    /// Visibility of the section. Scrolling it out of view resets the game.
    pub fn set_in_view(&mut self, in_view: bool) {
        if !in_view
            && (self.active.is_some() || !self.revealed.is_empty() || self.queen != QUEEN_HOME)
        {
            log::debug!("gallery left view, resetting board");
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.queen = QUEEN_HOME;
        self.revealed.clear();
        self.active = None;
    }

    pub fn square(&self, square: u8) -> SquareView {
        let row = usize::from(square) / BOARD_FILES;
        let col = usize::from(square) % BOARD_FILES;
        let project = self.project_index(square);
        let queen_here = self.queen == square;
        let captured = self.revealed.contains(&square);

        let piece = if queen_here {
            Some(Piece::Queen)
        } else if let Some(i) = project {
            Some(if captured {
                Piece::Captured(self.projects[i].accent)
            } else {
                Piece::Pawn
            })
        } else {
            None
        };

        SquareView {
            square,
            dark: (row + col) % 2 == 1,
            piece,
            active: project.is_some() && project == self.active,
            clickable: project.is_some(),
        }
    }

    /// Board plus project card (or the placeholder prompt).
    ///
    /// The board takes the left square of the viewport; the card fills the
    /// remaining width. Board squares carry their index as `hit_id`.
    pub fn render(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let board_px = viewport.height.min(viewport.width / 2.0);
        let inner = board_px - 2.0 * FRAME_PX;
        let cell = inner / BOARD_FILES as f64;

        let mut commands = Vec::with_capacity(BOARD_SQUARES * 2 + 16);
        commands.push(RenderCommand::BeginGroup {
            id: "gallery".into(),
            label: Some("Strategic moves".into()),
        });
        commands.push(RenderCommand::fill(
            Rect::new(0.0, 0.0, board_px, board_px),
            ThemeToken::BoardFrame,
        ));

        for square in 0..BOARD_SQUARES as u8 {
            let view = self.square(square);
            let row = f64::from(square / 8);
            let col = f64::from(square % 8);
            let rect = Rect::new(FRAME_PX + col * cell, FRAME_PX + row * cell, cell, cell);
            commands.push(RenderCommand::DrawRect {
                rect,
                color: if view.dark {
                    ThemeToken::BoardDark
                } else {
                    ThemeToken::BoardLight
                },
                border_color: view.active.then_some(ThemeToken::ActiveRing),
                label: None,
                hit_id: view.clickable.then_some(u64::from(square)),
            });

            let center = rect.center();
            match view.piece {
                Some(Piece::Queen) => commands.push(RenderCommand::text(
                    center,
                    "♛",
                    ThemeToken::PieceQueen,
                    cell * 0.7,
                    TextAlign::Center,
                )),
                Some(Piece::Pawn) => commands.push(RenderCommand::text(
                    center,
                    "♟",
                    ThemeToken::PieceBlack,
                    cell * 0.6,
                    TextAlign::Center,
                )),
                Some(Piece::Captured(accent)) => commands.push(RenderCommand::DrawCircle {
                    center,
                    radius: cell * 0.1,
                    color: accent,
                    opacity: 0.5,
                }),
                None => {}
            }
        }

        let card = Rect::new(
            board_px + CARD_GAP_PX,
            0.0,
            (viewport.width - board_px - CARD_GAP_PX).max(0.0),
            board_px,
        );
        self.render_card(card, &mut commands);

        commands.push(RenderCommand::EndGroup);
        commands
    }

    fn render_card(&self, card: Rect, commands: &mut Vec<RenderCommand>) {
        let Some(project) = self.active_project() else {
            commands.push(RenderCommand::DrawRect {
                rect: card,
                color: ThemeToken::Surface,
                border_color: Some(ThemeToken::Border),
                label: None,
                hit_id: None,
            });
            let c = card.center();
            commands.push(RenderCommand::text(
                Point::new(c.x, c.y - 24.0),
                "♛",
                ThemeToken::TextMuted,
                36.0,
                TextAlign::Center,
            ));
            for (i, line) in wrap_text(PLACEHOLDER, card.w - CARD_PADDING_PX, 14.0)
                .into_iter()
                .enumerate()
            {
                commands.push(RenderCommand::text(
                    Point::new(c.x, c.y + 16.0 + i as f64 * 18.0),
                    line,
                    ThemeToken::TextMuted,
                    14.0,
                    TextAlign::Center,
                ));
            }
            return;
        };

        commands.push(RenderCommand::DrawRect {
            rect: card,
            color: ThemeToken::Surface,
            border_color: Some(ThemeToken::Border),
            label: None,
            hit_id: None,
        });
        let x = card.x + CARD_PADDING_PX;
        let width = card.w - 2.0 * CARD_PADDING_PX;
        let mut y = card.y + CARD_PADDING_PX;

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, 72.0, 20.0),
            color: project.accent,
            border_color: None,
            label: Some("Captured".into()),
            hit_id: None,
        });
        y += 44.0;
        commands.push(RenderCommand::text(
            Point::new(x, y),
            project.title.clone(),
            ThemeToken::TextPrimary,
            24.0,
            TextAlign::Left,
        ));
        y += 36.0;
        for line in wrap_text(&project.description, width, 15.0) {
            commands.push(RenderCommand::text(
                Point::new(x, y),
                line,
                ThemeToken::TextSecondary,
                15.0,
                TextAlign::Left,
            ));
            y += 22.0;
        }

        let tag_y = card.y + card.h - CARD_PADDING_PX - 20.0;
        let mut tag_x = x;
        for tag in &project.tech {
            let w = tag.chars().count() as f64 * 7.0 + 16.0;
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(tag_x, tag_y, w, 20.0),
                color: ThemeToken::Background,
                border_color: None,
                label: Some(tag.clone()),
                hit_id: None,
            });
            tag_x += w + 8.0;
        }
    }

    /// Square under a point in the coordinate space of [`Self::render`].
    pub fn square_at(&self, viewport: &Viewport, p: Point) -> Option<u8> {
        let board_px = viewport.height.min(viewport.width / 2.0);
        let cell = (board_px - 2.0 * FRAME_PX) / BOARD_FILES as f64;
        let col = ((p.x - FRAME_PX) / cell).floor();
        let row = ((p.y - FRAME_PX) / cell).floor();
        let range = 0.0..BOARD_FILES as f64;
        if !(range.contains(&col) && range.contains(&row)) {
            return None;
        }
        Some(row as u8 * 8 + col as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorState;
    use crate::model::embedded_projects;

    fn gallery() -> Gallery {
        Gallery::new(embedded_projects().unwrap())
    }

    #[test]
    fn clicking_empty_square_is_ignored() {
        let mut g = gallery();
        assert!(g.click(0).is_none());
        assert_eq!(g.queen(), QUEEN_HOME);
        assert_eq!(g.revealed_count(), 0);
    }

    #[test]
    fn clicking_project_moves_queen_and_reveals() {
        let mut g = gallery();
        let title = g.click(27).map(|p| p.title.clone());
        assert_eq!(title.as_deref(), Some("EV Battery Passport"));
        assert_eq!(g.queen(), 27);
        assert_eq!(g.revealed().collect::<Vec<_>>(), vec![27]);
        assert_eq!(g.square(27).piece, Some(Piece::Queen));
    }

    #[test]
    fn reclick_does_not_duplicate() {
        let mut g = gallery();
        g.click(27);
        g.click(18);
        g.click(27);
        assert_eq!(g.revealed_count(), 2);
        assert_eq!(g.active_project().map(|p| p.id.as_str()), Some("battery"));
    }

    #[test]
    fn captured_square_shows_marker_after_queen_leaves() {
        let mut g = gallery();
        g.click(27);
        g.click(45);
        assert_eq!(
            g.square(27).piece,
            Some(Piece::Captured(ThemeToken::ProjectEmerald))
        );
        assert_eq!(g.square(18).piece, Some(Piece::Pawn));
        assert!(g.square(45).active);
        assert!(!g.square(27).active);
    }

    #[test]
    fn leaving_view_resets() {
        let mut g = gallery();
        g.click(42);
        g.set_in_view(true);
        assert_eq!(g.queen(), 42);
        g.set_in_view(false);
        assert_eq!(g.queen(), QUEEN_HOME);
        assert_eq!(g.revealed_count(), 0);
        assert!(g.active_project().is_none());
    }

    #[test]
    fn square_colors_alternate() {
        let g = gallery();
        assert!(!g.square(0).dark);
        assert!(g.square(1).dark);
        assert!(g.square(8).dark);
        assert!(!g.square(9).dark);
    }

    #[test]
    fn hover_sets_pointer_on_project_squares() {
        let g = gallery();
        let mut cursor = CursorState::default();
        g.hover(Some(18), &mut cursor);
        assert_eq!(cursor.current, CursorStyle::Pointer);
        g.hover(Some(19), &mut cursor);
        assert_eq!(cursor.current, CursorStyle::Auto);
    }

    #[test]
    fn render_marks_clickable_squares() {
        let g = gallery();
        let cmds = g.render(&Viewport::sized(900.0, 400.0));
        let hits: Vec<u64> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { hit_id, .. } => *hit_id,
                _ => None,
            })
            .collect();
        assert_eq!(hits, vec![18, 27, 42, 45]);
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::DrawText { text, .. } if text.starts_with("Move the Queen")
        )));
    }

    #[test]
    fn square_at_inverts_layout() {
        let g = gallery();
        let vp = Viewport::sized(900.0, 400.0);
        // board 400px, 8px frame, 48px cells
        assert_eq!(g.square_at(&vp, Point::new(10.0, 10.0)), Some(0));
        let e5 = 8.0 + 48.0 * 4.5;
        assert_eq!(g.square_at(&vp, Point::new(e5, e5)), Some(36));
        assert_eq!(g.square_at(&vp, Point::new(4.0, 4.0)), None);
        assert_eq!(g.square_at(&vp, Point::new(500.0, 10.0)), None);
    }
}
