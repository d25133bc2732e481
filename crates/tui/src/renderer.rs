use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_core::cursor::CursorState;
use folio_core::model::square_name;
use folio_core::views::gallery::QUEEN_HOME;
use folio_core::{Page, Section, Tab};
use folio_protocol::{CursorStyle, Point, RenderCommand, Viewport};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
};

use crate::paint::{CELL_H, CELL_W, hit_at, paint};

const SCROLL_STEP: f64 = 0.02;
const FRAME: Duration = Duration::from_millis(33);

/// Interactive state that only the terminal shell needs.
struct Shell {
    section: Section,
    experience_progress: f64,
    page_progress: f64,
    selected_square: u8,
    hovered_skill: Option<usize>,
    cursor: CursorState,
    status: String,
}

impl Shell {
    fn new(section: Section) -> Self {
        Self {
            section,
            experience_progress: 0.0,
            page_progress: 0.0,
            selected_square: QUEEN_HOME,
            hovered_skill: None,
            cursor: CursorState::default(),
            status: String::new(),
        }
    }

    /// Sections report visibility to the page as the user moves between them.
    fn goto(&mut self, page: &mut Page, section: Section) {
        if section == self.section {
            return;
        }
        if self.section == Section::Projects {
            page.set_projects_in_view(false);
        }
        if self.hovered_skill.take().is_some() {
            page.hover_skill(None, &mut self.cursor);
        }
        // Pointer targets belong to the section being left.
        self.cursor = CursorState::default();
        page.set_experience_in_view(section == Section::Work);
        if section == Section::Projects {
            page.set_projects_in_view(true);
        }
        if section != Section::Work {
            self.experience_progress = 0.0;
        }
        self.section = section;
        self.status.clear();
        log::debug!("section -> {section}");
    }

    fn scroll(&mut self, page: &mut Page, delta: f64) {
        match self.section {
            Section::Hero => {
                self.page_progress = (self.page_progress + delta).clamp(0.0, 1.0);
                page.page_scroll(self.page_progress);
            }
            Section::Work if page.tab() == Tab::Experience => {
                self.experience_progress = (self.experience_progress + delta).clamp(0.0, 1.0);
                page.scroll_experience(self.experience_progress);
            }
            Section::Skills => {
                let n = page.skills().nodes().len();
                if n == 0 {
                    return;
                }
                let next = match (self.hovered_skill, delta > 0.0) {
                    (None, _) => 0,
                    (Some(i), true) => (i + 1) % n,
                    (Some(i), false) => (i + n - 1) % n,
                };
                self.hovered_skill = Some(next);
                page.hover_skill(self.hovered_skill, &mut self.cursor);
                self.status = page.skills().nodes()[next].label.clone();
            }
            _ => {}
        }
    }

    fn move_square(&mut self, page: &Page, dcol: i8, drow: i8) {
        let col = (self.selected_square % 8) as i8 + dcol;
        let row = (self.selected_square / 8) as i8 + drow;
        if (0..8).contains(&col) && (0..8).contains(&row) {
            self.selected_square = (row * 8 + col) as u8;
            page.gallery_hover(Some(self.selected_square), &mut self.cursor);
            self.status = format!("square {}", square_name(self.selected_square));
        }
    }

    fn activate(&mut self, page: &mut Page) {
        match self.section {
            Section::Projects => self.capture(page, self.selected_square),
            Section::Contact => {
                if page.contact_open() {
                    page.close_contact();
                } else {
                    page.open_contact();
                }
            }
            Section::Work => {
                let next = match page.tab() {
                    Tab::Experience => Tab::Education,
                    Tab::Education => Tab::Experience,
                };
                self.experience_progress = 0.0;
                page.set_tab(next);
            }
            _ => {}
        }
    }

    fn capture(&mut self, page: &mut Page, square: u8) {
        self.status = match page.gallery_click(square) {
            Some(project) => format!("captured {}: {}", square_name(square), project.title),
            None => format!("{} is empty", square_name(square)),
        };
    }

    /// Route a click at pixel `p` to whatever hit target is under it.
    fn click(&mut self, page: &mut Page, commands: &[RenderCommand], p: Point) {
        let Some(id) = hit_at(commands, p) else {
            return;
        };
        match self.section {
            Section::Work => {
                let index = page.click_block(id as usize);
                self.status = format!("job {}", index + 1);
            }
            Section::Projects => {
                if let Ok(square) = u8::try_from(id) {
                    self.selected_square = square;
                    self.capture(page, square);
                }
            }
            Section::Contact => {
                let links = page.contact_links();
                if let Some(link) = links.get(id as usize) {
                    self.status = link.href.clone();
                }
            }
            _ => {}
        }
    }

    fn hover(&mut self, page: &Page, commands: &[RenderCommand], p: Point) {
        let id = hit_at(commands, p);
        match self.section {
            Section::Work => page.hover_block(id.map(|i| i as usize), &mut self.cursor),
            Section::Projects => {
                page.gallery_hover(id.and_then(|i| u8::try_from(i).ok()), &mut self.cursor);
            }
            _ => {}
        }
    }
}

fn cursor_label(style: CursorStyle) -> &'static str {
    match style {
        CursorStyle::Auto => "",
        CursorStyle::Pointer => " [click]",
        CursorStyle::Grab => " [grab]",
    }
}

pub fn run(page: &mut Page, section: Section) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, page, section);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    page: &mut Page,
    section: Section,
) -> Result<()> {
    let mut shell = Shell::new(Section::Hero);
    page.set_experience_in_view(false);
    shell.goto(page, section);
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        page.tick(now.duration_since(last).as_secs_f64());
        last = now;

        let term_size = terminal.size()?;
        let content = Rect::new(0, 1, term_size.width, term_size.height.saturating_sub(2));
        let viewport = Viewport::sized(
            f64::from(content.width) * CELL_W,
            f64::from(content.height) * CELL_H,
        );
        let cmds = page.render_section(shell.section, &viewport);

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let tabs: Vec<String> = Section::ALL
                .iter()
                .map(|s| {
                    if *s == shell.section {
                        format!("[{s}]")
                    } else {
                        s.to_string()
                    }
                })
                .collect();
            let header = Block::default()
                .title(format!(
                    " {} | {} | tab/shift-tab section | q quit ",
                    page.resume().personal.name,
                    tabs.join(" ")
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let block = Block::default()
                .borders(Borders::NONE)
                .style(Style::default().bg(Color::Black));
            frame.render_widget(block, content);
            paint(&cmds, frame.buffer_mut(), content);

            let hint = match shell.section {
                Section::Hero => "↑/↓ scroll",
                Section::Work => "↑/↓ scroll · 1-9 jump · enter switch tab · click a block",
                Section::Projects => "arrows select · enter capture · click a square",
                Section::Skills => "↑/↓ hover skill",
                Section::Contact => "enter toggle contact card",
            };
            let footer_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
            let footer = Block::default()
                .title(format!(
                    " {hint}{} {}",
                    cursor_label(shell.cursor.current),
                    shell.status
                ))
                .style(Style::default().fg(Color::Gray).bg(Color::Black));
            frame.render_widget(footer, footer_area);
        })?;

        let to_px = |column: u16, row: u16| {
            Point::new(
                f64::from(column) * CELL_W + CELL_W / 2.0,
                f64::from(row.saturating_sub(content.y)) * CELL_H + CELL_H / 2.0,
            )
        };

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Tab => shell.goto(page, shell.section.next()),
                    KeyCode::BackTab => shell.goto(page, shell.section.prev()),
                    KeyCode::Enter | KeyCode::Char(' ') => shell.activate(page),
                    KeyCode::Up if shell.section == Section::Projects => {
                        shell.move_square(page, 0, -1);
                    }
                    KeyCode::Down if shell.section == Section::Projects => {
                        shell.move_square(page, 0, 1);
                    }
                    KeyCode::Left if shell.section == Section::Projects => {
                        shell.move_square(page, -1, 0);
                    }
                    KeyCode::Right if shell.section == Section::Projects => {
                        shell.move_square(page, 1, 0);
                    }
                    KeyCode::Up => shell.scroll(page, -SCROLL_STEP),
                    KeyCode::Down => shell.scroll(page, SCROLL_STEP),
                    KeyCode::Char(c @ '1'..='9') if shell.section == Section::Work => {
                        let index = c as usize - '1' as usize;
                        page.click_dot(index);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => shell.scroll(page, SCROLL_STEP),
                    MouseEventKind::ScrollUp => shell.scroll(page, -SCROLL_STEP),
                    MouseEventKind::Down(MouseButton::Left) => {
                        shell.click(page, &cmds, to_px(mouse.column, mouse.row));
                    }
                    MouseEventKind::Moved => {
                        shell.hover(page, &cmds, to_px(mouse.column, mouse.row));
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FolioConfig;

    fn page() -> Page {
        Page::embedded(FolioConfig::default()).expect("embedded content is valid")
    }

    #[test]
    fn leaving_skills_clears_hover() {
        let mut page = page();
        let mut shell = Shell::new(Section::Hero);
        shell.goto(&mut page, Section::Skills);
        shell.scroll(&mut page, SCROLL_STEP);
        assert_eq!(page.skills().hovered(), Some(0));
        assert_eq!(shell.cursor.current, CursorStyle::Grab);

        shell.goto(&mut page, Section::Contact);
        assert_eq!(page.skills().hovered(), None);
        assert_eq!(shell.hovered_skill, None);
        assert_eq!(shell.cursor.current, CursorStyle::Auto);
    }

    #[test]
    fn leaving_projects_resets_board_and_cursor() {
        let mut page = page();
        let mut shell = Shell::new(Section::Hero);
        shell.goto(&mut page, Section::Projects);
        shell.capture(&mut page, 45);
        assert_eq!(page.gallery().revealed_count(), 1);

        shell.goto(&mut page, Section::Work);
        assert_eq!(page.gallery().revealed_count(), 0);
        assert_eq!(shell.cursor.current, CursorStyle::Auto);
        assert!(page.is_listening());
    }
}
