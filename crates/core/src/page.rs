//! The page shell: owns every piece of cross-section state and turns
//! pointer/scroll input into state changes and state into frames.

use std::fmt;
use std::str::FromStr;

use folio_protocol::{
    CursorStyle, Point, Rect, RenderCommand, SceneFrame, TextAlign, ThemeToken, Viewport,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::FolioConfig;
use crate::cursor::CursorController;
use crate::model::{ContentError, Project, Resume, embedded_projects};
use crate::scroll::{ScrollListener, ScrollMapper};
use crate::state::{ActiveIndex, Observable};
use crate::views::chain::{self, BlockChain};
use crate::views::gallery::Gallery;
use crate::views::hero::{self, HeroFade};
use crate::views::skills::SkillGraph;
use crate::views::{detail, progress, translate, wrap_text};

const MARGIN: f64 = 48.0;
const TITLE_PX: f64 = 32.0;
const CONTACT_BLURB: &str = "I'm always open to discussing new projects, creative ideas or \
                             opportunities to be part of your visions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Hero,
    Work,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Work,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Work => "work",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Contact => "contact",
        }
    }

    pub fn next(self) -> Section {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Section {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown section {0:?} (try hero, work, projects, skills, contact)")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sec| sec.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Which list the work section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tab {
    #[default]
    Experience,
    Education,
}

/// 3D scenes for one animation frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFrame {
    pub hero: SceneFrame,
    pub chain: SceneFrame,
    pub skills: SceneFrame,
}

/// A contact destination shown in the modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub title: &'static str,
    pub subtitle: String,
    pub href: String,
}

pub struct Page {
    resume: Resume,
    config: FolioConfig,
    active: ActiveIndex,
    /// Scroll progress through the experience track, `0..=1`.
    progress: Observable<f64>,
    mapper: ScrollMapper,
    listener: Option<ScrollListener>,
    chain: BlockChain,
    skills: SkillGraph,
    gallery: Gallery,
    tab: Tab,
    contact_open: bool,
    page_progress: f64,
    elapsed: f64,
    skills_yaw: f64,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("active", &self.active.get())
            .field("tab", &self.tab)
            .field("listening", &self.listener.is_some())
            .field("contact_open", &self.contact_open)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn new(resume: Resume, projects: Vec<Project>, config: FolioConfig) -> Self {
        let n = resume.experience.len();
        let active = ActiveIndex::new(n);
        let progress = Observable::new(0.0);
        let mapper = ScrollMapper::new(config.scroll, n);
        let listener = Some(mapper.attach(&progress, &active));
        Self {
            chain: BlockChain::new(&resume.experience, config.chain),
            skills: SkillGraph::new(&resume, config.skills),
            gallery: Gallery::new(projects),
            resume,
            config,
            active,
            progress,
            mapper,
            listener,
            tab: Tab::Experience,
            contact_open: false,
            page_progress: 0.0,
            elapsed: 0.0,
            skills_yaw: 0.0,
        }
    }

    /// Page over the compiled-in resume and projects.
    pub fn embedded(config: FolioConfig) -> Result<Self, ContentError> {
        Ok(Self::new(Resume::embedded()?, embedded_projects()?, config))
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn active_index(&self) -> usize {
        self.active.get()
    }

    /// Shared handle on the active index, for shells that want to observe it.
    pub fn active(&self) -> &ActiveIndex {
        &self.active
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn skills(&self) -> &SkillGraph {
        &self.skills
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Positions reported while detached are stale; start the track from the
    /// top so the next report always remaps the index.
    fn attach(&mut self) {
        if self.listener.is_none() {
            self.progress.set(0.0);
            self.listener = Some(self.mapper.attach(&self.progress, &self.active));
        }
    }

    fn detach(&mut self) {
        if self.listener.take().is_some() {
            self.active.reset();
        }
    }

    /// Switch the work-section tab. Leaving Experience tears the scroll
    /// listener down and resets the index.
    pub fn set_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        log::debug!("tab -> {tab:?}");
        self.tab = tab;
        match tab {
            Tab::Experience => self.attach(),
            Tab::Education => self.detach(),
        }
    }

    /// Whether the experience region is mounted.
    pub fn set_experience_in_view(&mut self, in_view: bool) {
        if in_view && self.tab == Tab::Experience {
            self.attach();
        } else if !in_view {
            self.detach();
        }
    }

    /// Scroll progress through the experience track. Returns the active index
    /// after the update.
    pub fn scroll_experience(&mut self, progress: f64) -> usize {
        self.progress.set(progress);
        self.active.get()
    }

    /// Progress that puts item `index` in the middle of its plateau.
    pub fn progress_for_index(&self, index: usize) -> f64 {
        self.mapper
            .params()
            .progress_for_index(index, self.mapper.item_count())
    }

    /// A block in the chain was clicked.
    pub fn click_block(&mut self, index: usize) -> usize {
        self.active.set(index)
    }

    /// A progress dot was clicked.
    pub fn click_dot(&mut self, index: usize) -> usize {
        self.active.set(index)
    }

    pub fn hover_block(&self, index: Option<usize>, cursor: &mut dyn CursorController) {
        let over = index.is_some_and(|i| i < self.chain.len());
        cursor.set_cursor(if over {
            CursorStyle::Pointer
        } else {
            CursorStyle::Auto
        });
    }

    pub fn hover_skill(&mut self, index: Option<usize>, cursor: &mut dyn CursorController) {
        self.skills.hover(index, cursor);
    }

    pub fn gallery_click(&mut self, square: u8) -> Option<&Project> {
        self.gallery.click(square)
    }

    pub fn gallery_hover(&self, square: Option<u8>, cursor: &mut dyn CursorController) {
        self.gallery.hover(square, cursor);
    }

    pub fn set_projects_in_view(&mut self, in_view: bool) {
        self.gallery.set_in_view(in_view);
    }

    /// Whole-page scroll progress; drives the hero fade.
    pub fn page_scroll(&mut self, progress: f64) {
        self.page_progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }

    pub fn hero_fade(&self) -> HeroFade {
        hero::hero_fade(self.page_progress)
    }

    pub fn open_contact(&mut self) {
        self.contact_open = true;
    }

    pub fn close_contact(&mut self) {
        self.contact_open = false;
    }

    pub fn contact_open(&self) -> bool {
        self.contact_open
    }

    pub fn contact_links(&self) -> [ContactLink; 2] {
        let p = &self.resume.personal;
        [
            ContactLink {
                title: "Email Me",
                subtitle: p.email.clone(),
                href: format!("mailto:{}", p.email),
            },
            ContactLink {
                title: "LinkedIn",
                subtitle: "Connect professionally".into(),
                href: p.linkedin.clone(),
            },
        ]
    }

    /// Advance every animation by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> PageFrame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        self.skills_yaw =
            (self.skills_yaw + self.config.skills.auto_rotate * dt) % std::f64::consts::TAU;
        PageFrame {
            hero: hero::hero_frame(self.elapsed),
            chain: self.chain.tick(self.active.get(), self.elapsed),
            skills: self.skills.tick(),
        }
    }

    /// 2D command list for one section.
    pub fn render_section(&self, section: Section, viewport: &Viewport) -> Vec<RenderCommand> {
        match section {
            Section::Hero => hero::render_hero(
                &self.resume.personal,
                viewport,
                self.elapsed,
                self.hero_fade(),
            ),
            Section::Work => self.render_work(viewport),
            Section::Projects => self.render_projects(viewport),
            Section::Skills => self.render_skills(viewport),
            Section::Contact => self.render_contact(viewport),
        }
    }

    fn render_work(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let mut commands = vec![RenderCommand::BeginGroup {
            id: "work".into(),
            label: Some("Work".into()),
        }];

        let tab_w = 120.0;
        for (i, (tab, name)) in [(Tab::Experience, "experience"), (Tab::Education, "education")]
            .into_iter()
            .enumerate()
        {
            let selected = tab == self.tab;
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(MARGIN + i as f64 * (tab_w + 8.0), MARGIN, tab_w, 28.0),
                color: if selected {
                    ThemeToken::Primary
                } else {
                    ThemeToken::Surface
                },
                border_color: (!selected).then_some(ThemeToken::Border),
                label: Some(name.into()),
                hit_id: None,
            });
        }

        let body = Rect::new(
            MARGIN,
            MARGIN + 56.0,
            (viewport.width - 2.0 * MARGIN).max(0.0),
            (viewport.height - 2.0 * MARGIN - 56.0).max(0.0),
        );

        match self.tab {
            Tab::Experience => {
                let active = self.active.get();
                let n = self.resume.experience.len();
                let left_w = body.w * 0.4;

                let mut blocks = self.render_blocks(active, Rect::new(0.0, 0.0, left_w, body.h));
                let mut labels = chain::render_labels(
                    &self.resume.experience,
                    active,
                    &Viewport::sized(left_w, body.h),
                );
                translate(&mut blocks, body.x, body.y);
                translate(&mut labels, body.x, body.y);
                commands.extend(blocks);
                commands.extend(labels);

                let card = Rect::new(
                    body.x + left_w + 24.0,
                    body.y,
                    body.w - left_w - 24.0,
                    body.h,
                );
                let mut dots = progress::render_progress(active, n, &Viewport::sized(card.w, 0.0));
                translate(&mut dots, card.x, card.y - 56.0);
                commands.extend(dots);
                if let Some(job) = self.resume.experience_at(active) {
                    commands.extend(detail::render_experience(job, card));
                }
            }
            Tab::Education => {
                commands.extend(detail::render_education(&self.resume.education, body));
            }
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }

    /// Flat stand-in for the 3D chain: one square per job, stacked so the
    /// active one sits at mid-height, sized by its animated scale.
    fn render_blocks(&self, active: usize, area: Rect) -> Vec<RenderCommand> {
        let base = 36.0;
        let step = 72.0;
        let x = area.x + area.w - base * 1.5;
        let shift = self.chain.offset() / self.config.chain.item_spacing;
        let center_y = area.y + area.h / 2.0;

        let mut commands = Vec::with_capacity(self.chain.len() * 2);
        for i in 0..self.chain.len() {
            let y = center_y + (i as f64 - shift) * step;
            if y < area.y - base || y > area.y + area.h + base {
                continue;
            }
            if i + 1 < self.chain.len() {
                commands.push(RenderCommand::DrawLine {
                    from: Point::new(x, y + base / 2.0),
                    to: Point::new(x, y + step - base / 2.0),
                    color: if i == active {
                        ThemeToken::accent(i)
                    } else {
                        ThemeToken::ConnectorMuted
                    },
                    width: if i == active { 2.0 } else { 1.0 },
                });
            }
            let size = base * self.chain.scale(i).unwrap_or(1.0);
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x - size / 2.0, y - size / 2.0, size, size),
                color: if i == active {
                    ThemeToken::accent(i)
                } else {
                    ThemeToken::BlockInactive
                },
                border_color: None,
                label: None,
                hit_id: Some(i as u64),
            });
        }
        commands
    }

    fn render_projects(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let mut commands = vec![
            RenderCommand::text(
                Point::new(viewport.width / 2.0, MARGIN),
                "Strategic Moves",
                ThemeToken::TextPrimary,
                TITLE_PX,
                TextAlign::Center,
            ),
            RenderCommand::text(
                Point::new(viewport.width / 2.0, MARGIN + 28.0),
                "Capture a piece to reveal a project.",
                ThemeToken::TextMuted,
                14.0,
                TextAlign::Center,
            ),
        ];
        let origin = Self::projects_board_origin();
        let area = Viewport::sized(
            (viewport.width - 2.0 * origin.x).max(0.0),
            (viewport.height - origin.y - MARGIN).max(0.0),
        );
        let mut board = self.gallery.render(&area);
        translate(&mut board, origin.x, origin.y);
        commands.extend(board);
        commands
    }

    /// Viewport-relative origin of the board drawn by `render_section(Projects)`.
    pub fn projects_board_origin() -> Point {
        Point::new(MARGIN, MARGIN + 56.0)
    }

    fn render_skills(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let mut commands = vec![RenderCommand::text(
            Point::new(MARGIN, MARGIN),
            "Technical Arsenal",
            ThemeToken::TextPrimary,
            TITLE_PX,
            TextAlign::Left,
        )];
        let col_w = (viewport.width / 2.0 - MARGIN).max(0.0);
        let mut y = MARGIN + 48.0;
        for category in &self.resume.skills {
            commands.push(RenderCommand::text(
                Point::new(MARGIN, y),
                category.category.to_uppercase(),
                crate::palette::category_token(&category.category),
                12.0,
                TextAlign::Left,
            ));
            y += 20.0;
            for line in wrap_text(&category.items.join(" · "), col_w, 13.0) {
                commands.push(RenderCommand::text(
                    Point::new(MARGIN, y),
                    line,
                    ThemeToken::TextSecondary,
                    13.0,
                    TextAlign::Left,
                ));
                y += 18.0;
            }
            y += 16.0;
        }

        let sphere = Viewport::sized(viewport.width / 2.0, viewport.height);
        let mut projected = self.skills.render_projected(&sphere, self.skills_yaw);
        translate(&mut projected, viewport.width / 2.0, 0.0);
        commands.push(RenderCommand::text(
            Point::new(viewport.width - MARGIN, MARGIN),
            "TECH CONSTELLATION",
            ThemeToken::TextMuted,
            10.0,
            TextAlign::Right,
        ));
        commands.extend(projected);
        commands
    }

    fn render_contact(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let links = self.contact_links();
        let mut commands = vec![
            RenderCommand::BeginGroup {
                id: "contact".into(),
                label: Some("Contact".into()),
            },
            RenderCommand::text(
                Point::new(MARGIN, MARGIN),
                "Let's Build Together",
                ThemeToken::TextPrimary,
                TITLE_PX,
                TextAlign::Left,
            ),
            RenderCommand::text(
                Point::new(MARGIN, MARGIN + 32.0),
                format!(
                    "Open for new opportunities in {}.",
                    self.resume.personal.role
                ),
                ThemeToken::TextSecondary,
                14.0,
                TextAlign::Left,
            ),
        ];
        for (i, link) in links.iter().enumerate() {
            commands.push(RenderCommand::text(
                Point::new(MARGIN + i as f64 * 120.0, MARGIN + 72.0),
                if i == 0 { "Email" } else { link.title },
                ThemeToken::TextSecondary,
                14.0,
                TextAlign::Left,
            ));
        }

        if self.contact_open {
            commands.push(RenderCommand::fill(
                Rect::new(0.0, 0.0, viewport.width, viewport.height),
                ThemeToken::ModalBackdrop,
            ));
            let w = viewport.width.min(440.0);
            let h = 340.0_f64.min(viewport.height);
            let modal = Rect::new(
                (viewport.width - w) / 2.0,
                (viewport.height - h) / 2.0,
                w,
                h,
            );
            commands.push(RenderCommand::DrawRect {
                rect: modal,
                color: ThemeToken::Surface,
                border_color: Some(ThemeToken::Border),
                label: None,
                hit_id: None,
            });
            let x = modal.x + 32.0;
            let mut y = modal.y + 48.0;
            commands.push(RenderCommand::text(
                Point::new(x, y),
                "Get in Touch",
                ThemeToken::TextPrimary,
                24.0,
                TextAlign::Left,
            ));
            y += 32.0;
            for line in wrap_text(CONTACT_BLURB, w - 64.0, 14.0) {
                commands.push(RenderCommand::text(
                    Point::new(x, y),
                    line,
                    ThemeToken::TextMuted,
                    14.0,
                    TextAlign::Left,
                ));
                y += 20.0;
            }
            y += 12.0;
            for (i, link) in links.iter().enumerate() {
                commands.push(RenderCommand::DrawRect {
                    rect: Rect::new(x, y, w - 64.0, 56.0),
                    color: ThemeToken::Surface,
                    border_color: Some(if i == 0 {
                        ThemeToken::Primary
                    } else {
                        ThemeToken::LinkedIn
                    }),
                    label: Some(link.title.into()),
                    hit_id: Some(i as u64),
                });
                commands.push(RenderCommand::text(
                    Point::new(x + 16.0, y + 42.0),
                    link.subtitle.clone(),
                    ThemeToken::TextMuted,
                    12.0,
                    TextAlign::Left,
                ));
                y += 68.0;
            }
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }
}
