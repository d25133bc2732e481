//! Integration test: drive a full page session the way a browser shell
//! would (scroll, click, tab switch, gallery play, frame ticks) and check
//! the cross-section state and the exported snapshots.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::cursor::CursorState;
use folio_core::svg::render_svg;
use folio_core::views::gallery::QUEEN_HOME;
use folio_core::{FolioConfig, Page, Section, Tab};
use folio_protocol::{CursorStyle, RenderCommand, Viewport};

fn page() -> Page {
    Page::embedded(FolioConfig::default()).expect("embedded content is valid")
}

#[test]
fn scroll_through_the_experience_track() {
    let mut page = page();
    let n = page.resume().experience.len();

    let seen = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&seen);
    let _sub = page.active().subscribe(move |_| counter.set(counter.get() + 1));

    // Scroll top to bottom in small steps; every job gets highlighted once.
    let mut visited = Vec::new();
    for step in 0..=200 {
        let idx = page.scroll_experience(f64::from(step) / 200.0);
        if visited.last() != Some(&idx) {
            visited.push(idx);
        }
    }
    assert_eq!(visited, (0..n).collect::<Vec<_>>());
    // Only changes notify.
    assert_eq!(seen.get(), n - 1);
}

#[test]
fn chain_glides_after_a_click() {
    let mut page = page();
    let first = page.tick(1.0 / 60.0);
    assert_eq!(first.chain.group_offset.y, 0.0);

    page.click_block(3);
    let mut last = first.chain.group_offset.y;
    for _ in 0..30 {
        let frame = page.tick(1.0 / 60.0);
        assert!(frame.chain.group_offset.y > last);
        last = frame.chain.group_offset.y;
    }
    assert!(last < 12.0);

    for _ in 0..600 {
        page.tick(1.0 / 60.0);
    }
    let settled = page.tick(1.0 / 60.0);
    assert!((settled.chain.group_offset.y - 12.0).abs() < 1e-6);
    assert!((settled.chain.nodes[3].scale - 1.15).abs() < 1e-6);
}

#[test]
fn tab_switch_round_trip() {
    let mut page = page();
    page.scroll_experience(0.8);
    assert_eq!(page.active_index(), 3);

    page.set_tab(Tab::Education);
    assert_eq!(page.active_index(), 0);
    assert_eq!(page.tab(), Tab::Education);

    page.set_tab(Tab::Experience);
    page.scroll_experience(0.5);
    assert_eq!(page.active_index(), 2);
}

#[test]
fn same_position_after_tab_round_trip_restores_index() {
    let mut page = page();
    assert_eq!(page.scroll_experience(0.8), 3);

    page.set_tab(Tab::Education);
    page.set_tab(Tab::Experience);
    assert_eq!(page.active_index(), 0);
    assert_eq!(page.scroll_experience(0.8), 3);
}

#[test]
fn gallery_game_and_reset() {
    let mut page = page();
    let mut cursor = CursorState::default();

    page.set_projects_in_view(true);
    page.gallery_hover(Some(45), &mut cursor);
    assert_eq!(cursor.current, CursorStyle::Pointer);

    let title = page.gallery_click(45).map(|p| p.title.clone());
    assert!(title.is_some());
    page.gallery_click(27);
    page.gallery_click(45);
    assert_eq!(page.gallery().revealed_count(), 2);

    page.set_projects_in_view(false);
    assert_eq!(page.gallery().queen(), QUEEN_HOME);
    assert_eq!(page.gallery().revealed_count(), 0);
}

#[test]
fn every_section_exports_to_svg() {
    let mut page = page();
    page.tick(0.5);
    page.gallery_click(18);
    page.open_contact();
    let vp = Viewport::sized(1280.0, 800.0);

    for section in Section::ALL {
        let commands = page.render_section(section, &vp);
        let groups_open = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::BeginGroup { .. }))
            .count();
        let groups_closed = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::EndGroup))
            .count();
        assert_eq!(groups_open, groups_closed, "{section}: unbalanced groups");

        let svg = render_svg(&commands, vp.width, vp.height, false);
        assert!(svg.starts_with("<svg") && svg.ends_with("</svg>"));
    }

    let commands = page.render_section(Section::Contact, &vp);
    let contact = render_svg(&commands, 1280.0, 800.0, true);
    assert!(contact.contains("Get in Touch"));
    assert!(contact.contains("LinkedIn"));
}
