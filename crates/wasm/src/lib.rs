use std::cell::RefCell;

use folio_core::cursor::CursorState;
use folio_core::model::Resume;
use folio_core::{FolioConfig, Page, ScrollParams, Section, Tab};
use folio_protocol::{CursorStyle, Viewport};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// One page per JS realm. `Page` shares `Rc` state internally, so it lives
// in thread-local storage rather than behind a global lock.
thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(js_err)
}

/// Run `f` against the page session, creating it from the embedded content
/// on first use.
fn with_page<R>(f: impl FnOnce(&mut Page) -> R) -> Result<R, JsError> {
    PAGE.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(Page::embedded(FolioConfig::default()).map_err(js_err)?);
        }
        match slot.as_mut() {
            Some(page) => Ok(f(page)),
            None => Err(JsError::new("page session unavailable")),
        }
    })
}

fn cursor_name(style: CursorStyle) -> &'static str {
    match style {
        CursorStyle::Auto => "auto",
        CursorStyle::Pointer => "pointer",
        CursorStyle::Grab => "grab",
    }
}

fn params(
    per_item_span: f64,
    entry_buffer: f64,
    exit_buffer: f64,
    viewport_span: f64,
) -> ScrollParams {
    ScrollParams {
        per_item_span,
        entry_buffer,
        exit_buffer,
        viewport_span,
    }
}

/// Install the panic hook and console logger. Safe to call more than once.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
    log::info!("folio wasm bridge ready");
}

/// (Re)create the page session, optionally from a JSON config.
#[wasm_bindgen]
pub fn page_init(config_json: Option<String>) -> Result<(), JsError> {
    let config = match config_json {
        Some(json) => FolioConfig::from_json(&json).map_err(js_err)?,
        None => FolioConfig::default(),
    };
    let page = Page::embedded(config).map_err(js_err)?;
    PAGE.with(|cell| *cell.borrow_mut() = Some(page));
    Ok(())
}

/// Active job index for a scroll fraction through the experience track.
#[wasm_bindgen]
pub fn compute_active_index(
    progress: f64,
    per_item_span: f64,
    entry_buffer: f64,
    exit_buffer: f64,
    viewport_span: f64,
    item_count: usize,
) -> usize {
    let p = params(per_item_span, entry_buffer, exit_buffer, viewport_span);
    folio_core::compute_active_index(progress, &p, item_count)
}

/// Total height of the experience scroll track, in the same unit as the spans.
#[wasm_bindgen]
pub fn track_height(
    per_item_span: f64,
    entry_buffer: f64,
    exit_buffer: f64,
    viewport_span: f64,
    item_count: usize,
) -> f64 {
    params(per_item_span, entry_buffer, exit_buffer, viewport_span).track_height(item_count)
}

#[wasm_bindgen]
pub fn lerp(actual: f64, target: f64, alpha: f64) -> f64 {
    folio_core::lerp(actual, target, alpha)
}

/// `[{x,y,z}, ...]` for `count` points on a sphere of `radius`.
#[wasm_bindgen]
pub fn sphere_layout(count: usize, radius: f64) -> Result<String, JsError> {
    to_json(&folio_core::sphere_layout(count, radius))
}

#[wasm_bindgen]
pub fn resume_json() -> Result<String, JsError> {
    let resume = Resume::embedded().map_err(js_err)?;
    to_json(&resume)
}

/// Scroll progress through the experience track; returns the active index.
#[wasm_bindgen]
pub fn page_scroll(progress: f64) -> Result<usize, JsError> {
    with_page(|page| page.scroll_experience(progress))
}

/// Whole-page scroll progress; returns the hero fade as `{opacity, scale}`.
#[wasm_bindgen]
pub fn page_hero_scroll(progress: f64) -> Result<String, JsError> {
    let fade = with_page(|page| {
        page.page_scroll(progress);
        page.hero_fade()
    })?;
    to_json(&fade)
}

#[wasm_bindgen]
pub fn page_click_block(index: usize) -> Result<usize, JsError> {
    with_page(|page| page.click_block(index))
}

#[wasm_bindgen]
pub fn page_active_index() -> Result<usize, JsError> {
    with_page(|page| page.active_index())
}

/// Cursor to show while hovering a block (`None` when leaving).
#[wasm_bindgen]
pub fn page_hover_block(index: Option<u32>) -> Result<String, JsError> {
    with_page(|page| {
        let mut cursor = CursorState::default();
        page.hover_block(index.map(|i| i as usize), &mut cursor);
        cursor_name(cursor.current).to_string()
    })
}

#[wasm_bindgen]
pub fn page_hover_skill(index: Option<u32>) -> Result<String, JsError> {
    with_page(|page| {
        let mut cursor = CursorState::default();
        page.hover_skill(index.map(|i| i as usize), &mut cursor);
        cursor_name(cursor.current).to_string()
    })
}

/// `"experience"` or `"education"`.
#[wasm_bindgen]
pub fn page_set_tab(tab: &str) -> Result<(), JsError> {
    let tab = match tab {
        "experience" => Tab::Experience,
        "education" => Tab::Education,
        _ => return Err(JsError::new(&format!("unknown tab: {tab}"))),
    };
    with_page(|page| page.set_tab(tab))
}

#[wasm_bindgen]
pub fn page_set_experience_in_view(in_view: bool) -> Result<(), JsError> {
    with_page(|page| page.set_experience_in_view(in_view))
}

#[wasm_bindgen]
pub fn page_set_contact_open(open: bool) -> Result<(), JsError> {
    with_page(|page| {
        if open {
            page.open_contact();
        } else {
            page.close_contact();
        }
    })
}

#[wasm_bindgen]
pub fn page_contact_links() -> Result<String, JsError> {
    let links = with_page(|page| page.contact_links())?;
    to_json(&links)
}

/// Advance animations by `dt` seconds; returns the hero, chain and skills
/// scenes as JSON.
#[wasm_bindgen]
pub fn page_tick(dt: f64) -> Result<String, JsError> {
    let frame = with_page(|page| page.tick(dt))?;
    to_json(&frame)
}

/// Render commands for one section as JSON.
#[wasm_bindgen]
pub fn page_render(section: &str, width: f64, height: f64, dpr: f64) -> Result<String, JsError> {
    let section: Section = section.parse().map_err(js_err)?;
    let viewport = Viewport {
        x: 0.0,
        y: 0.0,
        width,
        height,
        dpr,
    };
    let commands = with_page(|page| page.render_section(section, &viewport))?;
    to_json(&commands)
}

/// Click a board square. Returns the revealed project as JSON, or `None`
/// when the square holds no project.
#[wasm_bindgen]
pub fn gallery_click(square: u8) -> Result<Option<String>, JsError> {
    let project = with_page(|page| page.gallery_click(square).cloned())?;
    project.map(|p| to_json(&p)).transpose()
}

#[wasm_bindgen]
pub fn gallery_hover(square: Option<u8>) -> Result<String, JsError> {
    with_page(|page| {
        let mut cursor = CursorState::default();
        page.gallery_hover(square, &mut cursor);
        cursor_name(cursor.current).to_string()
    })
}

#[wasm_bindgen]
pub fn gallery_set_in_view(in_view: bool) -> Result<(), JsError> {
    with_page(|page| page.set_projects_in_view(in_view))
}

/// Board and project card as JSON render commands, laid out from the origin.
#[wasm_bindgen]
pub fn gallery_render(width: f64, height: f64) -> Result<String, JsError> {
    let viewport = Viewport::sized(width, height);
    let commands = with_page(|page| page.gallery().render(&viewport))?;
    to_json(&commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_track() {
        assert_eq!(track_height(100.0, 20.0, 30.0, 100.0, 5), 550.0);
        assert_eq!(compute_active_index(0.0, 100.0, 20.0, 30.0, 100.0, 5), 0);
        assert_eq!(compute_active_index(1.0, 100.0, 20.0, 30.0, 100.0, 5), 4);
    }

    #[test]
    fn session_is_created_lazily() {
        assert_eq!(with_page(|p| p.active_index()).ok(), Some(0));
        assert_eq!(page_click_block(2).ok(), Some(2));
        assert_eq!(page_active_index().ok(), Some(2));
        assert_eq!(gallery_hover(Some(27)).ok().as_deref(), Some("pointer"));
    }

    #[test]
    fn scene_and_layout_serialize() {
        let frame = page_tick(0.016).ok();
        assert!(frame.is_some_and(|json| json.contains("\"chain\"")));
        let layout = sphere_layout(3, 1.0).ok();
        assert!(layout.is_some_and(|json| json.starts_with("[{\"x\":")));
    }
}
