//! Content model, scroll/animation state and view transforms for folio.
//!
//! Everything here is host-agnostic: views emit `RenderCommand` lists and
//! `SceneFrame`s, and the wasm and terminal shells draw them.

pub mod anim;
pub mod config;
pub mod cursor;
pub mod model;
pub mod page;
pub mod palette;
pub mod scroll;
pub mod state;
pub mod svg;
pub mod views;

pub use anim::{Lerp, Smoothed, lerp};
pub use config::{ConfigError, FolioConfig};
pub use page::{Page, PageFrame, Section, Tab};
pub use scroll::{ScrollMapper, ScrollParams, compute_active_index};
pub use state::{ActiveIndex, Observable, Subscription};
pub use views::skills::{sphere_layout, sphere_point};
