pub mod commands;
pub mod scene;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use scene::{CursorStyle, SceneFrame, SceneLine, SceneNode, Shape};
pub use theme::ThemeToken;
pub use types::{Color, Point, Rect, Vec3, Viewport};
