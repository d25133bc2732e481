pub mod project;
pub mod resume;

pub use project::{Project, embedded_projects, projects_from_json, square_name};
pub use resume::{Education, Experience, Personal, Resume, SkillCategory};

use thiserror::Error;

/// A malformed content document. Raised at startup, never mid-session.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("experience list is empty")]
    NoExperience,
    #[error("duplicate experience id: {0}")]
    DuplicateExperience(String),
    #[error("no skills listed")]
    NoSkills,
    #[error("project {id}: square {square} is off the board or the queen's home")]
    InvalidSquare { id: String, square: u8 },
    #[error("two projects share square {0}")]
    SquareTaken(u8),
}
