use std::collections::HashSet;

use folio_protocol::ThemeToken;
use serde::{Deserialize, Serialize};

use super::ContentError;
use crate::views::gallery::{BOARD_SQUARES, QUEEN_HOME};

const EMBEDDED_PROJECTS: &str = include_str!("../../data/projects.json");

/// A project hidden behind a pawn on the gallery board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    /// Board square, 0..64 in row-major order from a8.
    pub square: u8,
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub accent: ThemeToken,
}

/// Load the compiled-in project list.
pub fn embedded_projects() -> Result<Vec<Project>, ContentError> {
    projects_from_json(EMBEDDED_PROJECTS)
}

pub fn projects_from_json(json: &str) -> Result<Vec<Project>, ContentError> {
    let projects: Vec<Project> = serde_json::from_str(json)?;
    validate_projects(&projects)?;
    Ok(projects)
}

pub fn validate_projects(projects: &[Project]) -> Result<(), ContentError> {
    let mut squares = HashSet::new();
    for project in projects {
        if usize::from(project.square) >= BOARD_SQUARES || project.square == QUEEN_HOME {
            return Err(ContentError::InvalidSquare {
                id: project.id.clone(),
                square: project.square,
            });
        }
        if !squares.insert(project.square) {
            return Err(ContentError::SquareTaken(project.square));
        }
    }
    Ok(())
}

/// Algebraic name of a square, e.g. 36 -> "e4".
pub fn square_name(square: u8) -> String {
    let file = char::from(b'a' + square % 8);
    let rank = 8 - square / 8;
    format!("{file}{rank}")
}
