//! Tunable parameters for the scroll track and animations.
//!
//! Every field has a default matching the shipped site, so a config file
//! only needs the values it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scroll::ScrollParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Vertical distance between blocks in scene units.
    pub item_spacing: f64,
    pub active_scale: f64,
    pub inactive_scale: f64,
    pub active_emissive_intensity: f64,
    pub scale_alpha: f64,
    pub color_alpha: f64,
    /// Smoothing of the container offset that centers the active block.
    pub offset_alpha: f64,
    /// Idle spin per frame, radians.
    pub spin_per_frame: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            item_spacing: 4.0,
            active_scale: 1.15,
            inactive_scale: 1.0,
            active_emissive_intensity: 0.35,
            scale_alpha: 0.06,
            color_alpha: 0.08,
            offset_alpha: 0.06,
            spin_per_frame: 0.005,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub radius: f64,
    pub hover_scale: f64,
    pub hover_alpha: f64,
    /// Auto-rotation speed of the constellation, radians per second.
    pub auto_rotate: f64,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            hover_scale: 1.2,
            hover_alpha: 0.1,
            // One revolution every two minutes.
            auto_rotate: std::f64::consts::TAU / 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub scroll: ScrollParams,
    pub chain: ChainConfig,
    pub skills: SkillsConfig,
}

impl FolioConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scroll;
        positive("scroll.per_item_span", s.per_item_span)?;
        positive("scroll.viewport_span", s.viewport_span)?;
        non_negative("scroll.entry_buffer", s.entry_buffer)?;
        non_negative("scroll.exit_buffer", s.exit_buffer)?;

        let c = &self.chain;
        positive("chain.item_spacing", c.item_spacing)?;
        positive("chain.active_scale", c.active_scale)?;
        positive("chain.inactive_scale", c.inactive_scale)?;
        non_negative(
            "chain.active_emissive_intensity",
            c.active_emissive_intensity,
        )?;
        non_negative("chain.spin_per_frame", c.spin_per_frame)?;
        alpha("chain.scale_alpha", c.scale_alpha)?;
        alpha("chain.color_alpha", c.color_alpha)?;
        alpha("chain.offset_alpha", c.offset_alpha)?;

        let k = &self.skills;
        positive("skills.radius", k.radius)?;
        positive("skills.hover_scale", k.hover_scale)?;
        non_negative("skills.auto_rotate", k.auto_rotate)?;
        alpha("skills.hover_alpha", k.hover_alpha)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be > 0, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be >= 0, got {value}"
        )))
    }
}

fn alpha(name: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be in (0, 1], got {value}"
        )))
    }
}
