//! Game configuration
//!
//! `GameConfig` mirrors the window/physics settings the game boots with.
//! Defaults are baked in; `assets/config/game.json` can override any field.

use crate::error::{GameError, GameResult};
use log::info;
use sdl2::pixels::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.json";

/// How the logical canvas is fitted into the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Keep aspect ratio, shrink the zoom until the window fits the desktop
    Fit,
    /// Use the configured zoom as-is
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoCenter {
    Both,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub zoom: u32,
    pub background_color: String,
    pub scale_mode: ScaleMode,
    pub auto_center: AutoCenter,
    pub gravity_y: f32,
    /// Draw body outlines on top of the scene
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            title: "Saberman".to_string(),
            width: 800,
            height: 600,
            zoom: 2,
            background_color: "#028af8".to_string(),
            scale_mode: ScaleMode::Fit,
            auto_center: AutoCenter::Both,
            gravity_y: 300.0,
            debug: false,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> GameResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file if there is one, otherwise fall back to defaults.
    ///
    /// A file that exists but doesn't parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(GameConfig::default());
        }

        let config = Self::load_from_file(path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.zoom == 0 {
            return Err(GameError::Config("zoom must be at least 1".to_string()));
        }
        parse_hex_color(&self.background_color)?;
        Ok(())
    }

    pub fn background(&self) -> GameResult<Color> {
        parse_hex_color(&self.background_color)
    }

    /// Pick the window zoom factor.
    ///
    /// With `ScaleMode::Fit` the zoom drops until the window fits inside the
    /// usable desktop area (never below 1x).
    pub fn window_zoom(&self, usable_width: u32, usable_height: u32) -> u32 {
        match self.scale_mode {
            ScaleMode::None => self.zoom,
            ScaleMode::Fit => {
                let max_w = usable_width / self.width;
                let max_h = usable_height / self.height;
                self.zoom.min(max_w).min(max_h).max(1)
            }
        }
    }
}

/// Parses `#rrggbb` (leading `#` optional) into an opaque color
pub fn parse_hex_color(hex: &str) -> GameResult<Color> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(GameError::Config(format!("bad color '{}'", hex)));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| GameError::Config(format!("bad color '{}': {}", hex, e)))
    };

    Ok(Color::RGB(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
