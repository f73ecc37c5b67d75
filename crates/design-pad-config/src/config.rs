/// Application configuration: load, save and sanitize.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Largest canvas edge accepted from the config file, in pixels.
const MAX_CANVAS_EDGE: u32 = 10_000;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Width of a new blank canvas in pixels.
    pub canvas_width: u32,
    /// Height of a new blank canvas in pixels.
    pub canvas_height: u32,
    pub background_color: HexColor,
    pub default_font_family: String,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Amount added or removed per zoom in/out step.
    pub zoom_step: f32,
    /// Offset in pixels applied to pasted copies.
    pub paste_offset: f32,
    /// Max undo snapshots per design. 0 = unlimited.
    pub max_history_depth: usize,
    /// Whether undo history is written to disk and resumed on reopen.
    pub persist_history: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background_color: HexColor::WHITE,
            default_font_family: "Inter".to_string(),
            min_zoom: 0.1,
            max_zoom: 3.0,
            zoom_step: 0.1,
            paste_offset: 10.0,
            max_history_depth: 1_000,
            persist_history: false,
        }
    }
}

impl AppConfig {
    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        self.canvas_width = self.canvas_width.clamp(1, MAX_CANVAS_EDGE);
        self.canvas_height = self.canvas_height.clamp(1, MAX_CANVAS_EDGE);

        if !self.min_zoom.is_finite() || self.min_zoom <= 0.0 {
            self.min_zoom = defaults.min_zoom;
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            self.max_zoom = self.min_zoom.max(defaults.max_zoom);
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            self.zoom_step = defaults.zoom_step;
        }
        if !self.paste_offset.is_finite() {
            self.paste_offset = defaults.paste_offset;
        }
        if self.default_font_family.trim().is_empty() {
            self.default_font_family = defaults.default_font_family;
        }
    }
}
