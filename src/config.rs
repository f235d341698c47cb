use anyhow::Context;
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Game settings, read from an optional JSON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    /// Size of the low-res canvas the game is drawn on before scaling.
    pub display_width: u32,
    pub display_height: u32,
    pub tile_size: u32,
    pub maps_dir: PathBuf,
    pub images_dir: PathBuf,
    pub start_level: usize,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            window_title: "Arthur's Escape".into(),
            window_width: 640,
            window_height: 480,
            display_width: 320,
            display_height: 240,
            tile_size: 16,
            maps_dir: PathBuf::from("data/maps"),
            images_dir: PathBuf::from("data/images"),
            start_level: 0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads the config at `path`, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        serde_json::from_str(&txt).with_context(|| format!("Parsing config file {}", path.display()))
    }

    pub fn display_size(&self) -> Vec2 {
        vec2(self.display_width as f32, self.display_height as f32)
    }

    pub fn map_path(&self, level: usize) -> PathBuf {
        self.maps_dir.join(format!("{level}.json"))
    }

    /// Number of consecutive `<n>.json` levels starting at 0.
    pub fn level_count(&self) -> usize {
        (0..).take_while(|&n| self.map_path(n).is_file()).count()
    }
}
