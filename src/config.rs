//! Arena geometry and level tables
//!
//! Everything the simulation reads as tunable data lives here, with the
//! cabinet numbers as defaults. `GameConfig` round-trips as JSON so a
//! shell can ship a modified arena.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;

/// Arena geometry. The panel is the fenced rectangle at the center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub panel_width: f32,
    pub panel_height: f32,
    /// Wall borders sit this far inside the arena edge
    pub wall_inset: f32,
    pub border_thickness: f32,
    /// Enemy spawn band corners (below the panel)
    pub spawn_min: Vec2,
    pub spawn_max: Vec2,
    /// Where the player ship appears on each layout
    pub player_spawn: Vec2,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            panel_width: PANEL_WIDTH,
            panel_height: PANEL_HEIGHT,
            wall_inset: WALL_INSET,
            border_thickness: BORDER_THICKNESS,
            spawn_min: Vec2::new(SPAWN_X_MIN, SPAWN_Y_MIN),
            spawn_max: Vec2::new(SPAWN_X_MAX, SPAWN_Y_MAX),
            player_spawn: Vec2::new(ARENA_WIDTH / 2.0, 200.0),
        }
    }
}

impl ArenaConfig {
    /// Arena center, also the panel center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Enemy counts per level, one row per level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTable {
    pub droids: Vec<u32>,
    pub commands: Vec<u32>,
    pub deaths: Vec<u32>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            droids: vec![5, 5, 6, 7, 7],
            commands: vec![1, 2, 3, 4, 5],
            deaths: vec![0, 1, 1, 1, 2],
        }
    }
}

impl LevelTable {
    /// (droid, command, death) counts for a level. Level 0 reads the
    /// first row; levels past the table reuse the last row.
    pub fn counts(&self, level: u32) -> (u32, u32, u32) {
        (
            row_value(&self.droids, level),
            row_value(&self.commands, level),
            row_value(&self.deaths, level),
        )
    }
}

fn row_value(rows: &[u32], level: u32) -> u32 {
    if rows.is_empty() {
        return 0;
    }
    let row = (level.max(1) as usize - 1).min(rows.len() - 1);
    rows[row]
}

/// Top-level tunables: arena geometry plus the level table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub levels: LevelTable,
}

impl GameConfig {
    /// Load from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Bad config {}: {}, using defaults", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Best-effort save as pretty JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("Could not save config {}: {}", path.display(), err);
                }
            }
            Err(err) => log::warn!("Could not serialize config: {}", err),
        }
    }
}
