//! Omega Race - headless arena combat simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, force field, engine)
//! - `config`: Arena geometry and level tables
//! - `scores`: Top-ten score table
//!
//! The crate has no rendering, audio or input surface. A shell drives
//! [`sim::Engine::update`] with [`sim::TickInput`] intents at a fixed
//! timestep and draws from [`sim::Engine::snapshot`].

pub mod config;
pub mod scores;
pub mod sim;

pub use config::{ArenaConfig, GameConfig, LevelTable};
pub use scores::{ScoreBoard, ScoreEntry};
pub use sim::{Engine, Rotating, TickInput};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep, 120 Hz
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Arena dimensions; the panel is the fenced rectangle at the center
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    pub const PANEL_WIDTH: f32 = 400.0;
    pub const PANEL_HEIGHT: f32 = 200.0;
    /// Wall borders sit this far inside the arena edge
    pub const WALL_INSET: f32 = 20.0;
    pub const BORDER_THICKNESS: f32 = 3.0;

    /// Enemy spawn band (below the panel)
    pub const SPAWN_X_MIN: f32 = 200.0;
    pub const SPAWN_X_MAX: f32 = 800.0;
    pub const SPAWN_Y_MIN: f32 = 550.0;
    pub const SPAWN_Y_MAX: f32 = 750.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 31.0;
    pub const PLAYER_THRUST_SPEED: f32 = 200.0;
    pub const PLAYER_ROTATE_RATE: f32 = PI * (1000.0 / 725.0); // rad/s
    pub const THRUST_DEBOUNCE: f32 = 0.3;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.4;
    /// Speed multiplier applied per force-field bounce
    pub const BOUNCE_RETAIN: f32 = 0.75;

    /// Ship base speeds, scaled by sqrt(level) at spawn
    pub const SHIP_SIZE: f32 = 31.0;
    pub const DROID_SPEED: f32 = 10.0;
    pub const COMMAND_SPEED: f32 = 50.0;
    pub const DEATH_SPEED: f32 = 200.0;
    /// Slow facing wobble all ships carry
    pub const SHIP_WOBBLE_RATE: f32 = PI * (1000.0 / 4096.0); // rad/s
    pub const PATROL_DISTANCE_MIN: f32 = 50.0;
    pub const PATROL_DISTANCE_MAX: f32 = 250.0;
    pub const COMMAND_SHOOT_MIN: f32 = 3.0;
    pub const COMMAND_SHOOT_MAX: f32 = 8.0;
    pub const MINE_DROP_MIN: f32 = 10.0;
    pub const MINE_DROP_MAX: f32 = 20.0;

    /// Kill points
    pub const DROID_POINTS: u32 = 1000;
    pub const COMMAND_POINTS: u32 = 1500;
    pub const DEATH_POINTS: u32 = 2000;
    pub const PHOTON_POINTS: u32 = 350;
    pub const VAPOR_POINTS: u32 = 500;

    /// Mine collision boxes
    pub const PHOTON_SIZE: f32 = 15.0;
    pub const VAPOR_SIZE: f32 = 25.0;

    /// Laser beam: length runs along the heading
    pub const LASER_SPEED: f32 = 300.0;
    pub const LASER_LENGTH: f32 = 15.0;
    pub const LASER_WIDTH: f32 = 2.0;

    /// Wall border flash time when struck
    pub const BLINK_DURATION: f32 = 0.15;
    /// Explosion animation frames and per-frame hold
    pub const EXPLOSION_STEPS: u8 = 6;
    pub const EXPLOSION_STEP_TIME: f32 = 0.1;
    /// Delay before a scheduled round reset fires
    pub const RESET_DELAY: f32 = 1.0;

    pub const STARTING_LIVES: i32 = 3;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
