//! Harvest Dash - A timed crop-collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `config`: Data-driven level table with a built-in fallback
//! - `driver`: Frame clock and collaborator seams (input, render, HUD)
//! - `hud`: Status text and HUD snapshot derived from game state

pub mod config;
pub mod driver;
pub mod hud;
pub mod sim;

pub use config::{CropTypeConfig, GameConfig, LevelConfig};
pub use driver::{Driver, FrameClock, HudSink, InputSource, RenderFrame, RenderSink};
pub use hud::{HudSnapshot, NextLevelButton};

/// Game configuration constants
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 540.0;

    /// Largest simulated step per frame (seconds), bounds catch-up after stalls
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Spawn grid cell size; spawns stay one cell inside every edge
    pub const GRID_CELL: f32 = 30.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 34.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Velocity multiplier while the speed boost is active
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    /// Seconds per walk animation frame
    pub const ANIM_FRAME_TIME: f32 = 0.1;
    pub const ANIM_FRAMES: u8 = 4;

    /// Crop size
    pub const CROP_WIDTH: f32 = 20.0;
    pub const CROP_HEIGHT: f32 = 26.0;

    /// Scarecrow size
    pub const SCARECROW_WIDTH: f32 = 26.0;
    pub const SCARECROW_HEIGHT: f32 = 46.0;

    /// Crow size and top speed per axis
    pub const CROW_SIZE: f32 = 24.0;
    pub const CROW_SPEED: f32 = 120.0;
    /// Score lost per overlapping crow per tick
    pub const CROW_PENALTY: u32 = 2;

    /// Power-up size
    pub const POWER_UP_SIZE: f32 = 20.0;
    /// Chance of a power-up per spawn opportunity
    pub const POWER_UP_CHANCE: f32 = 0.02;
    /// Share of power-ups that are speed boosts (rest are scythes)
    pub const SPEED_POWER_UP_SHARE: f32 = 0.7;
    /// Effect durations (seconds)
    pub const SPEED_BOOST_DURATION: f32 = 5.0;
    pub const SCYTHE_DURATION: f32 = 3.0;
    /// Scythe pickup harvests every crop closer than this to the player
    pub const SCYTHE_RADIUS: f32 = 100.0;

    /// Staged level completion awards this many points per remaining second
    pub const TIME_BONUS_PER_SECOND: f32 = 2.0;
}
