//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame step only
//! - Seeded (or scripted) rolls only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod entity;
pub mod player;
pub mod roll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Body, aabb};
pub use collision::{Harvest, apply_crow_penalty, collect_crops, collect_power_ups, crow_hits, scythe_sweep};
pub use entity::{Crop, CropKind, Crow, Entity, PowerUp, PowerUpKind, Scarecrow, crop_points};
pub use player::{Facing, Player};
pub use roll::{Roll, ScriptedRolls};
pub use spawn::{Spawner, grid_position, roll_power_up, spawn_crop};
pub use state::{
    AdvancePolicy, AdvanceTrigger, Command, GameEvent, GamePhase, GameState, time_bonus,
};
pub use tick::{TickInput, tick};
