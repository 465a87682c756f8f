//! Accumulator-driven spawning of crops and power-ups
//!
//! Elapsed play time is banked each tick; every full spawn interval in the
//! bank is one spawn opportunity (one crop plus one power-up roll).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Crop, CropKind, PowerUp, PowerUpKind};
use super::roll::Roll;
use crate::config::GameConfig;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, GRID_CELL, POWER_UP_CHANCE};

/// Grid columns/rows available for spawns (one cell margin on every side)
pub const GRID_COLUMNS: u32 = ((FIELD_WIDTH - 2.0 * GRID_CELL) / GRID_CELL) as u32;
pub const GRID_ROWS: u32 = ((FIELD_HEIGHT - 2.0 * GRID_CELL) / GRID_CELL) as u32;

/// Uniform grid-aligned spawn point inside the margins
pub fn grid_position(rng: &mut impl Roll) -> Vec2 {
    let col = rng.cell(GRID_COLUMNS);
    let row = rng.cell(GRID_ROWS);
    Vec2::new(
        col as f32 * GRID_CELL + GRID_CELL,
        row as f32 * GRID_CELL + GRID_CELL,
    )
}

/// Roll a new crop: position, tier, then starting sway
pub fn spawn_crop(rng: &mut impl Roll, config: &GameConfig) -> Crop {
    let pos = grid_position(rng);
    let kind = CropKind::from_roll(rng.roll());
    let sway = rng.roll() * std::f32::consts::TAU;
    Crop::new(pos, kind, config.crop_points(kind), sway)
}

/// One power-up check; most opportunities produce nothing
pub fn roll_power_up(rng: &mut impl Roll) -> Option<PowerUp> {
    if rng.roll() >= POWER_UP_CHANCE {
        return None;
    }
    let pos = grid_position(rng);
    let kind = PowerUpKind::from_roll(rng.roll());
    Some(PowerUp::new(pos, kind))
}

/// Spawn time bank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub accumulator: f32,
}

impl Spawner {
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Bank `dt` and spend it on spawn opportunities; returns how many ran
    pub fn advance(
        &mut self,
        dt: f32,
        interval: f32,
        rng: &mut impl Roll,
        config: &GameConfig,
        crops: &mut Vec<Crop>,
        power_ups: &mut Vec<PowerUp>,
    ) -> u32 {
        self.accumulator += dt;
        if interval <= 0.0 {
            return 0;
        }

        let mut opportunities = 0;
        while self.accumulator >= interval {
            self.accumulator -= interval;
            opportunities += 1;

            let crop = spawn_crop(rng, config);
            log::debug!("Spawned {:?} at {:?}", crop.kind, crop.body.pos);
            crops.push(crop);

            if let Some(power_up) = roll_power_up(rng) {
                log::debug!("Spawned {:?} power-up at {:?}", power_up.kind, power_up.body.pos);
                power_ups.push(power_up);
            }
        }
        opportunities
    }
}
