//! Field entities: crops, scarecrows, crows and power-ups
//!
//! Each kind is its own struct over a shared [`Body`]; the closed [`Entity`]
//! view lets collaborators walk every live entity and dispatch on the tag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::player::Player;
use super::roll::Roll;
use crate::consts::*;

/// Crop tiers, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Wheat,
    Pumpkin,
    GoldenApple,
}

impl CropKind {
    pub const ALL: [CropKind; 3] = [CropKind::Wheat, CropKind::Pumpkin, CropKind::GoldenApple];

    /// Name used in the configuration crop table
    pub fn name(&self) -> &'static str {
        match self {
            CropKind::Wheat => "wheat",
            CropKind::Pumpkin => "pumpkin",
            CropKind::GoldenApple => "goldenApple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Built-in point value for this tier
    pub fn default_points(&self) -> u32 {
        crop_points(self.name())
    }

    /// Weighted tier draw on a uniform roll (cumulative thresholds)
    pub fn from_roll(r: f32) -> Self {
        if r < 0.1 {
            CropKind::GoldenApple
        } else if r < 0.4 {
            CropKind::Pumpkin
        } else {
            CropKind::Wheat
        }
    }
}

/// Point value for a crop type name; unknown names are worth 1
pub fn crop_points(name: &str) -> u32 {
    match name {
        "wheat" => 1,
        "pumpkin" => 3,
        "goldenApple" => 5,
        _ => 1,
    }
}

/// A collectible crop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub body: Body,
    pub kind: CropKind,
    /// Fixed at construction
    pub points: u32,
    /// Sway phase (cosmetic)
    pub sway: f32,
}

impl Crop {
    pub fn new(pos: Vec2, kind: CropKind, points: u32, sway: f32) -> Self {
        Self {
            body: Body::new(pos.x, pos.y, CROP_WIDTH, CROP_HEIGHT),
            kind,
            points,
            sway,
        }
    }

    /// Crop with the built-in point value and a resting sway phase
    pub fn of_kind(pos: Vec2, kind: CropKind) -> Self {
        Self::new(pos, kind, kind.default_points(), 0.0)
    }

    pub fn update(&mut self, dt: f32) {
        self.sway += dt * 2.0;
    }
}

/// Static obstacle that blocks the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scarecrow {
    pub body: Body,
}

impl Scarecrow {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, SCARECROW_WIDTH, SCARECROW_HEIGHT),
        }
    }

    /// Layout used at level setup: a staggered row across the field
    pub fn for_slot(slot: u32) -> Self {
        Self::new(100.0 + slot as f32 * 200.0, 100.0 + (slot % 2) as f32 * 150.0)
    }
}

/// Bouncing adversary that costs score on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crow {
    pub body: Body,
    pub vel: Vec2,
}

impl Crow {
    pub fn new(x: f32, y: f32, vel: Vec2) -> Self {
        Self {
            body: Body::new(x, y, CROW_SIZE, CROW_SIZE),
            vel,
        }
    }

    /// Crow for a level-setup slot with a random heading and speed
    pub fn for_slot(slot: u32, rng: &mut impl Roll) -> Self {
        let vx = (rng.roll() - 0.5) * 2.0 * CROW_SPEED;
        let vy = (rng.roll() - 0.5) * 2.0 * CROW_SPEED;
        Self::new(
            150.0 + slot as f32 * 150.0,
            200.0 + (slot % 2) as f32 * 100.0,
            Vec2::new(vx, vy),
        )
    }

    /// Integrate and bounce off the field edges
    pub fn update(&mut self, dt: f32) {
        self.body.pos += self.vel * dt;

        let max = self.body.max_pos();
        if self.body.pos.x <= 0.0 || self.body.pos.x >= max.x {
            self.vel.x = -self.vel.x;
        }
        if self.body.pos.y <= 0.0 || self.body.pos.y >= max.y {
            self.vel.y = -self.vel.y;
        }

        self.body.pos = self.body.clamp_to_field(self.body.pos);
        debug_assert!(self.body.in_field());
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Faster movement for a few seconds
    Speed,
    /// Harvests nearby crops on pickup
    Scythe,
}

impl PowerUpKind {
    pub fn from_roll(r: f32) -> Self {
        if r < SPEED_POWER_UP_SHARE {
            PowerUpKind::Speed
        } else {
            PowerUpKind::Scythe
        }
    }

    /// Effect duration in seconds
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::Speed => SPEED_BOOST_DURATION,
            PowerUpKind::Scythe => SCYTHE_DURATION,
        }
    }
}

/// A power-up pickup; lives until collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Pulse phase (cosmetic)
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            body: Body::new(pos.x, pos.y, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            pulse: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pulse += dt * 5.0;
    }
}

/// Borrowed view over any entity on the field
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Player(&'a Player),
    Crop(&'a Crop),
    Scarecrow(&'a Scarecrow),
    Crow(&'a Crow),
    PowerUp(&'a PowerUp),
}

impl Entity<'_> {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::Crop(c) => &c.body,
            Entity::Scarecrow(s) => &s.body,
            Entity::Crow(c) => &c.body,
            Entity::PowerUp(p) => &p.body,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body().alive
    }
}
