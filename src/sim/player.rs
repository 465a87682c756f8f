//! The farmer: keyboard-driven movement, effect timers and walk animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::entity::{PowerUpKind, Scarecrow};
use super::tick::TickInput;
use crate::consts::*;

/// Facing direction (sprite row order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub vel: Vec2,
    /// Base speed (units per second)
    pub speed: f32,
    /// Seconds of speed boost left
    pub speed_boost: f32,
    /// Seconds of scythe left
    pub scythe: f32,
    pub facing: Facing,
    pub moving: bool,
    /// Walk animation frame (0 = idle)
    pub frame: u8,
    pub frame_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(FIELD_WIDTH / 2.0 - 17.0, FIELD_HEIGHT - 80.0)
    }
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            speed: PLAYER_SPEED,
            speed_boost: 0.0,
            scythe: 0.0,
            facing: Facing::Down,
            moving: false,
            frame: 0,
            frame_timer: 0.0,
        }
    }

    #[inline]
    pub fn speed_boost_active(&self) -> bool {
        self.speed_boost > 0.0
    }

    #[inline]
    pub fn scythe_active(&self) -> bool {
        self.scythe > 0.0
    }

    /// Current speed including any boost
    pub fn effective_speed(&self) -> f32 {
        if self.speed_boost_active() {
            self.speed * SPEED_BOOST_FACTOR
        } else {
            self.speed
        }
    }

    /// Set velocity and facing from the held direction keys
    pub fn apply_input(&mut self, input: &TickInput) {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        let speed = self.effective_speed();

        self.vel = Vec2::new(
            axis(input.left, input.right) * speed,
            axis(input.up, input.down) * speed,
        );
        self.moving = self.vel != Vec2::ZERO;

        // Checked in a fixed order; the last held key wins
        if input.left {
            self.facing = Facing::Left;
        }
        if input.right {
            self.facing = Facing::Right;
        }
        if input.up {
            self.facing = Facing::Up;
        }
        if input.down {
            self.facing = Facing::Down;
        }
    }

    /// Start (or restart) an effect timer
    pub fn grant(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Speed => self.speed_boost = kind.duration(),
            PowerUpKind::Scythe => self.scythe = kind.duration(),
        }
    }

    /// Advance timers, animation and position for one tick
    pub fn update(&mut self, dt: f32, scarecrows: &[Scarecrow]) {
        self.speed_boost = (self.speed_boost - dt).max(0.0);
        self.scythe = (self.scythe - dt).max(0.0);

        self.animate(dt);

        let old_pos = self.body.pos;
        self.body.pos = self.body.clamp_to_field(old_pos + self.vel * dt);

        // Blocked moves are undone on both axes; no sliding along obstacles
        let blocked = scarecrows
            .iter()
            .any(|s| s.body.alive && self.body.overlaps(&s.body));
        if blocked {
            self.body.pos = old_pos;
        }
        debug_assert!(self.body.in_field());
    }

    fn animate(&mut self, dt: f32) {
        if self.moving {
            self.frame_timer += dt;
            if self.frame_timer >= ANIM_FRAME_TIME {
                self.frame_timer = 0.0;
                self.frame = (self.frame + 1) % ANIM_FRAMES;
            }
        } else {
            self.frame = 0;
        }
    }
}
