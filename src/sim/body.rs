//! Axis-aligned body shared by every entity on the field
//!
//! A body is a rectangle anchored at its top-left corner:
//! - pos: top-left corner in field units (y grows downward)
//! - size: width and height
//! - alive: cleared when the entity is consumed; dead bodies never collide

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Position, extent and liveness of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    /// False once collected; purged at the end of the tick
    pub alive: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            alive: true,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Largest top-left corner that keeps the body inside the field
    #[inline]
    pub fn max_pos(&self) -> Vec2 {
        Vec2::new(FIELD_WIDTH - self.size.x, FIELD_HEIGHT - self.size.y)
    }

    /// Clamp a candidate top-left corner into the field, each axis independently
    pub fn clamp_to_field(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.max_pos())
    }

    /// True if the whole body lies inside the field
    pub fn in_field(&self) -> bool {
        let max = self.max_pos();
        self.pos.x >= 0.0 && self.pos.y >= 0.0 && self.pos.x <= max.x && self.pos.y <= max.y
    }

    /// Strict AABB overlap; bodies sharing only an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        aabb(self, other)
    }

    /// Distance between top-left corners
    pub fn corner_distance(&self, other: &Body) -> f32 {
        self.pos.distance(other.pos)
    }
}

/// Axis-aligned bounding-box overlap test with open intervals
#[inline]
pub fn aabb(a: &Body, b: &Body) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}
