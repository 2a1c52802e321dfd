//! Shared entity body: position, heading, facing, speed, collision box
//!
//! Every mobile object in the arena (player, ships, mines, lasers) embeds
//! a `Body`. Collision is axis-aligned box overlap. Dead bodies never move
//! and never collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movable entity core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Center position in arena coordinates (y grows downward)
    pub pos: Vec2,
    /// Unit travel heading
    pub direction: Vec2,
    /// Unit facing (where the nose points; shots leave along this)
    pub rotation: Vec2,
    /// Speed in px/s
    pub speed: f32,
    /// Collision half extents
    pub half: Vec2,
    pub alive: bool,
}

impl Body {
    /// New body at `pos` with a `size` collision box, traveling and
    /// facing along `heading`. A degenerate heading falls back to +x.
    pub fn new(pos: Vec2, size: Vec2, heading: Vec2, speed: f32) -> Self {
        let heading = heading.try_normalize().unwrap_or(Vec2::X);
        Self {
            pos,
            direction: heading,
            rotation: heading,
            speed,
            half: size * 0.5,
            alive: true,
        }
    }

    /// Advance along the heading. Dead bodies stay put.
    pub fn advance(&mut self, dt: f32) {
        if self.alive {
            self.pos += self.direction * self.speed * dt;
        }
    }

    /// Set the travel heading, normalizing the input. A (near-)zero
    /// vector leaves the heading unchanged.
    pub fn set_direction(&mut self, dir: Vec2) {
        if let Some(unit) = dir.try_normalize() {
            self.direction = unit;
        }
    }

    /// Set the facing; same degenerate-input policy as `set_direction`
    pub fn set_rotation(&mut self, dir: Vec2) {
        if let Some(unit) = dir.try_normalize() {
            self.rotation = unit;
        }
    }

    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Collision box corners as (min, max)
    pub fn aabb(&self) -> (Vec2, Vec2) {
        (self.pos - self.half, self.pos + self.half)
    }

    /// Axis-aligned overlap test. False unless both bodies are alive.
    pub fn collide(&self, other: &Body) -> bool {
        if !self.alive || !other.alive {
            return false;
        }
        let d = (self.pos - other.pos).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

/// Reflect a direction off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}
