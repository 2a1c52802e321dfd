//! Force-field borders around the arena and the central panel
//!
//! Borders reflect bodies moving into their face. The dot-product gate
//! keeps a body that still overlaps on the next tick from being reflected
//! again off the same face.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, reflect};
use super::entities::{Laser, Player, Ship};
use crate::config::ArenaConfig;
use crate::consts::*;

/// One reflecting border segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Border {
    /// Center of the segment
    pub pos: Vec2,
    /// Half extents of the segment box
    pub half: Vec2,
    /// Unit normal pointing into the play region
    pub normal: Vec2,
    /// Panel borders stay lit; wall borders only flash when struck
    pub always_visible: bool,
    /// Clock stamp until which a struck wall border stays lit
    #[serde(default)]
    pub blink_until: f32,
}

impl Border {
    pub fn new(pos: Vec2, size: Vec2, normal: Vec2, always_visible: bool) -> Self {
        Self {
            pos,
            half: size * 0.5,
            normal,
            always_visible,
            blink_until: 0.0,
        }
    }

    /// Overlap test. Dead bodies never touch the field.
    pub fn touches(&self, body: &Body) -> bool {
        if !body.alive {
            return false;
        }
        let d = (self.pos - body.pos).abs();
        let reach = self.half + body.half;
        d.x < reach.x && d.y < reach.y
    }

    /// True when the body overlaps and is moving into the face
    pub fn struck(&self, body: &Body) -> bool {
        self.touches(body) && self.normal.dot(body.direction) < 0.0
    }

    /// Reflect the body if it is striking this border. Returns true when
    /// a reflection happened.
    pub fn deflect(&mut self, body: &mut Body, now: f32) -> bool {
        if !self.struck(body) {
            return false;
        }
        let bounced = reflect(body.direction, self.normal);
        body.set_direction(bounced);
        self.blink(now);
        true
    }

    /// Light up a struck wall border. A flash already showing is not
    /// extended, and panel borders are always lit anyway.
    pub fn blink(&mut self, now: f32) {
        if self.always_visible || self.blink_until > now {
            return;
        }
        self.blink_until = now + BLINK_DURATION;
    }

    pub fn visible(&self, now: f32) -> bool {
        self.always_visible || self.blink_until > now
    }
}

/// The full border set: eight wall segments plus four panel fences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceField {
    pub borders: Vec<Border>,
}

impl ForceField {
    /// Build the twelve borders from the arena geometry. Walls are split
    /// into two segments per side so a strike only lights up the half
    /// that was hit.
    pub fn new(arena: &ArenaConfig) -> Self {
        let c = arena.center();
        let t = arena.border_thickness;
        let inset = arena.wall_inset;
        let (w, h) = (arena.width, arena.height);
        let (pw, ph) = (arena.panel_width, arena.panel_height);

        let seg_v = Vec2::new(t, c.y - inset + t);
        let seg_h = Vec2::new(c.x - inset + t, t);
        let y_near = (inset + c.y) / 2.0;
        let y_far = h - y_near;
        let x_near = (inset + c.x) / 2.0;
        let x_far = w - x_near;

        let mut borders = Vec::with_capacity(12);
        for y in [y_near, y_far] {
            borders.push(Border::new(Vec2::new(inset, y), seg_v, Vec2::X, false));
            borders.push(Border::new(Vec2::new(w - inset, y), seg_v, Vec2::NEG_X, false));
        }
        for x in [x_near, x_far] {
            borders.push(Border::new(Vec2::new(x, inset), seg_h, Vec2::Y, false));
            borders.push(Border::new(Vec2::new(x, h - inset), seg_h, Vec2::NEG_Y, false));
        }

        // Panel fences keep everything out of the center rectangle;
        // their normals point out into the play area.
        let fence_v = Vec2::new(t, ph + t);
        let fence_h = Vec2::new(pw + t, t);
        borders.push(Border::new(
            Vec2::new(c.x - pw / 2.0, c.y),
            fence_v,
            Vec2::NEG_X,
            true,
        ));
        borders.push(Border::new(
            Vec2::new(c.x + pw / 2.0, c.y),
            fence_v,
            Vec2::X,
            true,
        ));
        borders.push(Border::new(
            Vec2::new(c.x, c.y - ph / 2.0),
            fence_h,
            Vec2::NEG_Y,
            true,
        ));
        borders.push(Border::new(
            Vec2::new(c.x, c.y + ph / 2.0),
            fence_h,
            Vec2::Y,
            true,
        ));

        Self { borders }
    }

    /// Bounce the player: each deflecting border bleeds speed and stamps
    /// the thrust debounce.
    pub fn bounce_player(&mut self, player: &mut Player, now: f32) {
        for border in &mut self.borders {
            if border.deflect(&mut player.body, now) {
                player.on_bounce(now);
            }
        }
    }

    /// Bounce a ship at unchanged speed
    pub fn bounce_ship(&mut self, ship: &mut Ship, now: f32) {
        for border in &mut self.borders {
            border.deflect(&mut ship.body, now);
        }
    }

    /// Lasers never reflect: striking any border destroys the bolt and
    /// lights the border up.
    pub fn crash_laser(&mut self, laser: &mut Laser, now: f32) {
        for border in &mut self.borders {
            if border.struck(&laser.body) {
                border.blink(now);
                laser.body.die();
                return;
            }
        }
    }
}
