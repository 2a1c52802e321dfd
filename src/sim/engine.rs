//! The engine: owns all round state and advances it one tick at a time
//!
//! Update order within a tick is fixed: enemies, mines, player lasers,
//! enemy lasers, explosions, player, force field, sweep and level check,
//! deferred reset. Everything time-based is a stamp polled against the
//! engine clock; there are no timers and no globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Explosion, Laser, Mine, Player, Rotating, Ship, ShipClass};
use super::field::{Border, ForceField};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Built but not started
    Ready,
    /// Active gameplay
    Running,
    /// Out of lives
    Over,
}

/// Per-tick intents from the shell. The core never reads input devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub rotate: Rotating,
    pub thrust: bool,
    pub shoot: bool,
}

/// Read-only view of the world for rendering or capture
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: RoundPhase,
    pub level: u32,
    pub lives: i32,
    pub score: u32,
    pub player: &'a Player,
    pub enemies: &'a [Ship],
    pub mines: &'a [Mine],
    pub player_lasers: &'a [Laser],
    pub enemy_lasers: &'a [Laser],
    pub explosions: &'a [Explosion],
    pub borders: &'a [Border],
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct Engine {
    pub config: GameConfig,
    pub seed: u64,
    rng: Pcg32,
    /// Engine clock in seconds, advanced by `update`
    pub time: f32,
    pub phase: RoundPhase,
    pub level: u32,
    pub lives: i32,
    pub score: u32,
    pub player: Player,
    pub enemies: Vec<Ship>,
    pub mines: Vec<Mine>,
    pub player_lasers: Vec<Laser>,
    pub enemy_lasers: Vec<Laser>,
    pub explosions: Vec<Explosion>,
    pub field: ForceField,
    /// Pending round rebuild, stamped when scheduled
    reset_at: Option<f32>,
    /// One-shot guard so a cleared wave bumps the level exactly once
    level_cleared: bool,
}

impl Engine {
    /// Build an engine with the given config and seed. The run starts in
    /// `Ready`; call `start` to lay out level 1.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let field = ForceField::new(&config.arena);
        let player = Player::new(config.arena.player_spawn);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            phase: RoundPhase::Ready,
            level: 1,
            lives: STARTING_LIVES,
            score: 0,
            player,
            enemies: Vec::new(),
            mines: Vec::new(),
            player_lasers: Vec::new(),
            enemy_lasers: Vec::new(),
            explosions: Vec::new(),
            field,
            reset_at: None,
            level_cleared: false,
        }
    }

    /// Begin a run: level 1, full lives, zero score, fresh layout
    pub fn start(&mut self) {
        self.level = 1;
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.phase = RoundPhase::Running;
        self.reset();
        log::info!("Run started (seed {})", self.seed);
    }

    /// True while the round accepts updates
    pub fn running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Rebuild the arena layout for the current level. Level, lives and
    /// score carry over; every transient entity is replaced.
    pub fn reset(&mut self) {
        self.player = Player::new(self.config.arena.player_spawn);
        self.mines.clear();
        self.player_lasers.clear();
        self.enemy_lasers.clear();
        self.explosions.clear();
        self.spawn_wave();
        self.reset_at = None;
        self.level_cleared = false;
    }

    /// Read-only view for a shell; serializes to JSON for capture
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            level: self.level,
            lives: self.lives,
            score: self.score,
            player: &self.player,
            enemies: &self.enemies,
            mines: &self.mines,
            player_lasers: &self.player_lasers,
            enemy_lasers: &self.enemy_lasers,
            explosions: &self.explosions,
            borders: &self.field.borders,
        }
    }

    /// Advance the simulation one tick
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        if self.phase != RoundPhase::Running {
            return;
        }
        self.time += dt;
        let now = self.time;

        self.update_enemies(dt, now);
        self.update_mines(now);
        self.update_player_lasers(dt, now);
        self.update_enemy_lasers(dt, now);

        for explosion in &mut self.explosions {
            explosion.update(now);
        }

        self.update_player(input, dt, now);
        self.apply_force_field(now);
        self.sweep(now);
        self.check_level_clear(now);
        self.check_deferred(now);
    }

    fn spawn_wave(&mut self) {
        let (droids, commands, deaths) = self.config.levels.counts(self.level);
        let (lo, hi) = (self.config.arena.spawn_min, self.config.arena.spawn_max);
        self.enemies.clear();
        for (class, count) in [
            (ShipClass::Droid, droids),
            (ShipClass::Command, commands),
            (ShipClass::Death, deaths),
        ] {
            for _ in 0..count {
                let pos = Vec2::new(
                    self.rng.random_range(lo.x..hi.x),
                    self.rng.random_range(lo.y..hi.y),
                );
                let ship = Ship::new(class, pos, self.level, self.time, &mut self.rng);
                self.enemies.push(ship);
            }
        }
        log::info!(
            "Level {}: spawned {} droid, {} command, {} death",
            self.level,
            droids,
            commands,
            deaths
        );
    }

    fn update_enemies(&mut self, dt: f32, now: f32) {
        for i in 0..self.enemies.len() {
            // Ramming: both sides pay. Collide is alive-gated, so once
            // the player is down the rest of the wave flies through.
            if self.enemies[i].body.collide(&self.player.body) {
                let (pos, class) = (self.enemies[i].body.pos, self.enemies[i].class);
                self.enemies[i].body.die();
                self.score += class.points();
                self.explosions.push(Explosion::new(pos, now));
                self.player_death(now);
                self.transform(class, now);
                continue;
            }

            self.enemies[i].turn(&self.config.arena);

            if self.enemies[i].can_shoot(now) {
                let target = self.player.body.pos;
                let laser = self.enemies[i].shoot_at(target, now, &mut self.rng);
                self.enemy_lasers.push(laser);
            }
            if self.enemies[i].can_drop(now) {
                let mine = self.enemies[i].drop_mine(now, &mut self.rng);
                self.mines.push(mine);
            }

            self.enemies[i].update(dt);
        }
    }

    fn update_mines(&mut self, now: f32) {
        for i in 0..self.mines.len() {
            if self.mines[i].body.collide(&self.player.body) {
                let (pos, points) = (self.mines[i].body.pos, self.mines[i].kind.points());
                self.mines[i].body.die();
                self.score += points;
                self.explosions.push(Explosion::new(pos, now));
                self.player_death(now);
            }
        }
    }

    fn update_player_lasers(&mut self, dt: f32, now: f32) {
        for li in 0..self.player_lasers.len() {
            // Each bolt spends itself on the first thing it hits
            let mut hit = false;
            for ei in 0..self.enemies.len() {
                if self.enemies[ei].body.collide(&self.player_lasers[li].body) {
                    let (pos, class) = (self.enemies[ei].body.pos, self.enemies[ei].class);
                    self.enemies[ei].body.die();
                    self.player_lasers[li].body.die();
                    self.score += class.points();
                    self.explosions.push(Explosion::new(pos, now));
                    self.transform(class, now);
                    hit = true;
                    break;
                }
            }
            if !hit {
                for mi in 0..self.mines.len() {
                    if self.mines[mi].body.collide(&self.player_lasers[li].body) {
                        let (pos, points) = (self.mines[mi].body.pos, self.mines[mi].kind.points());
                        self.mines[mi].body.die();
                        self.player_lasers[li].body.die();
                        self.score += points;
                        self.explosions.push(Explosion::new(pos, now));
                        break;
                    }
                }
            }
            self.player_lasers[li].update(dt);
        }
    }

    fn update_enemy_lasers(&mut self, dt: f32, now: f32) {
        for i in 0..self.enemy_lasers.len() {
            if self.enemy_lasers[i].body.collide(&self.player.body) {
                self.enemy_lasers[i].body.die();
                self.player_death(now);
            }
            self.enemy_lasers[i].update(dt);
        }
    }

    fn update_player(&mut self, input: &TickInput, dt: f32, now: f32) {
        self.player.rotating = input.rotate;
        if input.thrust {
            self.player.thrust(now);
        }
        if input.shoot {
            if let Some(laser) = self.player.shoot(now) {
                self.player_lasers.push(laser);
            }
        }
        self.player.update(dt);
    }

    fn apply_force_field(&mut self, now: f32) {
        self.field.bounce_player(&mut self.player, now);
        for ship in &mut self.enemies {
            self.field.bounce_ship(ship, now);
        }
        for laser in &mut self.player_lasers {
            self.field.crash_laser(laser, now);
        }
        for laser in &mut self.enemy_lasers {
            self.field.crash_laser(laser, now);
        }
    }

    fn sweep(&mut self, now: f32) {
        self.enemies.retain(|s| s.body.alive);
        self.mines.retain(|m| m.body.alive);
        self.player_lasers.retain(|l| l.body.alive);
        self.enemy_lasers.retain(|l| l.body.alive);
        self.explosions.retain(|e| !e.done(now));
    }

    fn check_level_clear(&mut self, now: f32) {
        if self.enemies.is_empty() && !self.level_cleared {
            self.level_cleared = true;
            self.level += 1;
            self.reset_at = Some(now + RESET_DELAY);
            log::info!("Level cleared, advancing to {}", self.level);
        }
    }

    fn check_deferred(&mut self, now: f32) {
        if self.reset_at.is_some_and(|at| now >= at) && self.lives >= 0 {
            self.reset();
        }
        if self.lives < 0 && !self.player.body.alive {
            self.phase = RoundPhase::Over;
            self.reset_at = None;
            log::info!("Game over: score {} at level {}", self.score, self.level);
        }
    }

    /// One life lost. Guarded by the alive flag, so stacked collisions
    /// in a single tick only charge one life.
    fn player_death(&mut self, now: f32) {
        if !self.player.body.alive {
            return;
        }
        self.player.body.die();
        self.lives -= 1;
        self.explosions.push(Explosion::new(self.player.body.pos, now));
        if self.lives >= 0 {
            self.reset_at = Some(now + RESET_DELAY);
            log::info!("Player down, {} lives left", self.lives);
        } else {
            log::info!("Player down, out of lives");
        }
    }

    /// Tier promotion on death: a dead Command promotes the first
    /// surviving Droid into a Command; a dead Death promotes the first
    /// surviving Command. The swap reuses the survivor's slot and
    /// position, so the collection size never changes here.
    fn transform(&mut self, died: ShipClass, now: f32) {
        let Some(source) = died.promotion_source() else {
            return;
        };
        let Some(i) = self
            .enemies
            .iter()
            .position(|s| s.body.alive && s.class == source)
        else {
            return;
        };
        let pos = self.enemies[i].body.pos;
        log::debug!("{:?} down, promoting {:?} in place", died, source);
        self.enemies[i] = Ship::new(died, pos, self.level, now, &mut self.rng);
    }
}
