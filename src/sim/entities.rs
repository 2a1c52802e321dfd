//! Arena actors: player ship, enemy ships, mines, lasers, explosions
//!
//! Cooldowns are stamps compared against the engine clock each tick, and
//! every random cooldown is redrawn from its range when spent. Nothing
//! here moves itself between ticks; the engine drives all updates.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::config::ArenaConfig;
use crate::consts::*;

/// Player steering intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotating {
    #[default]
    None,
    Left,
    Right,
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Steering intent applied during `update`
    pub rotating: Rotating,
    /// Clock stamp of the last thrust or wall bounce
    pub last_thrust: f32,
    /// Clock stamp of the last shot
    pub last_shoot: f32,
}

impl Player {
    /// Fresh player at the spawn pose, facing up, able to act at once
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::splat(PLAYER_SIZE), Vec2::NEG_Y, 0.0),
            rotating: Rotating::None,
            // Stamps start in the past so the first thrust/shot is free
            last_thrust: -THRUST_DEBOUNCE,
            last_shoot: -PLAYER_SHOOT_COOLDOWN,
        }
    }

    /// Move, then turn the facing by the steering intent
    pub fn update(&mut self, dt: f32) {
        if !self.body.alive {
            return;
        }
        self.body.advance(dt);
        self.rotate(dt);
    }

    fn rotate(&mut self, dt: f32) {
        let step = match self.rotating {
            Rotating::None => return,
            Rotating::Left => -PLAYER_ROTATE_RATE * dt,
            Rotating::Right => PLAYER_ROTATE_RATE * dt,
        };
        let facing = Vec2::from_angle(step).rotate(self.body.rotation);
        self.body.set_rotation(facing);
    }

    pub fn can_thrust(&self, now: f32) -> bool {
        self.body.alive && now - self.last_thrust >= THRUST_DEBOUNCE
    }

    /// Kick the ship along its facing. Debounced; a recent wall bounce
    /// holds the engine off as well.
    pub fn thrust(&mut self, now: f32) {
        if !self.can_thrust(now) {
            return;
        }
        self.body.set_direction(self.body.rotation);
        self.body.speed = PLAYER_THRUST_SPEED;
        self.last_thrust = now;
    }

    pub fn can_shoot(&self, now: f32) -> bool {
        self.body.alive && now - self.last_shoot >= PLAYER_SHOOT_COOLDOWN
    }

    /// Fire a laser along the facing. None while on cooldown.
    pub fn shoot(&mut self, now: f32) -> Option<Laser> {
        if !self.can_shoot(now) {
            return None;
        }
        self.last_shoot = now;
        Some(Laser::new(self.body.pos, self.body.rotation))
    }

    /// Wall-bounce side effect: bleed speed and hold the thruster
    pub fn on_bounce(&mut self, now: f32) {
        self.body.speed *= BOUNCE_RETAIN;
        self.last_thrust = now;
    }
}

/// Enemy tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipClass {
    Droid,
    Command,
    Death,
}

impl ShipClass {
    /// Base speed before the sqrt(level) scale
    pub fn base_speed(self) -> f32 {
        match self {
            ShipClass::Droid => DROID_SPEED,
            ShipClass::Command => COMMAND_SPEED,
            ShipClass::Death => DEATH_SPEED,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            ShipClass::Droid => DROID_POINTS,
            ShipClass::Command => COMMAND_POINTS,
            ShipClass::Death => DEATH_POINTS,
        }
    }

    /// Which lower tier gets promoted into this one when a ship of this
    /// class dies. Droids promote nothing.
    pub fn promotion_source(self) -> Option<ShipClass> {
        match self {
            ShipClass::Droid => None,
            ShipClass::Command => Some(ShipClass::Droid),
            ShipClass::Death => Some(ShipClass::Command),
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    pub class: ShipClass,
    /// How far past the panel fence this ship strays before turning
    pub patrol_distance: f32,
    /// Stamp and current draw for the aimed shot (Command only)
    pub last_shoot: f32,
    pub shoot_cooldown: f32,
    /// Stamp and current draw for mine drops (Command and Death)
    pub last_drop: f32,
    pub drop_cooldown: f32,
}

impl Ship {
    /// Spawn a ship of `class` at `pos`, speed scaled by sqrt(level).
    /// Patrol ships start flying right; Death ships pick any heading.
    pub fn new(class: ShipClass, pos: Vec2, level: u32, now: f32, rng: &mut Pcg32) -> Self {
        let heading = match class {
            ShipClass::Droid | ShipClass::Command => Vec2::X,
            ShipClass::Death => Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU)),
        };
        let speed = class.base_speed() * (level.max(1) as f32).sqrt();
        Self {
            body: Body::new(pos, Vec2::splat(SHIP_SIZE), heading, speed),
            class,
            patrol_distance: rng.random_range(PATROL_DISTANCE_MIN..PATROL_DISTANCE_MAX),
            last_shoot: now,
            shoot_cooldown: rng.random_range(COMMAND_SHOOT_MIN..COMMAND_SHOOT_MAX),
            last_drop: now,
            drop_cooldown: rng.random_range(MINE_DROP_MIN..MINE_DROP_MAX),
        }
    }

    /// Advance, then wobble the facing
    pub fn update(&mut self, dt: f32) {
        if !self.body.alive {
            return;
        }
        self.body.advance(dt);
        let facing = Vec2::from_angle(SHIP_WOBBLE_RATE * dt).rotate(self.body.rotation);
        self.body.set_rotation(facing);
    }

    /// Clockwise patrol around the central panel: once the ship strays
    /// `patrol_distance` past a panel fence line while still heading
    /// away, snap the heading to the next leg. Death ships skip this.
    pub fn turn(&mut self, arena: &ArenaConfig) {
        if self.class == ShipClass::Death {
            return;
        }
        let c = arena.center();
        let half_w = arena.panel_width / 2.0;
        let half_h = arena.panel_height / 2.0;
        let d = self.patrol_distance;
        let pos = self.body.pos;
        let dir = self.body.direction;

        if pos.x > c.x + half_w + d && dir.x > 0.0 {
            self.body.set_direction(Vec2::Y);
        } else if pos.y > c.y + half_h + d && dir.y > 0.0 {
            self.body.set_direction(Vec2::NEG_X);
        } else if pos.x < c.x - half_w - d && dir.x < 0.0 {
            self.body.set_direction(Vec2::NEG_Y);
        } else if pos.y < c.y - half_h - d && dir.y < 0.0 {
            self.body.set_direction(Vec2::X);
        }
    }

    pub fn can_shoot(&self, now: f32) -> bool {
        self.body.alive
            && self.class == ShipClass::Command
            && now - self.last_shoot >= self.shoot_cooldown
    }

    /// Aimed shot at `target`; redraws the cooldown. A target on top of
    /// the ship aims the bolt along +x.
    pub fn shoot_at(&mut self, target: Vec2, now: f32, rng: &mut Pcg32) -> Laser {
        self.last_shoot = now;
        self.shoot_cooldown = rng.random_range(COMMAND_SHOOT_MIN..COMMAND_SHOOT_MAX);
        let aim = (target - self.body.pos).try_normalize().unwrap_or(Vec2::X);
        Laser::new(self.body.pos, aim)
    }

    pub fn can_drop(&self, now: f32) -> bool {
        self.body.alive
            && matches!(self.class, ShipClass::Command | ShipClass::Death)
            && now - self.last_drop >= self.drop_cooldown
    }

    /// Lay a mine at the current position; redraws the cooldown.
    /// Command ships lay Photon mines, Death ships lay either kind.
    pub fn drop_mine(&mut self, now: f32, rng: &mut Pcg32) -> Mine {
        self.last_drop = now;
        self.drop_cooldown = rng.random_range(MINE_DROP_MIN..MINE_DROP_MAX);
        let kind = match self.class {
            ShipClass::Death if rng.random_bool(0.5) => MineKind::Vapor,
            _ => MineKind::Photon,
        };
        Mine::new(kind, self.body.pos)
    }
}

/// Mine kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineKind {
    Photon,
    Vapor,
}

impl MineKind {
    pub fn points(self) -> u32 {
        match self {
            MineKind::Photon => PHOTON_POINTS,
            MineKind::Vapor => VAPOR_POINTS,
        }
    }

    fn size(self) -> f32 {
        match self {
            MineKind::Photon => PHOTON_SIZE,
            MineKind::Vapor => VAPOR_SIZE,
        }
    }
}

/// A stationary mine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mine {
    pub body: Body,
    pub kind: MineKind,
}

impl Mine {
    pub fn new(kind: MineKind, pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(kind.size()), Vec2::X, 0.0),
            kind,
        }
    }
}

/// A laser bolt. The beam is `LASER_LENGTH` long along its heading and
/// `LASER_WIDTH` wide, so the collision box is oriented at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub body: Body,
}

impl Laser {
    pub fn new(pos: Vec2, heading: Vec2) -> Self {
        let heading = heading.try_normalize().unwrap_or(Vec2::X);
        let size = Vec2::new(
            heading.x.abs() * LASER_LENGTH + heading.y.abs() * LASER_WIDTH,
            heading.y.abs() * LASER_LENGTH + heading.x.abs() * LASER_WIDTH,
        );
        Self {
            body: Body::new(pos, size, heading, LASER_SPEED),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.advance(dt);
    }
}

/// Explosion animation: frames advance on a fixed cadence and the last
/// one is held for one more interval before the engine sweeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub step: u8,
    pub last_step: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, now: f32) -> Self {
        Self {
            pos,
            step: 1,
            last_step: now,
        }
    }

    /// Advance the frame once its hold time has elapsed
    pub fn update(&mut self, now: f32) {
        if self.step < EXPLOSION_STEPS && now - self.last_step >= EXPLOSION_STEP_TIME {
            self.step += 1;
            self.last_step = now;
        }
    }

    pub fn done(&self, now: f32) -> bool {
        self.step >= EXPLOSION_STEPS && now - self.last_step >= EXPLOSION_STEP_TIME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_player_spawns_facing_up() {
        let player = Player::new(Vec2::new(500.0, 200.0));
        assert_eq!(player.body.rotation, Vec2::NEG_Y);
        assert_eq!(player.body.speed, 0.0);
        assert!(player.can_thrust(0.0));
        assert!(player.can_shoot(0.0));
    }

    #[test]
    fn test_player_rotate_signs() {
        let mut player = Player::new(Vec2::ZERO);
        let start = player.body.rotation.to_angle();

        player.rotating = Rotating::Right;
        player.update(0.1);
        assert!(player.body.rotation.to_angle() > start);

        let mut player = Player::new(Vec2::ZERO);
        player.rotating = Rotating::Left;
        player.update(0.1);
        assert!(player.body.rotation.to_angle() < start);
    }

    #[test]
    fn test_player_rotate_rate() {
        let mut player = Player::new(Vec2::ZERO);
        player.rotating = Rotating::Right;
        player.update(0.25);
        let turned = player.body.rotation.to_angle() - (-std::f32::consts::FRAC_PI_2);
        assert!((turned - PLAYER_ROTATE_RATE * 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_thrust_sets_heading_and_speed() {
        let mut player = Player::new(Vec2::ZERO);
        player.thrust(0.0);
        assert_eq!(player.body.direction, player.body.rotation);
        assert_eq!(player.body.speed, PLAYER_THRUST_SPEED);
    }

    #[test]
    fn test_thrust_debounce() {
        let mut player = Player::new(Vec2::ZERO);
        player.thrust(0.0);
        player.body.speed = 50.0;

        // Too soon: ignored
        player.thrust(0.1);
        assert_eq!(player.body.speed, 50.0);

        player.thrust(0.31);
        assert_eq!(player.body.speed, PLAYER_THRUST_SPEED);
    }

    #[test]
    fn test_bounce_holds_thruster() {
        let mut player = Player::new(Vec2::ZERO);
        player.body.speed = 200.0;
        player.on_bounce(5.0);
        assert_eq!(player.body.speed, 150.0);
        assert!(!player.can_thrust(5.1));
        assert!(player.can_thrust(5.31));
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let laser = player.shoot(0.0).unwrap();
        assert_eq!(laser.body.pos, Vec2::new(100.0, 100.0));
        assert_eq!(laser.body.direction, player.body.rotation);

        assert!(player.shoot(0.2).is_none());
        assert!(player.shoot(0.4).is_some());
    }

    #[test]
    fn test_ship_speeds_scale_with_level() {
        let mut rng = rng();
        let pos = Vec2::new(400.0, 600.0);
        let s1 = Ship::new(ShipClass::Command, pos, 1, 0.0, &mut rng);
        let s4 = Ship::new(ShipClass::Command, pos, 4, 0.0, &mut rng);
        assert_eq!(s1.body.speed, COMMAND_SPEED);
        assert_eq!(s4.body.speed, COMMAND_SPEED * 2.0);
    }

    #[test]
    fn test_patrol_turn_quadrants() {
        let arena = ArenaConfig::default();
        let mut rng = rng();

        // Right of the panel margin heading right: swing down
        let mut ship = Ship::new(ShipClass::Droid, Vec2::new(810.0, 400.0), 1, 0.0, &mut rng);
        ship.patrol_distance = 100.0;
        ship.turn(&arena);
        assert_eq!(ship.body.direction, Vec2::Y);

        // Below the panel margin heading down: swing left
        ship.body.pos = Vec2::new(500.0, 620.0);
        ship.turn(&arena);
        assert_eq!(ship.body.direction, Vec2::NEG_X);

        // Left of the panel margin heading left: swing up
        ship.body.pos = Vec2::new(190.0, 400.0);
        ship.turn(&arena);
        assert_eq!(ship.body.direction, Vec2::NEG_Y);

        // Above the panel margin heading up: swing right
        ship.body.pos = Vec2::new(500.0, 180.0);
        ship.turn(&arena);
        assert_eq!(ship.body.direction, Vec2::X);
    }

    #[test]
    fn test_patrol_turn_only_when_heading_away() {
        let arena = ArenaConfig::default();
        let mut rng = rng();
        let mut ship = Ship::new(ShipClass::Droid, Vec2::new(810.0, 400.0), 1, 0.0, &mut rng);
        ship.patrol_distance = 100.0;
        ship.body.set_direction(Vec2::NEG_X);
        ship.turn(&arena);
        assert_eq!(ship.body.direction, Vec2::NEG_X);
    }

    #[test]
    fn test_patrol_turn_inside_ring_holds_course() {
        let arena = ArenaConfig::default();
        let mut rng = rng();
        let mut ship = Ship::new(ShipClass::Droid, Vec2::new(750.0, 400.0), 1, 0.0, &mut rng);
        ship.patrol_distance = 100.0;
        ship.turn(&arena);
        assert_eq!(ship.body.direction, Vec2::X);
    }

    #[test]
    fn test_death_ship_ignores_patrol() {
        let arena = ArenaConfig::default();
        let mut rng = rng();
        let mut ship = Ship::new(ShipClass::Death, Vec2::new(810.0, 400.0), 1, 0.0, &mut rng);
        let heading = ship.body.direction;
        ship.turn(&arena);
        assert_eq!(ship.body.direction, heading);
    }

    #[test]
    fn test_only_command_ships_shoot() {
        let mut rng = rng();
        let pos = Vec2::new(400.0, 600.0);
        let droid = Ship::new(ShipClass::Droid, pos, 1, 0.0, &mut rng);
        let command = Ship::new(ShipClass::Command, pos, 1, 0.0, &mut rng);
        let death = Ship::new(ShipClass::Death, pos, 1, 0.0, &mut rng);

        // Cooldowns draw below 8 s, so 8 s out everyone eligible is ready
        assert!(!droid.can_shoot(8.0));
        assert!(command.can_shoot(8.0));
        assert!(!death.can_shoot(8.0));
        assert!(!command.can_shoot(0.0));
    }

    #[test]
    fn test_command_shot_aims_at_target() {
        let mut rng = rng();
        let mut ship = Ship::new(ShipClass::Command, Vec2::new(100.0, 100.0), 1, 0.0, &mut rng);
        let laser = ship.shoot_at(Vec2::new(200.0, 100.0), 8.0, &mut rng);
        assert_eq!(laser.body.direction, Vec2::X);
        assert_eq!(laser.body.pos, Vec2::new(100.0, 100.0));
        assert_eq!(ship.last_shoot, 8.0);
        assert!(ship.shoot_cooldown >= COMMAND_SHOOT_MIN && ship.shoot_cooldown < COMMAND_SHOOT_MAX);
    }

    #[test]
    fn test_degenerate_aim_falls_back() {
        let mut rng = rng();
        let mut ship = Ship::new(ShipClass::Command, Vec2::new(100.0, 100.0), 1, 0.0, &mut rng);
        let laser = ship.shoot_at(Vec2::new(100.0, 100.0), 8.0, &mut rng);
        assert_eq!(laser.body.direction, Vec2::X);
    }

    #[test]
    fn test_mine_drops_by_class() {
        let mut rng = rng();
        let pos = Vec2::new(400.0, 600.0);

        let droid = Ship::new(ShipClass::Droid, pos, 1, 0.0, &mut rng);
        assert!(!droid.can_drop(30.0));

        let mut command = Ship::new(ShipClass::Command, pos, 1, 0.0, &mut rng);
        assert!(!command.can_drop(0.0));
        assert!(command.can_drop(20.0));
        let mine = command.drop_mine(20.0, &mut rng);
        assert_eq!(mine.kind, MineKind::Photon);
        assert_eq!(mine.body.pos, pos);

        let mut death = Ship::new(ShipClass::Death, pos, 1, 0.0, &mut rng);
        for _ in 0..20 {
            let mine = death.drop_mine(20.0, &mut rng);
            assert!(matches!(mine.kind, MineKind::Photon | MineKind::Vapor));
        }
    }

    #[test]
    fn test_cooldown_draws_stay_in_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let ship = Ship::new(ShipClass::Command, Vec2::ZERO, 1, 0.0, &mut rng);
            assert!(ship.patrol_distance >= PATROL_DISTANCE_MIN);
            assert!(ship.patrol_distance < PATROL_DISTANCE_MAX);
            assert!(ship.shoot_cooldown >= COMMAND_SHOOT_MIN);
            assert!(ship.shoot_cooldown < COMMAND_SHOOT_MAX);
            assert!(ship.drop_cooldown >= MINE_DROP_MIN);
            assert!(ship.drop_cooldown < MINE_DROP_MAX);
        }
    }

    #[test]
    fn test_death_ship_heading_is_unit() {
        let mut rng = rng();
        for _ in 0..20 {
            let ship = Ship::new(ShipClass::Death, Vec2::ZERO, 1, 0.0, &mut rng);
            assert!((ship.body.direction.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_laser_box_orientation() {
        let horizontal = Laser::new(Vec2::ZERO, Vec2::X);
        assert!((horizontal.body.half.x - LASER_LENGTH / 2.0).abs() < 1e-4);
        assert!((horizontal.body.half.y - LASER_WIDTH / 2.0).abs() < 1e-4);

        let vertical = Laser::new(Vec2::ZERO, Vec2::NEG_Y);
        assert!((vertical.body.half.x - LASER_WIDTH / 2.0).abs() < 1e-4);
        assert!((vertical.body.half.y - LASER_LENGTH / 2.0).abs() < 1e-4);

        let diagonal = Laser::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert!((diagonal.body.half.x - diagonal.body.half.y).abs() < 1e-4);
    }

    #[test]
    fn test_mine_points() {
        assert_eq!(MineKind::Photon.points(), 350);
        assert_eq!(MineKind::Vapor.points(), 500);
        assert_eq!(ShipClass::Droid.points(), 1000);
        assert_eq!(ShipClass::Command.points(), 1500);
        assert_eq!(ShipClass::Death.points(), 2000);
    }

    #[test]
    fn test_explosion_cadence() {
        let mut explosion = Explosion::new(Vec2::ZERO, 0.0);
        assert_eq!(explosion.step, 1);

        explosion.update(0.05);
        assert_eq!(explosion.step, 1);

        let mut now = 0.0;
        while explosion.step < EXPLOSION_STEPS {
            now += EXPLOSION_STEP_TIME;
            explosion.update(now);
        }
        assert_eq!(explosion.step, EXPLOSION_STEPS);
        assert!(!explosion.done(now + 0.05));
        assert!(explosion.done(now + EXPLOSION_STEP_TIME));
    }
}
