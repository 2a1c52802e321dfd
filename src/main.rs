//! Omega Race headless demo
//!
//! Drives the engine with a small autopilot at the fixed timestep and
//! prints a run summary. Usage: `omega-race [seed] [seconds]`.

use std::path::Path;

use omega_race::consts::SIM_DT;
use omega_race::normalize_angle;
use omega_race::sim::{Engine, Rotating, TickInput};
use omega_race::{GameConfig, ScoreBoard};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let config = GameConfig::load(Path::new("config.json"));
    let mut engine = Engine::new(config, seed);
    engine.start();
    log::info!("Autopilot run: seed {}, {} seconds", seed, seconds);

    let mut last_level = engine.level;
    while engine.running() && engine.time < seconds {
        let input = pilot(&engine);
        engine.update(&input, SIM_DT);

        if engine.level != last_level {
            println!(
                "Level {} at {:>6.1}s  score {}",
                engine.level, engine.time, engine.score
            );
            last_level = engine.level;
        }
    }

    println!(
        "Run over at {:.1}s: score {}, level {}, lives {}",
        engine.time, engine.score, engine.level, engine.lives
    );

    let score_path = Path::new("scores.json");
    let mut board = ScoreBoard::load(score_path);
    if let Some(rank) = board.add("BOT", engine.score, engine.level) {
        println!("High score! Rank {}", rank);
        board.save(score_path);
    }
}

/// Chase-and-shoot autopilot: face the nearest enemy, thrust when slow,
/// fire when roughly lined up.
fn pilot(engine: &Engine) -> TickInput {
    let player = &engine.player;
    if !player.body.alive {
        return TickInput::default();
    }
    let Some(target) = engine.enemies.iter().min_by(|a, b| {
        let da = a.body.pos.distance_squared(player.body.pos);
        let db = b.body.pos.distance_squared(player.body.pos);
        da.total_cmp(&db)
    }) else {
        return TickInput::default();
    };

    let want = (target.body.pos - player.body.pos).to_angle();
    let delta = normalize_angle(want - player.body.rotation.to_angle());

    TickInput {
        rotate: if delta.abs() < 0.05 {
            Rotating::None
        } else if delta < 0.0 {
            Rotating::Left
        } else {
            Rotating::Right
        },
        thrust: player.body.speed < 40.0 && player.can_thrust(engine.time),
        shoot: delta.abs() < 0.2 && player.can_shoot(engine.time),
    }
}
