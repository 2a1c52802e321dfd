//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each collection)
//! - No rendering or platform dependencies

pub mod body;
pub mod engine;
pub mod entities;
pub mod field;

pub use body::Body;
pub use engine::{Engine, RoundPhase, Snapshot, TickInput};
pub use entities::{Explosion, Laser, Mine, MineKind, Player, Rotating, Ship, ShipClass};
pub use field::{Border, ForceField};
