//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed-time deltas supplied by the caller, no wall clock
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod starfield;
pub mod state;
pub mod tick;

pub use collision::{meteor_hit_threshold, meteor_hits_player, player_collects_star};
pub use snapshot::RenderSnapshot;
pub use starfield::{Starfield, TwinkleStar};
pub use state::{GameEvent, GamePhase, GameState, Meteor, Player, SpawnTimers, Star};
pub use tick::{TickInput, tick};
