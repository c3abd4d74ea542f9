//! Read-only view handed to the renderer
//!
//! Borrowing the state immutably means a snapshot can only exist between
//! ticks, never while the simulation is mutating.

use glam::Vec2;

use super::starfield::Starfield;
use super::state::{GamePhase, GameState, Meteor, Player, Star};

#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    /// Logical canvas size
    pub canvas: Vec2,
    pub player: &'a Player,
    pub meteors: &'a [Meteor],
    pub stars: &'a [Star],
    pub starfield: &'a Starfield,
}

impl<'a> RenderSnapshot<'a> {
    pub fn new(state: &'a GameState, best_score: u64) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            best_score,
            canvas: Vec2::new(state.tuning.canvas_width, state.tuning.canvas_height),
            player: &state.player,
            meteors: &state.meteors,
            stars: &state.stars,
            starfield: &state.starfield,
        }
    }

    /// Ship, meteors and stars are drawn once a session has begun
    pub fn shows_entities(&self) -> bool {
        self.phase != GamePhase::Idle
    }
}
