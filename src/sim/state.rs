//! Game state and core simulation types
//!
//! All mutable session state lives in [`GameState`]; the host owns exactly
//! one instance and threads it through the frame callback.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::starfield::Starfield;
use crate::tuning::Tuning;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game, only the background is animating
    Idle,
    /// Active gameplay
    Playing,
    /// Session ended by a fatal collision
    Ended,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Units per second
    pub speed: f32,
}

impl Player {
    /// Ship centered horizontally at its fixed height
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_max_x() / 2.0, tuning.player_y()),
            width: tuning.player_width,
            height: tuning.player_height,
            speed: tuning.player_speed,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Collision radius (circle approximation of the hull)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }

    /// Apply held directions for `dt` seconds and clamp to `[0, max_x]`
    pub fn steer(&mut self, left: bool, right: bool, dt: f32, max_x: f32) {
        if left {
            self.pos.x -= self.speed * dt;
        }
        if right {
            self.pos.x += self.speed * dt;
        }
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A falling meteor
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    /// Edge length, fixed at spawn
    pub size: f32,
    /// Fall speed, grows every tick
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// HSL hue in degrees (render color tag)
    pub hue: f32,
}

impl Meteor {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn advance(&mut self, dt: f32, acceleration: f32) {
        self.pos.y += self.speed * dt;
        self.rotation += self.rotation_speed * dt;
        self.speed += acceleration * dt;
    }

    /// Fully past the bottom edge
    #[inline]
    pub fn is_gone(&self, canvas_height: f32) -> bool {
        self.pos.y > canvas_height + self.size
    }
}

/// A collectible star
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Star {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
        self.rotation += self.rotation_speed * dt;
    }

    #[inline]
    pub fn is_gone(&self, canvas_height: f32) -> bool {
        self.pos.y > canvas_height + self.size
    }
}

/// Accumulators compared against their thresholds each tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimers {
    pub meteor: f32,
    pub star: f32,
    pub score: f32,
}

/// Things that happened during a tick, drained by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A star was collected (one event per star)
    StarCollected { bonus: u64 },
    /// A meteor hit the player; the session is over
    SessionEnded { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance numbers, fixed for the lifetime of the state
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Seconds of play this session
    pub elapsed: f32,
    pub timers: SpawnTimers,
    pub player: Player,
    pub meteors: Vec<Meteor>,
    pub stars: Vec<Star>,
    /// Decorative background (not gameplay-affecting)
    pub starfield: Starfield,
    /// Seeded RNG for spawn draws
    pub rng: Pcg32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle state with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning");
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::generate(&mut rng, &tuning);
        Self {
            player: Player::new(&tuning),
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            elapsed: 0.0,
            timers: SpawnTimers::default(),
            meteors: Vec::new(),
            stars: Vec::new(),
            starfield,
            rng,
            events: Vec::new(),
        }
    }

    /// Begin a fresh session: zero score/time/timers, clear entities,
    /// recenter the ship and enter `Playing`.
    pub fn reset(&mut self) {
        self.score = 0;
        self.elapsed = 0.0;
        self.timers = SpawnTimers::default();
        self.meteors.clear();
        self.stars.clear();
        self.events.clear();
        self.player = Player::new(&self.tuning);
        self.phase = GamePhase::Playing;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
