//! Meteor Dodge - A single-screen falling-meteor arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `engine`: Owns the session and wires it to audio/persistence collaborators
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform helpers (frame clock, input mapping)
//! - `audio`: Sound effect and ambient loop collaborators
//! - `persistence`: Best score storage
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod engine;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, InputAction, SessionResult};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Logical display surface
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Largest simulated step per frame (absorbs hitches and tab switches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Gap between the ship and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    /// Units per second
    pub const PLAYER_SPEED: f32 = 200.0;

    /// Meteor defaults
    pub const METEOR_MIN_SIZE: f32 = 15.0;
    pub const METEOR_MAX_SIZE: f32 = 35.0;
    pub const METEOR_MIN_SPEED: f32 = 100.0;
    pub const METEOR_MAX_SPEED: f32 = 300.0;
    /// Speed gained per second, uncapped
    pub const METEOR_ACCELERATION: f32 = 20.0;
    /// Rotation speed range is [-MAX, MAX] rad/s
    pub const METEOR_MAX_ROTATION_SPEED: f32 = 3.0;
    /// Orange/red hue band (degrees)
    pub const METEOR_MIN_HUE: f32 = 10.0;
    pub const METEOR_MAX_HUE: f32 = 70.0;
    /// Hitbox shrink relative to the visual radii
    pub const METEOR_HIT_SCALE: f32 = 0.8;

    /// Meteors per second at session start
    pub const METEOR_SPAWN_RATE: f32 = 1.0;
    /// Extra meteors per second gained per second of play
    pub const METEOR_SPAWN_RATE_GROWTH: f32 = 0.1;
    /// Spawn interval never drops below this (seconds)
    pub const MIN_METEOR_SPAWN_INTERVAL: f32 = 0.05;

    /// Collectible star defaults
    pub const STAR_SIZE: f32 = 12.0;
    pub const STAR_SPEED: f32 = 150.0;
    pub const STAR_ROTATION_SPEED: f32 = 3.0;
    /// Star spawn attempts per second
    pub const STAR_SPAWN_RATE: f32 = 0.3;
    /// Probability that a spawn attempt produces a star
    pub const STAR_SPAWN_CHANCE: f64 = 0.7;
    pub const STAR_BONUS: u64 = 10;

    /// Score accrual
    pub const SCORE_PER_SECOND: u64 = 1;
    pub const SCORE_INTERVAL: f32 = 1.0;

    /// Decorative background stars
    pub const STARFIELD_COUNT: usize = 100;
}
