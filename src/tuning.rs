//! Data-driven game balance
//!
//! Every gameplay number lives here so the simulation never hardcodes
//! canvas size, speeds or rates. Defaults come from [`crate::consts`];
//! a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("canvas must be positive, got {width}x{height}")]
    Canvas { width: f32, height: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} ({value}) does not fit inside the canvas width {canvas_width}")]
    TooWide {
        name: &'static str,
        value: f32,
        canvas_width: f32,
    },
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub max_frame_dt: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    pub player_speed: f32,

    pub meteor_min_size: f32,
    pub meteor_max_size: f32,
    pub meteor_min_speed: f32,
    pub meteor_max_speed: f32,
    pub meteor_acceleration: f32,
    pub meteor_max_rotation_speed: f32,
    pub meteor_min_hue: f32,
    pub meteor_max_hue: f32,
    pub meteor_hit_scale: f32,
    pub meteor_spawn_rate: f32,
    pub meteor_spawn_rate_growth: f32,
    pub min_meteor_spawn_interval: f32,

    pub star_size: f32,
    pub star_speed: f32,
    pub star_rotation_speed: f32,
    pub star_spawn_rate: f32,
    pub star_spawn_chance: f64,
    pub star_bonus: u64,

    pub score_per_second: u64,
    pub score_interval: f32,

    pub starfield_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            max_frame_dt: MAX_FRAME_DT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_speed: PLAYER_SPEED,

            meteor_min_size: METEOR_MIN_SIZE,
            meteor_max_size: METEOR_MAX_SIZE,
            meteor_min_speed: METEOR_MIN_SPEED,
            meteor_max_speed: METEOR_MAX_SPEED,
            meteor_acceleration: METEOR_ACCELERATION,
            meteor_max_rotation_speed: METEOR_MAX_ROTATION_SPEED,
            meteor_min_hue: METEOR_MIN_HUE,
            meteor_max_hue: METEOR_MAX_HUE,
            meteor_hit_scale: METEOR_HIT_SCALE,
            meteor_spawn_rate: METEOR_SPAWN_RATE,
            meteor_spawn_rate_growth: METEOR_SPAWN_RATE_GROWTH,
            min_meteor_spawn_interval: MIN_METEOR_SPAWN_INTERVAL,

            star_size: STAR_SIZE,
            star_speed: STAR_SPEED,
            star_rotation_speed: STAR_ROTATION_SPEED,
            star_spawn_rate: STAR_SPAWN_RATE,
            star_spawn_chance: STAR_SPAWN_CHANCE,
            star_bonus: STAR_BONUS,

            score_per_second: SCORE_PER_SECOND,
            score_interval: SCORE_INTERVAL,

            starfield_count: STARFIELD_COUNT,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the numbers describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        // Ordering checks below are all false for NaN and infinities
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("max_frame_dt", self.max_frame_dt),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_bottom_margin", self.player_bottom_margin),
            ("player_speed", self.player_speed),
            ("meteor_min_size", self.meteor_min_size),
            ("meteor_max_size", self.meteor_max_size),
            ("meteor_min_speed", self.meteor_min_speed),
            ("meteor_max_speed", self.meteor_max_speed),
            ("meteor_acceleration", self.meteor_acceleration),
            ("meteor_max_rotation_speed", self.meteor_max_rotation_speed),
            ("meteor_min_hue", self.meteor_min_hue),
            ("meteor_max_hue", self.meteor_max_hue),
            ("meteor_hit_scale", self.meteor_hit_scale),
            ("meteor_spawn_rate", self.meteor_spawn_rate),
            ("meteor_spawn_rate_growth", self.meteor_spawn_rate_growth),
            ("min_meteor_spawn_interval", self.min_meteor_spawn_interval),
            ("star_size", self.star_size),
            ("star_speed", self.star_speed),
            ("star_rotation_speed", self.star_rotation_speed),
            ("star_spawn_rate", self.star_spawn_rate),
            ("score_interval", self.score_interval),
        ] {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { name, value });
            }
        }

        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(TuningError::Canvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }

        for (name, value) in [
            ("max_frame_dt", self.max_frame_dt),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("meteor_min_size", self.meteor_min_size),
            ("meteor_min_speed", self.meteor_min_speed),
            ("meteor_spawn_rate", self.meteor_spawn_rate),
            ("min_meteor_spawn_interval", self.min_meteor_spawn_interval),
            ("meteor_hit_scale", self.meteor_hit_scale),
            ("star_size", self.star_size),
            ("star_spawn_rate", self.star_spawn_rate),
            ("score_interval", self.score_interval),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { name, value });
            }
        }

        for (name, min, max) in [
            ("meteor size", self.meteor_min_size, self.meteor_max_size),
            ("meteor speed", self.meteor_min_speed, self.meteor_max_speed),
            ("meteor hue", self.meteor_min_hue, self.meteor_max_hue),
        ] {
            if min > max {
                return Err(TuningError::InvertedRange { name, min, max });
            }
        }

        for (name, value) in [
            ("player_width", self.player_width),
            ("meteor_max_size", self.meteor_max_size),
            ("star_size", self.star_size),
        ] {
            if value >= self.canvas_width {
                return Err(TuningError::TooWide {
                    name,
                    value,
                    canvas_width: self.canvas_width,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.star_spawn_chance) {
            return Err(TuningError::Probability {
                name: "star_spawn_chance",
                value: self.star_spawn_chance,
            });
        }

        Ok(())
    }

    /// Seconds between meteor spawns after `elapsed` seconds of play.
    ///
    /// The rate grows linearly without bound, so the interval is floored at
    /// `min_meteor_spawn_interval`.
    pub fn meteor_spawn_interval(&self, elapsed: f32) -> f32 {
        let rate = self.meteor_spawn_rate + elapsed * self.meteor_spawn_rate_growth;
        if !(rate > 0.0) || !rate.is_finite() {
            return self.min_meteor_spawn_interval;
        }
        (1.0 / rate).max(self.min_meteor_spawn_interval)
    }

    /// Seconds between star spawn attempts
    pub fn star_spawn_interval(&self) -> f32 {
        1.0 / self.star_spawn_rate
    }

    /// Rightmost valid x for the player's left edge
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        self.canvas_width - self.player_width
    }

    /// Player's fixed y (top edge)
    #[inline]
    pub fn player_y(&self) -> f32 {
        self.canvas_height - self.player_height - self.player_bottom_margin
    }
}
