//! Per-frame simulation step
//!
//! Core game loop that advances the session by an elapsed-time delta.
//! The delta is used as given; clamping is the frame driver's job.

use rand::Rng;

use super::collision::{meteor_hits_player, player_collects_star};
use super::spawn::{spawn_meteor, spawn_star};
use super::state::{GameEvent, GamePhase, GameState};

/// Held-direction intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Outside of play only the background animates
    if state.phase != GamePhase::Playing {
        state.starfield.update(dt);
        return;
    }

    let max_x = state.tuning.player_max_x();
    state.player.steer(input.left, input.right, dt, max_x);

    update_meteors(state, dt);
    update_stars(state, dt);
    state.starfield.update(dt);
    update_spawning(state, dt);
    update_score(state, dt);

    check_collisions(state);
}

fn update_meteors(state: &mut GameState, dt: f32) {
    let acceleration = state.tuning.meteor_acceleration;
    let bottom = state.tuning.canvas_height;
    for meteor in &mut state.meteors {
        meteor.advance(dt, acceleration);
    }
    state.meteors.retain(|m| !m.is_gone(bottom));
}

fn update_stars(state: &mut GameState, dt: f32) {
    let bottom = state.tuning.canvas_height;
    for star in &mut state.stars {
        star.advance(dt);
    }
    state.stars.retain(|s| !s.is_gone(bottom));
}

fn update_spawning(state: &mut GameState, dt: f32) {
    state.elapsed += dt;

    state.timers.meteor += dt;
    if state.timers.meteor >= state.tuning.meteor_spawn_interval(state.elapsed) {
        let meteor = spawn_meteor(&mut state.rng, &state.tuning);
        log::trace!(
            "Meteor spawned at x={:.1} size={:.1} speed={:.1}",
            meteor.pos.x,
            meteor.size,
            meteor.speed
        );
        state.meteors.push(meteor);
        state.timers.meteor = 0.0;
    }

    state.timers.star += dt;
    if state.timers.star >= state.tuning.star_spawn_interval() {
        // The timer restarts whether or not the roll produced a star
        if state.rng.random_bool(state.tuning.star_spawn_chance) {
            let star = spawn_star(&mut state.rng, &state.tuning);
            log::trace!("Star spawned at x={:.1}", star.pos.x);
            state.stars.push(star);
        }
        state.timers.star = 0.0;
    }
}

fn update_score(state: &mut GameState, dt: f32) {
    let interval = state.tuning.score_interval;
    state.timers.score += dt;
    // Restarts from zero on each award; leftover time is discarded
    if state.timers.score >= interval {
        state.score += state.tuning.score_per_second;
        state.timers.score = 0.0;
    }
}

fn check_collisions(state: &mut GameState) {
    let hit_scale = state.tuning.meteor_hit_scale;
    if state
        .meteors
        .iter()
        .any(|m| meteor_hits_player(&state.player, m, hit_scale))
    {
        state.phase = GamePhase::Ended;
        state.events.push(GameEvent::SessionEnded {
            final_score: state.score,
        });
        log::info!(
            "Session ended: score {} after {:.1}s",
            state.score,
            state.elapsed
        );
        return;
    }

    let player = &state.player;
    let mut collected = 0u64;
    state.stars.retain(|star| {
        let hit = player_collects_star(player, star);
        if hit {
            collected += 1;
        }
        !hit
    });

    let bonus = state.tuning.star_bonus;
    for _ in 0..collected {
        state.score += bonus;
        state.events.push(GameEvent::StarCollected { bonus });
    }
    if collected > 0 {
        log::debug!("Collected {} star(s), score {}", collected, state.score);
    }
}
