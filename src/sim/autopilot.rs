//! Idle/demo mode - the game plays itself
//!
//! A simple lane-based dodger: sidestep the most imminent meteor in the
//! ship's lane, otherwise drift under the lowest star still above the ship.

use std::cmp::Ordering;

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// How far above the ship a meteor is considered a threat
const LOOKAHEAD: f32 = 260.0;
/// Extra lane width around the summed radii
const LANE_MARGIN: f32 = 8.0;
/// Ignore star offsets smaller than this to avoid jitter
const DEADBAND: f32 = 2.0;

/// Choose directional intent for the next tick
pub fn steer(state: &GameState) -> TickInput {
    if state.phase != GamePhase::Playing {
        return TickInput::default();
    }

    let player = &state.player;
    let ship = player.center();
    let max_x = state.tuning.player_max_x();

    let threat = state
        .meteors
        .iter()
        .filter(|m| {
            let c = m.center();
            let above = ship.y - c.y;
            let lane = player.radius() + m.size / 2.0 + LANE_MARGIN;
            above > -m.size && above < LOOKAHEAD && (c.x - ship.x).abs() < lane
        })
        .min_by(|a, b| {
            (ship.y - a.center().y)
                .partial_cmp(&(ship.y - b.center().y))
                .unwrap_or(Ordering::Equal)
        });

    if let Some(meteor) = threat {
        let mx = meteor.center().x;
        let mut go_left = if mx == ship.x {
            ship.x > state.tuning.canvas_width / 2.0
        } else {
            mx > ship.x
        };
        // Pinned against a wall: the only way out is the other side
        if go_left && player.pos.x <= 0.0 {
            go_left = false;
        } else if !go_left && player.pos.x >= max_x {
            go_left = true;
        }
        return TickInput {
            left: go_left,
            right: !go_left,
        };
    }

    let target = state
        .stars
        .iter()
        .filter(|s| s.center().y < ship.y)
        .max_by(|a, b| {
            a.center()
                .y
                .partial_cmp(&b.center().y)
                .unwrap_or(Ordering::Equal)
        });

    if let Some(star) = target {
        let dx = star.center().x - ship.x;
        if dx.abs() > DEADBAND {
            return TickInput {
                left: dx < 0.0,
                right: dx > 0.0,
            };
        }
    }

    TickInput::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Meteor, Star};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(21);
        state.reset();
        state
    }

    fn meteor(center: Vec2) -> Meteor {
        Meteor {
            pos: center - Vec2::splat(10.0),
            size: 20.0,
            speed: 150.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            hue: 30.0,
        }
    }

    #[test]
    fn test_idle_does_nothing() {
        let state = GameState::new(21);
        assert_eq!(steer(&state), TickInput::default());
    }

    #[test]
    fn test_dodges_away_from_meteor() {
        let mut state = playing();
        let ship = state.player.center();

        state.meteors.push(meteor(ship + Vec2::new(-10.0, -100.0)));
        assert_eq!(steer(&state), TickInput { left: false, right: true });

        state.meteors.clear();
        state.meteors.push(meteor(ship + Vec2::new(10.0, -100.0)));
        assert_eq!(steer(&state), TickInput { left: true, right: false });
    }

    #[test]
    fn test_ignores_meteors_outside_lane() {
        let mut state = playing();
        let ship = state.player.center();
        state.meteors.push(meteor(ship + Vec2::new(120.0, -100.0)));
        state.meteors.push(meteor(ship + Vec2::new(0.0, -500.0)));
        assert_eq!(steer(&state), TickInput::default());
    }

    #[test]
    fn test_escapes_wall() {
        let mut state = playing();
        state.player.pos.x = 0.0;
        let ship = state.player.center();
        state.meteors.push(meteor(ship + Vec2::new(5.0, -80.0)));
        assert_eq!(steer(&state), TickInput { left: false, right: true });
    }

    #[test]
    fn test_chases_star_when_safe() {
        let mut state = playing();
        let ship = state.player.center();
        state.stars.push(Star {
            pos: ship + Vec2::new(80.0, -200.0),
            size: 12.0,
            speed: 150.0,
            rotation: 0.0,
            rotation_speed: 3.0,
        });
        assert_eq!(steer(&state), TickInput { left: false, right: true });
    }
}
