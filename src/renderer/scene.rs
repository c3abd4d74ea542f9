//! Frame tessellation
//!
//! Turns a [`RenderSnapshot`] into one triangle list. Draw order is
//! back-to-front: starfield, ship, meteors, stars.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::RenderSnapshot;

/// Background star brightness when twinkling is turned off
const STEADY_STAR_OPACITY: f32 = 0.6;
const STARFIELD_SEGMENTS: u32 = 6;

pub fn build_scene(snapshot: &RenderSnapshot<'_>, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    if settings.show_starfield {
        let twinkle = settings.effective_twinkle();
        for star in &snapshot.starfield.stars {
            let alpha = if twinkle {
                star.opacity
            } else {
                STEADY_STAR_OPACITY
            };
            let mut color = colors::BACKGROUND_STAR;
            color[3] = alpha;
            vertices.extend(shapes::circle(
                Vec2::new(star.x, star.y),
                star.size,
                color,
                STARFIELD_SEGMENTS,
            ));
        }
    }

    if !snapshot.shows_entities() {
        return vertices;
    }

    let player = snapshot.player;
    vertices.extend(shapes::ship(player.center(), player.width, player.height));

    for meteor in snapshot.meteors {
        vertices.extend(shapes::meteor(
            meteor.center(),
            meteor.size,
            meteor.rotation,
            meteor.hue,
        ));
    }

    for star in snapshot.stars {
        vertices.extend(shapes::star(star.center(), star.size, star.rotation));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, GameState, Meteor};

    fn meteor_at(x: f32, y: f32) -> Meteor {
        Meteor {
            pos: Vec2::new(x, y),
            size: 20.0,
            speed: 100.0,
            rotation: 0.3,
            rotation_speed: 1.0,
            hue: 40.0,
        }
    }

    #[test]
    fn test_idle_draws_only_starfield() {
        let mut state = GameState::new(3);
        state.meteors.push(meteor_at(100.0, 100.0));

        let settings = Settings::default();
        let idle = build_scene(&RenderSnapshot::new(&state, 0), &settings);
        assert_eq!(
            idle.len(),
            state.starfield.stars.len() * STARFIELD_SEGMENTS as usize * 3
        );

        state.phase = GamePhase::Playing;
        let playing = build_scene(&RenderSnapshot::new(&state, 0), &settings);
        assert!(playing.len() > idle.len());
    }

    #[test]
    fn test_ended_still_shows_entities() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Ended;
        let settings = Settings {
            show_starfield: false,
            ..Settings::default()
        };
        let vertices = build_scene(&RenderSnapshot::new(&state, 0), &settings);
        assert!(!vertices.is_empty());
        assert_eq!(vertices[0].color, colors::PLAYER);
    }

    #[test]
    fn test_reduced_motion_fixes_opacity() {
        let state = GameState::new(3);
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let vertices = build_scene(&RenderSnapshot::new(&state, 0), &settings);
        assert!(vertices.iter().all(|v| v.color[3] == STEADY_STAR_OPACITY));
    }

    #[test]
    fn test_meteor_uses_hue_fill() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        state.meteors.push(meteor_at(100.0, 100.0));
        let settings = Settings {
            show_starfield: false,
            ..Settings::default()
        };
        let vertices = build_scene(&RenderSnapshot::new(&state, 0), &settings);

        let [r, g, b] = shapes::hsl_to_rgb(40.0, 0.7, 0.5);
        assert!(vertices.iter().any(|v| v.color == [r, g, b, 1.0]));
    }
}
