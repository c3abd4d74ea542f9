//! Collision detection
//!
//! Every entity is approximated as a circle around its center. Comparisons
//! use squared distances and are strict: touching exactly at the threshold
//! is not a hit.

use glam::Vec2;

use super::state::{Meteor, Player, Star};

/// True if two circles overlap by more than `threshold` center distance
#[inline]
pub fn within_distance(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}

/// Center distance at which a meteor becomes fatal.
///
/// `hit_scale` shrinks the hitbox below the visual radii.
#[inline]
pub fn meteor_hit_threshold(player_radius: f32, meteor_size: f32, hit_scale: f32) -> f32 {
    hit_scale * (player_radius + meteor_size / 2.0)
}

/// Center distance at which a star is collected (literal sum of radii)
#[inline]
pub fn star_collect_threshold(player_radius: f32, star_size: f32) -> f32 {
    player_radius + star_size / 2.0
}

pub fn meteor_hits_player(player: &Player, meteor: &Meteor, hit_scale: f32) -> bool {
    within_distance(
        player.center(),
        meteor.center(),
        meteor_hit_threshold(player.radius(), meteor.size, hit_scale),
    )
}

pub fn player_collects_star(player: &Player, star: &Star) -> bool {
    within_distance(
        player.center(),
        star.center(),
        star_collect_threshold(player.radius(), star.size),
    )
}
