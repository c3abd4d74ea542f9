//! Entity spawning
//!
//! New entities start just above the top edge at a random x that keeps
//! their bounding square inside the canvas.

use glam::Vec2;
use rand::Rng;

use super::state::{Meteor, Star};
use crate::tuning::Tuning;

/// Roll a new meteor
pub fn spawn_meteor<R: Rng>(rng: &mut R, tuning: &Tuning) -> Meteor {
    let size = rng.random_range(tuning.meteor_min_size..=tuning.meteor_max_size);
    let x = rng.random_range(0.0..=(tuning.canvas_width - size));
    let speed = rng.random_range(tuning.meteor_min_speed..=tuning.meteor_max_speed);
    let max_spin = tuning.meteor_max_rotation_speed.abs();
    let rotation_speed = rng.random_range(-max_spin..=max_spin);
    let hue = rng.random_range(tuning.meteor_min_hue..=tuning.meteor_max_hue);

    Meteor {
        pos: Vec2::new(x, -size),
        size,
        speed,
        rotation: 0.0,
        rotation_speed,
        hue,
    }
}

/// Place a new star (only its x is random)
pub fn spawn_star<R: Rng>(rng: &mut R, tuning: &Tuning) -> Star {
    let size = tuning.star_size;
    let x = rng.random_range(0.0..=(tuning.canvas_width - size));

    Star {
        pos: Vec2::new(x, -size),
        size,
        speed: tuning.star_speed,
        rotation: 0.0,
        rotation_speed: tuning.star_rotation_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_meteor_parameters_in_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let m = spawn_meteor(&mut rng, &tuning);
            assert!((15.0..=35.0).contains(&m.size));
            assert!((100.0..=300.0).contains(&m.speed));
            assert!((-3.0..=3.0).contains(&m.rotation_speed));
            assert!((10.0..=70.0).contains(&m.hue));
            assert!(m.pos.x >= 0.0 && m.pos.x + m.size <= tuning.canvas_width);
            assert_eq!(m.pos.y, -m.size);
            assert_eq!(m.rotation, 0.0);
        }
    }

    #[test]
    fn test_star_parameters_fixed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let s = spawn_star(&mut rng, &tuning);
            assert_eq!(s.size, 12.0);
            assert_eq!(s.speed, 150.0);
            assert_eq!(s.rotation_speed, 3.0);
            assert_eq!(s.pos.y, -12.0);
            assert!(s.pos.x >= 0.0 && s.pos.x <= 388.0);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let tuning = Tuning::default();
        let a = spawn_meteor(&mut Pcg32::seed_from_u64(5), &tuning);
        let b = spawn_meteor(&mut Pcg32::seed_from_u64(5), &tuning);
        assert_eq!(a, b);
    }
}
