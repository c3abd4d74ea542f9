//! Decorative twinkling background
//!
//! Purely cosmetic: nothing here feeds back into gameplay.

use rand::Rng;

use crate::tuning::Tuning;

/// A single background star
#[derive(Debug, Clone, PartialEq)]
pub struct TwinkleStar {
    pub x: f32,
    pub y: f32,
    /// Dot radius
    pub size: f32,
    /// 0.1 - 1.0
    pub opacity: f32,
    pub twinkle_speed: f32,
}

/// The full background field with its own clock
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    pub stars: Vec<TwinkleStar>,
    /// Seconds since creation; advances in every phase
    pub clock: f32,
}

impl Starfield {
    pub fn generate<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        let stars = (0..tuning.starfield_count)
            .map(|_| TwinkleStar {
                x: rng.random::<f32>() * tuning.canvas_width,
                y: rng.random::<f32>() * tuning.canvas_height,
                size: rng.random::<f32>() * 2.0 + 0.5,
                opacity: rng.random::<f32>() * 0.8 + 0.2,
                twinkle_speed: rng.random::<f32>() * 2.0 + 1.0,
            })
            .collect();
        Self { stars, clock: 0.0 }
    }

    pub fn update(&mut self, dt: f32) {
        self.clock += dt;
        for star in &mut self.stars {
            star.opacity += (self.clock * star.twinkle_speed).sin() * 0.01;
            star.opacity = star.opacity.clamp(0.1, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generate_within_canvas() {
        let tuning = Tuning::default();
        let field = Starfield::generate(&mut Pcg32::seed_from_u64(3), &tuning);
        assert_eq!(field.stars.len(), 100);
        for star in &field.stars {
            assert!((0.0..tuning.canvas_width).contains(&star.x));
            assert!((0.0..tuning.canvas_height).contains(&star.y));
            assert!((0.5..2.5).contains(&star.size));
            assert!((0.2..=1.0).contains(&star.opacity));
        }
    }

    #[test]
    fn test_opacity_stays_clamped() {
        let tuning = Tuning::default();
        let mut field = Starfield::generate(&mut Pcg32::seed_from_u64(3), &tuning);
        for _ in 0..5_000 {
            field.update(1.0 / 60.0);
        }
        assert!(field.clock > 80.0);
        assert!(field
            .stars
            .iter()
            .all(|s| (0.1..=1.0).contains(&s.opacity)));
    }
}
