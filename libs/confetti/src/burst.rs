use std::f32::consts::{PI, TAU};
use std::ops::Range;

use rand::Rng;

use crate::particle::{Particle, Skin, Vec2};

/// Recipe for one burst of particles.
///
/// All randomized fields are sampled uniformly from their ranges at spawn
/// time; gravity and drag are constants copied onto every particle.
#[derive(Debug, Clone)]
pub struct BurstSpec {
    /// Number of particles to spawn.
    pub count: usize,
    /// Launch point in normalized viewport coordinates.
    pub origin: Vec2,
    /// Initial speed range, viewport units per frame.
    pub speed: Range<f32>,
    /// Launch direction range in radians (0 points right, angles grow
    /// clockwise because y grows downward).
    pub angle: Range<f32>,
    /// Spin range in radians per frame; sign is randomized separately.
    pub rotation_speed: Range<f32>,
    /// Life lost per frame. Must stay positive so every burst terminates.
    pub decay: Range<f32>,
    pub gravity: f32,
    pub drag: f32,
    /// Fraction of particles that get an emoji skin instead of confetti.
    pub emoji_ratio: f32,
    /// Glyphs to pick from for emoji particles.
    pub glyphs: Vec<char>,
}

impl Default for BurstSpec {
    fn default() -> Self {
        Self {
            count: 80,
            // Slightly above center so the fountain fills the viewport.
            origin: Vec2::new(0.5, 0.6),
            speed: 0.008..0.035,
            // Mostly upward: angles around -PI/2 with a wide spread.
            angle: (-0.85 * PI)..(-0.15 * PI),
            rotation_speed: 0.05..0.3,
            decay: 0.006..0.02,
            gravity: 0.0012,
            drag: 0.97,
            emoji_ratio: 0.15,
            glyphs: vec!['🎉', '🥳', '🛒', '✨'],
        }
    }
}

impl BurstSpec {
    /// Sample one particle from this recipe.
    pub(crate) fn sample(&self, rng: &mut impl Rng) -> Particle {
        let speed = rng.random_range(self.speed.clone());
        let angle = rng.random_range(self.angle.clone());
        let spin = rng.random_range(self.rotation_speed.clone());
        let spin_sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        let skin = if !self.glyphs.is_empty() && rng.random::<f32>() < self.emoji_ratio {
            let glyph = self.glyphs[rng.random_range(0..self.glyphs.len())];
            Skin::Emoji { glyph }
        } else {
            Skin::Confetti {
                hue: rng.random_range(0..360),
            }
        };

        Particle {
            pos: self.origin,
            vel: Vec2::new(speed * angle.cos(), speed * angle.sin()),
            rotation: rng.random_range(0.0..TAU),
            rotation_speed: spin * spin_sign,
            life: 1.0,
            decay: rng.random_range(self.decay.clone()),
            gravity: self.gravity,
            drag: self.drag,
            skin,
        }
    }

    /// Upper bound on frames until every particle of this burst has faded,
    /// ignoring the viewport floor (which only removes particles earlier).
    pub fn max_frames(&self) -> usize {
        (1.0 / self.decay.start).ceil() as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sampled_particles_respect_ranges() {
        let spec = BurstSpec::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let p = spec.sample(&mut rng);
            let speed = (p.vel.x * p.vel.x + p.vel.y * p.vel.y).sqrt();
            assert!(speed >= spec.speed.start - 1e-6 && speed < spec.speed.end + 1e-6);
            assert!(p.decay >= spec.decay.start && p.decay < spec.decay.end);
            assert!(p.life == 1.0);
            assert_eq!(p.pos, spec.origin);
            // Default angles launch upward.
            assert!(p.vel.y < 0.0);
        }
    }

    #[test]
    fn emoji_ratio_zero_yields_only_confetti() {
        let spec = BurstSpec {
            emoji_ratio: 0.0,
            ..BurstSpec::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(matches!(
                spec.sample(&mut rng).skin,
                Skin::Confetti { .. }
            ));
        }
    }

    #[test]
    fn max_frames_bounds_the_slowest_decay() {
        let spec = BurstSpec {
            decay: 0.01..0.02,
            ..BurstSpec::default()
        };
        // 1.0 life at 0.01 per frame is gone after 100 steps.
        assert_eq!(spec.max_frames(), 101);
    }
}
