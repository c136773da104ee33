use rand::Rng;

use crate::burst::BurstSpec;
use crate::particle::Particle;

/// Margin below the unit viewport before a fallen particle is pruned; keeps
/// pieces visible while they exit the bottom edge.
const FLOOR_MARGIN: f32 = 0.2;

/// The active particle set and its per-frame update.
///
/// The simulation never schedules anything itself: drive it with one
/// `step()` per frame and stop once `is_idle()`. Spawning again later
/// "restarts" it.
#[derive(Debug, Default)]
pub struct Simulation {
    particles: Vec<Particle>,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one burst's worth of particles.
    pub fn spawn_burst(&mut self, rng: &mut impl Rng, spec: &BurstSpec) {
        self.particles.reserve(spec.count);
        for _ in 0..spec.count {
            self.particles.push(spec.sample(rng));
        }
    }

    /// Integrate one frame and drop expired particles. Returns the number
    /// of particles still active.
    pub fn step(&mut self) -> usize {
        let floor = 1.0 + FLOOR_MARGIN;
        for p in &mut self.particles {
            p.step();
        }
        self.particles.retain(|p| p.is_alive(floor));
        self.particles.len()
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn active(&self) -> &[Particle] {
        &self.particles
    }
}
