//! Fixed-timestep particle simulation for celebration effects.
//!
//! The simulation is pure: no clocks, no I/O, no global state. Callers own
//! the frame cadence (one `step()` per rendered frame) and the randomness
//! (any `rand::Rng` seeds burst spawning), which keeps every behavior
//! reproducible in tests.
//!
//! Coordinates are normalized to a unit viewport: `(0,0)` is the top-left,
//! `(1,1)` the bottom-right. Velocities, gravity and spin are per-frame
//! quantities tuned for roughly 30 fps; renderers scale positions to their
//! own canvas size.

mod burst;
mod particle;
mod sim;

pub use burst::BurstSpec;
pub use particle::{Particle, Skin, Vec2};
pub use sim::Simulation;
