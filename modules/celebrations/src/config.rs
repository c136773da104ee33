//! Configuration for the celebrations module.
//!
//! Read from the `modules.celebrations` section of the application config;
//! every field has a default so the section may be omitted entirely.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CelebrationsConfig {
    /// Milliseconds between simulation steps (and streamed frames).
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,

    /// Broadcast buffer size; slow subscribers lose the oldest frames first.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Smallest number of particles in one burst.
    #[serde(default = "default_burst_min")]
    pub burst_min: usize,

    /// Largest number of particles in one burst.
    #[serde(default = "default_burst_max")]
    pub burst_max: usize,

    /// Fraction of particles rendered as emoji glyphs rather than paper
    /// rectangles, in `0.0..=1.0`.
    #[serde(default = "default_emoji_ratio")]
    pub emoji_ratio: f32,
}

/// ~30 frames per second.
fn default_frame_ms() -> u64 {
    33
}

/// Roughly two seconds of frames at the default rate.
fn default_channel_capacity() -> usize {
    64
}

fn default_burst_min() -> usize {
    60
}

fn default_burst_max() -> usize {
    120
}

fn default_emoji_ratio() -> f32 {
    0.15
}

impl Default for CelebrationsConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            channel_capacity: default_channel_capacity(),
            burst_min: default_burst_min(),
            burst_max: default_burst_max(),
            emoji_ratio: default_emoji_ratio(),
        }
    }
}
