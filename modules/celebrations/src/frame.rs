//! Wire representation of simulation frames.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use confetti::{Particle, Skin};

/// One streamed simulation frame.
///
/// An empty `particles` list marks the end of a celebration; painters clear
/// their canvas when they see it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CelebrationFrame {
    /// Monotonic frame counter, shared across celebrations. Restarts at zero
    /// with the server process.
    pub seq: u64,
    pub particles: Vec<FrameParticle>,
}

impl CelebrationFrame {
    pub fn empty(seq: u64) -> Self {
        Self {
            seq,
            particles: Vec::new(),
        }
    }
}

/// One particle, trimmed to what a painter needs. Coordinates are normalized
/// viewport units with the origin at the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrameParticle {
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub rot: f32,
    /// Remaining life in `0.0..=1.0`, usable directly as alpha.
    pub life: f32,
    pub skin: SkinDto,
}

/// How the particle should be painted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SkinDto {
    /// A colored paper rectangle; hue in degrees (0..360).
    Confetti { hue: u16 },
    /// A single emoji glyph.
    Emoji { glyph: String },
}

impl From<&Particle> for FrameParticle {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            rot: p.rotation,
            life: p.life.clamp(0.0, 1.0),
            skin: match p.skin {
                Skin::Confetti { hue } => SkinDto::Confetti { hue },
                Skin::Emoji { glyph } => SkinDto::Emoji {
                    glyph: glyph.to_string(),
                },
            },
        }
    }
}
