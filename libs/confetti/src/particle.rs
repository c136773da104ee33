/// Position or velocity in normalized viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visual identity of a particle; the renderer decides how to paint it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skin {
    /// A small colored rectangle, hue in degrees (0..360).
    Confetti { hue: u16 },
    /// A single emoji glyph.
    Emoji { glyph: char },
}

/// One decorative particle.
///
/// Gravity, drag and decay are carried per particle so bursts with different
/// physics can coexist in one simulation. `life` starts at 1.0 and fades to
/// zero; renderers typically use it as the alpha channel.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub life: f32,
    pub decay: f32,
    pub gravity: f32,
    pub drag: f32,
    pub skin: Skin,
}

impl Particle {
    /// Advance one frame of Euler integration.
    pub(crate) fn step(&mut self) {
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;
        self.vel.y += self.gravity;
        self.vel.x *= self.drag;
        self.vel.y *= self.drag;
        self.rotation += self.rotation_speed;
        self.life -= self.decay;
    }

    /// True while the particle should stay in the active set.
    pub(crate) fn is_alive(&self, floor: f32) -> bool {
        self.life > 0.0 && self.pos.y <= floor
    }
}
