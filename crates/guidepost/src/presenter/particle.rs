//! Particles for the marker's advance bursts, terminal celebration and
//! idle trail.

use glam::Vec2;

use super::rng::Rng;

/// RGB colors used by the marker effects.
pub const COLOR_TRAIL: [f32; 3] = [1.0, 0.27, 0.27];
pub const COLOR_ADVANCE: [f32; 3] = [0.0, 1.0, 0.0];
pub const CELEBRATION_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.84, 0.0],
    [1.0, 0.92, 0.23],
    [0.30, 0.69, 0.31],
    [0.01, 0.66, 0.96],
    [0.91, 0.12, 0.39],
    [1.0, 0.60, 0.0],
];

/// A single effect particle.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: [f32; 3],
    /// Seconds remaining.
    pub lifetime: f32,
    /// Initial lifetime, for the fade ramp.
    total: f32,
    /// Per-tick velocity damping factor.
    pub drag: f32,
    /// Delay before the particle activates (celebration waves).
    pub delay: f32,
}

impl Particle {
    pub const DEFAULT_DRAG: f32 = 0.04;

    pub fn new(pos: Vec2, vel: Vec2, size: f32, color: [f32; 3], lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            color,
            lifetime,
            total: lifetime,
            drag: Self::DEFAULT_DRAG,
            delay: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Advance the particle. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.delay > 0.0 {
            self.delay -= dt;
            return true;
        }
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        self.vel *= 1.0 - self.drag;
        self.pos += self.vel * dt;
        true
    }

    /// Opacity ramping down over the particle's life. Zero while delayed.
    pub fn alpha(&self) -> f32 {
        if self.delay > 0.0 || self.total <= 0.0 {
            0.0
        } else {
            (self.lifetime / self.total).clamp(0.0, 1.0)
        }
    }
}

/// A ring burst of particles flying outward from `center`.
/// Used when the marker advances: 12 green sparks, even spread.
pub fn advance_burst(center: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const COUNT: usize = 12;
    let mut out = Vec::with_capacity(COUNT);
    for i in 0..COUNT {
        let angle = std::f32::consts::TAU * i as f32 / COUNT as f32;
        let speed = rng.range(60.0, 100.0);
        out.push(Particle::new(
            center,
            Vec2::from_angle(angle) * speed,
            6.0,
            COLOR_ADVANCE,
            0.8,
        ));
    }
    out
}

/// The terminal celebration: three staggered waves of ten particles each,
/// wider and longer-lived than an advance burst, in festive colors.
pub fn celebration_burst(center: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const WAVES: usize = 3;
    const PER_WAVE: usize = 10;
    let mut out = Vec::with_capacity(WAVES * PER_WAVE);
    for wave in 0..WAVES {
        for i in 0..PER_WAVE {
            let angle = std::f32::consts::TAU * i as f32 / PER_WAVE as f32;
            let speed = 80.0 + wave as f32 * 40.0 + rng.range(0.0, 60.0);
            let color = CELEBRATION_COLORS
                [(wave * PER_WAVE + i) % CELEBRATION_COLORS.len()];
            out.push(
                Particle::new(
                    center,
                    Vec2::from_angle(angle) * speed,
                    8.0,
                    color,
                    rng.range(2.0, 3.0),
                )
                .with_delay(wave as f32 * 0.2),
            );
        }
    }
    out
}

/// A single stationary trail dot left behind the idle marker.
pub fn trail_dot(center: Vec2) -> Particle {
    Particle::new(center, Vec2::ZERO, 6.0, COLOR_TRAIL, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_expires() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::X, 6.0, COLOR_TRAIL, 0.1);
        assert!(!p.tick(0.2));
    }

    #[test]
    fn particle_moves_and_fades() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 6.0, COLOR_ADVANCE, 1.0);
        assert!(p.tick(0.5));
        assert!(p.pos.x > 0.0);
        let alpha = p.alpha();
        assert!(alpha > 0.0 && alpha < 1.0);
    }

    #[test]
    fn delayed_particle_waits() {
        let mut p =
            Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 6.0, COLOR_ADVANCE, 1.0)
                .with_delay(0.5);
        assert_eq!(p.alpha(), 0.0);
        assert!(p.tick(0.3));
        assert_eq!(p.pos, Vec2::ZERO);
        assert!(p.tick(0.3));
        assert!(p.tick(0.3));
        assert!(p.pos.x > 0.0);
    }

    #[test]
    fn bursts_have_expected_counts() {
        let mut rng = Rng::new(42);
        assert_eq!(advance_burst(Vec2::ZERO, &mut rng).len(), 12);
        assert_eq!(celebration_burst(Vec2::ZERO, &mut rng).len(), 30);
    }
}
