// presenter/easing.rs
//
// Easing functions for marker animation. No dependencies on the tracker,
// just math.

use glam::Vec2;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow end.
    CubicOut,
    /// Overshoot at the start.
    BackIn,
    /// Overshoot past the target, then settle.
    BackOut,
    /// Overshoot on both ends; the springy hop the marker uses when it
    /// jumps to the next objective.
    BackInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Back variants can overshoot outside [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        const C1: f32 = 1.70158;
        const C2: f32 = C1 * 1.525;
        const C3: f32 = C1 + 1.0;

        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::BackIn => C3 * t * t * t - C1 * t * t,
            Easing::BackOut => {
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
            Easing::BackInOut => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (2.0 * t - 2.0) + C2) + 2.0) / 2.0
                }
            }
        }
    }
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Eased interpolation between two scalars.
#[inline]
pub fn ease(from: f32, to: f32, t: f32, easing: Easing) -> f32 {
    lerp(from, to, easing.apply(t))
}

/// Eased interpolation between two points.
#[inline]
pub fn ease_vec2(from: Vec2, to: Vec2, t: f32, easing: Easing) -> Vec2 {
    from + (to - from) * easing.apply(t)
}
