// presenter/tween.rs
//
// Animated value transitions for the single waypoint marker. A slimmer
// cousin of a scene-wide tween system: one animated object, one active
// tween per property, run-once semantics.

use glam::Vec2;

use super::easing::{ease, ease_vec2, Easing};
use super::marker::Marker;

/// Which marker property a tween animates.
#[derive(Debug, Clone, Copy)]
pub enum TweenTarget {
    Position { from: Vec2, to: Vec2 },
    Scale { from: f32, to: f32 },
    Alpha { from: f32, to: f32 },
    Rotation { from: f32, to: f32 },
}

impl TweenTarget {
    fn kind(&self) -> u8 {
        match self {
            TweenTarget::Position { .. } => 0,
            TweenTarget::Scale { .. } => 1,
            TweenTarget::Alpha { .. } => 2,
            TweenTarget::Rotation { .. } => 3,
        }
    }
}

/// A single run-once marker tween.
#[derive(Debug, Clone)]
pub struct MarkerTween {
    target: TweenTarget,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl MarkerTween {
    pub fn position(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Position { from, to }, duration, easing)
    }

    pub fn scale(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Scale { from, to }, duration, easing)
    }

    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Alpha { from, to }, duration, easing)
    }

    pub fn rotation(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Rotation { from, to }, duration, easing)
    }

    fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn apply(&self, marker: &mut Marker) {
        let t = self.progress();
        match self.target {
            TweenTarget::Position { from, to } => {
                marker.pos = ease_vec2(from, to, t, self.easing);
            }
            TweenTarget::Scale { from, to } => {
                marker.scale = ease(from, to, t, self.easing);
            }
            TweenTarget::Alpha { from, to } => {
                marker.alpha = ease(from, to, t, self.easing).clamp(0.0, 1.0);
            }
            TweenTarget::Rotation { from, to } => {
                marker.rotation = ease(from, to, t, self.easing);
            }
        }
    }
}

/// The set of active marker tweens. Adding a tween replaces any running
/// tween on the same property, so the newest transition always wins.
#[derive(Debug, Default)]
pub struct TweenSet {
    tweens: Vec<MarkerTween>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: MarkerTween) {
        self.tweens
            .retain(|t| t.target.kind() != tween.target.kind());
        self.tweens.push(tween);
    }

    /// Advance all tweens and write the eased values into the marker.
    /// Completed tweens are applied at their final value and removed.
    pub fn tick(&mut self, dt: f32, marker: &mut Marker) {
        for tween in &mut self.tweens {
            tween.elapsed += dt;
            tween.apply(marker);
        }
        self.tweens.retain(|t| t.elapsed < t.duration);
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
