use glam::Vec2;

/// Visual state of the waypoint marker. The host page (or canvas layer)
/// draws whatever it likes at this position; the presenter only animates
/// the values.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Center position in screen space.
    pub pos: Vec2,
    /// Uniform scale; 1.0 is the resting size.
    pub scale: f32,
    /// Opacity in [0, 1].
    pub alpha: f32,
    /// Rotation in radians (used by the terminal spin-out).
    pub rotation: f32,
    /// False once the marker is gone for good.
    pub visible: bool,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: 1.0,
            alpha: 1.0,
            rotation: 0.0,
            visible: true,
        }
    }
}

impl Marker {
    pub fn new() -> Self {
        Self::default()
    }
}
