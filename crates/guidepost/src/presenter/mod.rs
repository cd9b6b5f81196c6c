//! Marker presentation: where the waypoint indicator is, how it moves,
//! and the effects around it.
//!
//! Strictly downstream of the tracker. The presenter consumes
//! `ProgressEvent`s and a read-only `ProgressState`; nothing here feeds
//! back into the step or terminal computation, and its timers gate only
//! visuals, never correctness.

pub mod easing;
pub mod marker;
pub mod particle;
pub mod rng;
pub mod tween;

pub use easing::{ease, ease_vec2, lerp, Easing};
pub use marker::Marker;
pub use particle::Particle;
pub use tween::{MarkerTween, TweenSet};

use glam::Vec2;

use crate::api::types::SoundCue;
use crate::events::ProgressEvent;
use crate::sequence::ObjectiveSequence;
use crate::tracker::ProgressState;
use rng::Rng;

/// Seconds for the hop to the next objective.
pub const ADVANCE_DURATION: f32 = 0.5;
/// Seconds for the scale pulse on advance.
pub const PULSE_DURATION: f32 = 0.8;
/// Seconds for the suppression fade.
pub const FADE_DURATION: f32 = 0.3;
/// Seconds for the terminal spin-and-shrink.
pub const TERMINAL_DURATION: f32 = 1.0;
/// Seconds between idle trail dots.
pub const TRAIL_INTERVAL: f32 = 0.2;

/// Animates the waypoint marker in response to progression events.
pub struct MarkerPresenter {
    marker: Marker,
    tweens: TweenSet,
    particles: Vec<Particle>,
    rng: Rng,
    viewport: Vec2,
    suppressed: bool,
    /// The marker has been positioned at least once. An empty sequence
    /// goes terminal before any placement and must show nothing.
    placed: bool,
    /// The terminal transition has run; the marker never comes back.
    terminal_played: bool,
    /// Terminal transition still animating; hide for good when it ends.
    hiding: bool,
    trail_timer: f32,
    sounds: Vec<SoundCue>,
}

impl MarkerPresenter {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            marker: Marker::new(),
            tweens: TweenSet::new(),
            particles: Vec::new(),
            rng: Rng::new(0x9d2c_5681),
            viewport,
            suppressed: false,
            placed: false,
            terminal_played: false,
            hiding: false,
            trail_timer: 0.0,
            sounds: Vec::new(),
        }
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Place the marker at the current step without a transition.
    /// Used at startup and after viewport changes.
    pub fn sync(&mut self, state: &ProgressState, sequence: &ObjectiveSequence) {
        if self.terminal_played {
            return;
        }
        if let Some(step) = state.current_step {
            if let Some(pos) = sequence.position_of(step, self.viewport) {
                self.snap_to(pos);
            }
        }
        // Terminal placement is driven by the TerminalReached event.
    }

    /// React to a progression event.
    pub fn apply(&mut self, event: &ProgressEvent, sequence: &ObjectiveSequence) {
        match *event {
            ProgressEvent::StepChanged { to, .. } => self.play_advance(to, sequence),
            ProgressEvent::TerminalReached => self.play_terminal(),
        }
    }

    /// Hide or reveal the marker while another UI surface has priority.
    /// Purely presentational; progression state is untouched, and tweens
    /// underneath keep tracking the real position.
    pub fn set_suppressed(&mut self, on: bool) {
        if self.terminal_played || on == self.suppressed {
            return;
        }
        log::debug!("marker {}", if on { "suppressed" } else { "revealed" });
        self.suppressed = on;
        let target = if on { 0.0 } else { 1.0 };
        self.tweens.add(MarkerTween::alpha(
            self.marker.alpha,
            target,
            FADE_DURATION,
            Easing::QuadOut,
        ));
    }

    /// Recompute the marker position for a new viewport size. Snap, no
    /// transition; the objective did not change, only where it is drawn.
    pub fn set_viewport(
        &mut self,
        viewport: Vec2,
        state: &ProgressState,
        sequence: &ObjectiveSequence,
    ) {
        self.viewport = viewport;
        self.sync(state, sequence);
    }

    /// Advance animations and effects.
    pub fn tick(&mut self, dt: f32) {
        self.tweens.tick(dt, &mut self.marker);
        self.particles.retain_mut(|p| p.tick(dt));

        if self.hiding && self.tweens.is_empty() {
            self.hiding = false;
            self.marker.visible = false;
        }

        if self.trail_active() {
            self.trail_timer += dt;
            while self.trail_timer >= TRAIL_INTERVAL {
                self.trail_timer -= TRAIL_INTERVAL;
                self.particles.push(particle::trail_dot(self.marker.pos));
            }
        } else {
            self.trail_timer = 0.0;
        }
    }

    /// Drain queued sound cues for the host's sound layer.
    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sounds)
    }

    fn snap_to(&mut self, pos: Vec2) {
        self.marker.pos = pos;
        // Kill any in-flight hop so it cannot drag the marker back.
        self.tweens
            .add(MarkerTween::position(pos, pos, 0.0, Easing::Linear));
        self.placed = true;
    }

    fn play_advance(&mut self, step: usize, sequence: &ObjectiveSequence) {
        if self.terminal_played {
            return;
        }
        let Some(target) = sequence.position_of(step, self.viewport) else {
            return;
        };
        if self.placed {
            self.particles
                .extend(particle::advance_burst(self.marker.pos, &mut self.rng));
            self.tweens.add(MarkerTween::position(
                self.marker.pos,
                target,
                ADVANCE_DURATION,
                Easing::BackInOut,
            ));
            self.tweens.add(MarkerTween::scale(
                1.3,
                1.0,
                PULSE_DURATION,
                Easing::QuadOut,
            ));
            self.sounds.push(SoundCue::ADVANCE);
        } else {
            // First placement, nothing to transition from.
            self.snap_to(target);
        }
    }

    fn play_terminal(&mut self) {
        if self.terminal_played {
            return;
        }
        log::debug!("hiding marker for good");
        self.terminal_played = true;

        if !self.placed {
            // Never shown (empty sequence, or everything was already
            // complete before the first placement): no indicator at all.
            self.marker.visible = false;
            return;
        }

        self.particles
            .extend(particle::celebration_burst(self.marker.pos, &mut self.rng));
        self.tweens.add(MarkerTween::scale(
            self.marker.scale,
            0.0,
            TERMINAL_DURATION,
            Easing::BackIn,
        ));
        self.tweens.add(MarkerTween::alpha(
            self.marker.alpha,
            0.0,
            TERMINAL_DURATION,
            Easing::QuadOut,
        ));
        self.tweens.add(MarkerTween::rotation(
            self.marker.rotation,
            std::f32::consts::TAU,
            TERMINAL_DURATION,
            Easing::CubicOut,
        ));
        self.sounds.push(SoundCue::FANFARE);
        self.hiding = true;
    }

    fn trail_active(&self) -> bool {
        self.placed
            && self.marker.visible
            && !self.hiding
            && !self.suppressed
            && self.marker.alpha > 0.5
    }
}
