use crate::api::types::{WireEvent, WIRE_STEP_CHANGED, WIRE_TERMINAL_REACHED};

/// A progression event emitted by the tracker and consumed by the
/// presenter (and by any analytics/UI badge on the host page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The current step moved. Covers both the fast-path advance and a
    /// correction from a full recompute.
    StepChanged { from: usize, to: usize },
    /// Every objective is complete. Fired at most once per tracker.
    TerminalReached,
}

impl ProgressEvent {
    /// Flatten to the wire form read by JavaScript.
    pub fn to_wire(self) -> WireEvent {
        match self {
            ProgressEvent::StepChanged { from, to } => WireEvent {
                kind: WIRE_STEP_CHANGED,
                a: from as f32,
                b: to as f32,
                c: 0.0,
            },
            ProgressEvent::TerminalReached => WireEvent {
                kind: WIRE_TERMINAL_REACHED,
                ..WireEvent::default()
            },
        }
    }
}
