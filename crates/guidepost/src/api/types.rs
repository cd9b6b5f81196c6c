use bytemuck::{Pod, Zeroable};

/// A sound cue emitted by the presenter.
/// The numeric value maps to a host-defined effect in the page's sound layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundCue(pub u32);

impl SoundCue {
    /// Marker advanced to the next objective.
    pub const ADVANCE: SoundCue = SoundCue(1);
    /// All objectives complete.
    pub const FANFARE: SoundCue = SoundCue(2);
}

/// A progress event in flat form, read by JavaScript from a shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;
}

/// Wire `kind` for a step change (`a` = old index, `b` = new index).
pub const WIRE_STEP_CHANGED: f32 = 1.0;
/// Wire `kind` for reaching the terminal state.
pub const WIRE_TERMINAL_REACHED: f32 = 2.0;
