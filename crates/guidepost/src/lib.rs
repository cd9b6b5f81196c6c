pub mod api;
pub mod config;
pub mod events;
pub mod presenter;
pub mod sequence;
pub mod store;
pub mod tracker;

// Re-export key types at crate root for convenience
pub use api::types::{SoundCue, WireEvent, WIRE_STEP_CHANGED, WIRE_TERMINAL_REACHED};
pub use config::{GuideConfig, ObjectiveDef};
pub use events::ProgressEvent;
pub use presenter::{Easing, Marker, MarkerPresenter, MarkerTween, Particle, TweenSet};
pub use sequence::{Objective, ObjectiveSequence, SequenceError};
pub use store::{FlagStore, MemoryStore};
pub use tracker::{
    completion_key, ProgressState, ProgressSummary, ProgressTracker, COMPLETED_VALUE,
    DEFAULT_FLAG_TTL, OBJECTIVE_FLAG_PREFIX, STEP_HINT_KEY,
};
