use glam::Vec2;
use guidepost::{
    completion_key, FlagStore, GuideConfig, MarkerPresenter, ObjectiveSequence, ProgressSummary,
    ProgressTracker, SequenceError, WireEvent, COMPLETED_VALUE,
};

use std::time::Duration;

/// Generic guide runner that wires store, tracker and presenter together.
///
/// Each game creates a `thread_local!` GuideRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_guide!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct GuideRunner<S: FlagStore> {
    store: S,
    tracker: ProgressTracker,
    presenter: MarkerPresenter,
    /// Wire events pumped since the last tick, published on the next one.
    pending: Vec<WireEvent>,
    /// Flat event buffer for JS reads, valid for one frame.
    events: Vec<WireEvent>,
    /// Flat buffer of sound cue IDs for JS reads.
    sound_buffer: Vec<u8>,
    initialized: bool,
}

impl<S: FlagStore> GuideRunner<S> {
    pub fn new(
        config: &GuideConfig,
        store: S,
        viewport_w: f32,
        viewport_h: f32,
    ) -> Result<Self, SequenceError> {
        let sequence = ObjectiveSequence::from_config(config)?;
        let ttl = Duration::from_secs(u64::from(config.flag_ttl_days) * 24 * 60 * 60);
        Ok(Self {
            store,
            tracker: ProgressTracker::new(sequence).with_ttl(ttl),
            presenter: MarkerPresenter::new(Vec2::new(viewport_w, viewport_h)),
            pending: Vec::new(),
            events: Vec::new(),
            sound_buffer: Vec::new(),
            initialized: false,
        })
    }

    /// Load persisted progress and place the marker. Call once.
    pub fn init(&mut self) {
        self.tracker.initialize(&mut self.store);
        // Apply reconciliation events before the first placement so a
        // stale hint never flashes the marker at the wrong objective.
        self.pump();
        let state = self.tracker.state(&self.store);
        self.presenter.sync(&state, self.tracker.sequence());
        self.initialized = true;
    }

    /// The host granted an objective completion: persist the flag, then
    /// let the tracker react.
    pub fn objective_completed(&mut self, id: &str) {
        self.store.set(
            &completion_key(id),
            COMPLETED_VALUE,
            self.tracker.ttl(),
        );
        self.tracker.on_objective_completed(id, &mut self.store);
        self.pump();
    }

    /// Opportunistic resync, e.g. after a modal closes. Harmless to call
    /// at any time; recompute is idempotent.
    pub fn refresh(&mut self) {
        self.tracker.recompute(&mut self.store);
        self.pump();
    }

    /// The page resized; re-anchor the marker. Presentation only.
    pub fn viewport_changed(&mut self, width: f32, height: f32) {
        let state = self.tracker.state(&self.store);
        self.presenter
            .set_viewport(Vec2::new(width, height), &state, self.tracker.sequence());
    }

    /// Another UI surface took visual priority (or gave it back).
    pub fn set_suppressed(&mut self, on: bool) {
        self.presenter.set_suppressed(on);
    }

    /// Debug aid: back to step 0 without touching completion flags.
    pub fn reset(&mut self) {
        self.tracker.reset(&mut self.store);
        self.pump();
        let state = self.tracker.state(&self.store);
        self.presenter.sync(&state, self.tracker.sequence());
    }

    /// Run one frame: publish pumped events, advance animations, pack
    /// sound cues.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.events.clear();
        self.events.append(&mut self.pending);

        self.presenter.tick(dt);

        self.sound_buffer.clear();
        for cue in self.presenter.drain_sounds() {
            self.sound_buffer.push(cue.0 as u8);
        }
    }

    fn pump(&mut self) {
        for event in self.tracker.drain_events() {
            self.presenter.apply(&event, self.tracker.sequence());
            self.pending.push(event.to_wire());
        }
    }

    // ---- State accessors for JS reads ----

    pub fn marker_x(&self) -> f32 {
        self.presenter.marker().pos.x
    }

    pub fn marker_y(&self) -> f32 {
        self.presenter.marker().pos.y
    }

    pub fn marker_scale(&self) -> f32 {
        self.presenter.marker().scale
    }

    pub fn marker_alpha(&self) -> f32 {
        self.presenter.marker().alpha
    }

    pub fn marker_rotation(&self) -> f32 {
        self.presenter.marker().rotation
    }

    pub fn marker_visible(&self) -> bool {
        self.presenter.marker().visible
    }

    /// Current step index, or -1 once terminal.
    pub fn current_step(&self) -> i32 {
        self.tracker
            .current_step()
            .map_or(-1, |step| step as i32)
    }

    pub fn is_terminal(&self) -> bool {
        self.tracker.is_terminal()
    }

    pub fn summary(&self) -> ProgressSummary {
        self.tracker.summary(&self.store)
    }

    // ---- Pointer accessors for flat buffer reads ----

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn sounds_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sounds_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }
}
