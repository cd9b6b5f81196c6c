//! Progression tracking over persisted completion flags.
//!
//! The flag store is authoritative: the current step is always derivable
//! from which `objective_<id>` flags exist. The persisted step hint is a
//! cache that never overrides flag-derived truth.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::events::ProgressEvent;
use crate::sequence::ObjectiveSequence;
use crate::store::FlagStore;

/// Key prefix for completion flags: `objective_<id>`.
pub const OBJECTIVE_FLAG_PREFIX: &str = "objective_";

/// Key for the cached step index.
pub const STEP_HINT_KEY: &str = "progress_step_hint";

/// Value written for a completed objective.
pub const COMPLETED_VALUE: &str = "completed";

/// Default flag time-to-live: 30 days.
pub const DEFAULT_FLAG_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// The completion flag key for an objective id.
pub fn completion_key(id: &str) -> String {
    format!("{OBJECTIVE_FLAG_PREFIX}{id}")
}

/// A pure projection of the flag store plus the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Index of the first incomplete objective. `None` once terminal.
    pub current_step: Option<usize>,
    /// Ids of completed objectives, in sequence order.
    pub completed: Vec<String>,
    /// Whether every objective is complete.
    pub is_terminal: bool,
}

/// Completion counts for the progress badge ("N / M").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percent: f32,
}

/// Tracks the player's position in the objective sequence.
///
/// All store access is by argument: the host injects whichever `FlagStore`
/// it owns, and the tracker shares it with the completion-granting system.
/// Flags the tracker did not set itself are expected and handled by the
/// `recompute` fallback.
pub struct ProgressTracker {
    sequence: ObjectiveSequence,
    current_step: usize,
    terminal: bool,
    terminal_announced: bool,
    ttl: Duration,
    events: Vec<ProgressEvent>,
}

impl ProgressTracker {
    pub fn new(sequence: ObjectiveSequence) -> Self {
        Self {
            sequence,
            current_step: 0,
            terminal: false,
            terminal_announced: false,
            ttl: DEFAULT_FLAG_TTL,
            events: Vec::new(),
        }
    }

    /// Override the hint/flag TTL (default: 30 days).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn sequence(&self) -> &ObjectiveSequence {
        &self.sequence
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current step index, or `None` once terminal.
    pub fn current_step(&self) -> Option<usize> {
        if self.terminal {
            None
        } else {
            Some(self.current_step)
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Load the persisted step hint, then reconcile against the flags.
    /// A corrupt or out-of-range hint is clamped, never fatal.
    pub fn initialize<S: FlagStore>(&mut self, store: &mut S) {
        let hint = match store.get(STEP_HINT_KEY) {
            Some(raw) => raw.parse::<usize>().unwrap_or_else(|_| {
                log::debug!("ignoring corrupt step hint `{raw}`");
                0
            }),
            None => 0,
        };
        self.current_step = match self.sequence.len() {
            0 => 0,
            len => hint.min(len - 1),
        };
        self.recompute(store);
    }

    /// Rescan the flags left to right and resynchronize the step.
    ///
    /// The step lands on the first objective without a completion flag,
    /// clamped to the last index. All objectives flagged means terminal.
    /// Pure over the store contents, so calling this twice in a row yields
    /// the same state; `TerminalReached` still fires at most once ever.
    pub fn recompute<S: FlagStore>(&mut self, store: &mut S) {
        let first_incomplete = self
            .sequence
            .iter()
            .position(|obj| store.get(&completion_key(&obj.id)).is_none());

        match first_incomplete {
            None => self.enter_terminal(),
            Some(index) => {
                self.terminal = false;
                let target = index.min(self.sequence.len() - 1);
                if target != self.current_step {
                    log::debug!(
                        "progress step resynchronized: {} -> {}",
                        self.current_step,
                        target
                    );
                    self.move_to(target, store);
                }
            }
        }
    }

    /// React to an objective being completed by the host game.
    ///
    /// Unknown ids are ignored; the rest of the game must not be able to
    /// crash the tracker. The common sequential case advances one step
    /// without a rescan; out-of-order completions fall back to a full
    /// `recompute`.
    pub fn on_objective_completed<S: FlagStore>(&mut self, id: &str, store: &mut S) {
        let Some(index) = self.sequence.index_of(id) else {
            log::debug!("ignoring completion for unknown objective `{id}`");
            return;
        };

        if self.terminal {
            // Defensive: flags may have drifted since terminal was derived.
            self.recompute(store);
            return;
        }

        if self.all_complete(store) {
            self.enter_terminal();
            return;
        }

        if index == self.current_step {
            // Fast path: sequential completion.
            if self.current_step + 1 < self.sequence.len() {
                self.move_to(self.current_step + 1, store);
            }
            // At the last index with some earlier objective still open the
            // step stays put; the recompute fallback will catch up later.
        } else {
            self.recompute(store);
        }
    }

    /// Move back to step 0 and drop the persisted hint. Completion flags
    /// are owned by the completion system and are left alone. Debug aid.
    pub fn reset<S: FlagStore>(&mut self, store: &mut S) {
        log::info!("progress tracker reset to step 0");
        self.current_step = 0;
        store.remove(STEP_HINT_KEY);
    }

    /// Project the full progress state from the store.
    pub fn state<S: FlagStore>(&self, store: &S) -> ProgressState {
        let completed = self
            .sequence
            .iter()
            .filter(|obj| store.get(&completion_key(&obj.id)).is_some())
            .map(|obj| obj.id.clone())
            .collect();
        ProgressState {
            current_step: self.current_step(),
            completed,
            is_terminal: self.terminal,
        }
    }

    /// Completion counts for the progress badge. Flags outside the
    /// sequence (other levels, unrelated features) are not counted.
    pub fn summary<S: FlagStore>(&self, store: &S) -> ProgressSummary {
        let total = self.sequence.len();
        let completed = self
            .sequence
            .iter()
            .filter(|obj| store.get(&completion_key(&obj.id)).is_some())
            .count();
        let percent = if total > 0 {
            completed as f32 / total as f32 * 100.0
        } else {
            0.0
        };
        ProgressSummary {
            completed,
            total,
            percent,
        }
    }

    /// Drain queued events for the presenter / host.
    pub fn drain_events(&mut self) -> Vec<ProgressEvent> {
        std::mem::take(&mut self.events)
    }

    fn move_to<S: FlagStore>(&mut self, target: usize, store: &mut S) {
        let from = self.current_step;
        self.current_step = target;
        store.set(STEP_HINT_KEY, &target.to_string(), self.ttl);
        self.events.push(ProgressEvent::StepChanged { from, to: target });
    }

    fn enter_terminal(&mut self) {
        self.terminal = true;
        if !self.terminal_announced {
            self.terminal_announced = true;
            log::info!("all objectives complete");
            self.events.push(ProgressEvent::TerminalReached);
        }
    }

    fn all_complete<S: FlagStore>(&self, store: &S) -> bool {
        let flagged = store.get_all(OBJECTIVE_FLAG_PREFIX);
        self.sequence
            .iter()
            .all(|obj| flagged.iter().any(|(id, _)| id == &obj.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Objective;
    use crate::store::MemoryStore;
    use glam::Vec2;

    fn sequence(ids: &[&str]) -> ObjectiveSequence {
        ObjectiveSequence::new(
            ids.iter()
                .map(|id| Objective {
                    id: id.to_string(),
                    anchor: Vec2::splat(0.5),
                    offset: Vec2::new(0.0, -60.0),
                })
                .collect(),
        )
        .unwrap()
    }

    fn complete(store: &mut MemoryStore, id: &str) {
        store.set(&completion_key(id), COMPLETED_VALUE, DEFAULT_FLAG_TTL);
    }

    #[test]
    fn fresh_store_starts_at_step_zero() {
        let mut store = MemoryStore::new();
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);
        assert_eq!(tracker.current_step(), Some(0));
        assert!(!tracker.is_terminal());
        assert!(tracker.drain_events().is_empty());
    }

    #[test]
    fn recompute_finds_first_incomplete() {
        let mut store = MemoryStore::new();
        complete(&mut store, "A");
        complete(&mut store, "B");
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);
        assert_eq!(tracker.current_step(), Some(2));
        assert_eq!(
            tracker.drain_events(),
            vec![ProgressEvent::StepChanged { from: 0, to: 2 }]
        );
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut store = MemoryStore::new();
        complete(&mut store, "A");
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);
        let first = tracker.state(&store);
        tracker.drain_events();

        tracker.recompute(&mut store);
        assert_eq!(tracker.state(&store), first);
        assert!(tracker.drain_events().is_empty());
    }

    #[test]
    fn out_of_order_completion_does_not_advance() {
        let mut store = MemoryStore::new();
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);

        complete(&mut store, "C");
        tracker.on_objective_completed("C", &mut store);
        assert_eq!(tracker.current_step(), Some(0));
        assert!(tracker.drain_events().is_empty());
    }

    #[test]
    fn sequential_fast_path_advances_one_step() {
        let mut store = MemoryStore::new();
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);

        complete(&mut store, "A");
        tracker.on_objective_completed("A", &mut store);
        assert_eq!(tracker.current_step(), Some(1));
        assert_eq!(
            tracker.drain_events(),
            vec![ProgressEvent::StepChanged { from: 0, to: 1 }]
        );
        assert_eq!(store.get(STEP_HINT_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn completing_everything_reaches_terminal_once() {
        let mut store = MemoryStore::new();
        let mut tracker = ProgressTracker::new(sequence(&["A", "B"]));
        tracker.initialize(&mut store);

        complete(&mut store, "A");
        tracker.on_objective_completed("A", &mut store);
        complete(&mut store, "B");
        tracker.on_objective_completed("B", &mut store);

        assert!(tracker.is_terminal());
        assert_eq!(tracker.current_step(), None);
        let events = tracker.drain_events();
        assert_eq!(
            events,
            vec![
                ProgressEvent::StepChanged { from: 0, to: 1 },
                ProgressEvent::TerminalReached,
            ]
        );

        // Repeated completions after terminal never re-fire the event.
        tracker.on_objective_completed("A", &mut store);
        tracker.on_objective_completed("B", &mut store);
        tracker.recompute(&mut store);
        assert!(tracker.drain_events().is_empty());
        assert!(tracker.is_terminal());
    }

    #[test]
    fn completing_current_step_with_rest_already_done_goes_terminal() {
        let mut store = MemoryStore::new();
        complete(&mut store, "B");
        complete(&mut store, "C");
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);
        tracker.drain_events();
        assert_eq!(tracker.current_step(), Some(0));

        complete(&mut store, "A");
        tracker.on_objective_completed("A", &mut store);
        assert!(tracker.is_terminal());
        assert_eq!(tracker.drain_events(), vec![ProgressEvent::TerminalReached]);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut store = MemoryStore::new();
        let mut tracker = ProgressTracker::new(sequence(&["A", "B"]));
        tracker.initialize(&mut store);
        let before = tracker.state(&store);

        tracker.on_objective_completed("nonexistent", &mut store);
        assert_eq!(tracker.state(&store), before);
        assert!(tracker.drain_events().is_empty());
    }

    #[test]
    fn empty_sequence_is_immediately_terminal() {
        let mut store = MemoryStore::new();
        let mut tracker = ProgressTracker::new(sequence(&[]));
        tracker.initialize(&mut store);
        assert!(tracker.is_terminal());
        assert_eq!(tracker.current_step(), None);
        assert_eq!(tracker.drain_events(), vec![ProgressEvent::TerminalReached]);
    }

    #[test]
    fn corrupt_hint_is_clamped() {
        let mut store = MemoryStore::new();
        store.set(STEP_HINT_KEY, "garbage", DEFAULT_FLAG_TTL);
        let mut tracker = ProgressTracker::new(sequence(&["A", "B"]));
        tracker.initialize(&mut store);
        assert_eq!(tracker.current_step(), Some(0));
    }

    #[test]
    fn out_of_range_hint_never_overrides_flags() {
        let mut store = MemoryStore::new();
        store.set(STEP_HINT_KEY, "99", DEFAULT_FLAG_TTL);
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);
        // Clamped to the last index, then the flag scan pulls it back to 0.
        assert_eq!(tracker.current_step(), Some(0));
    }

    #[test]
    fn reset_clears_hint_but_not_flags() {
        let mut store = MemoryStore::new();
        complete(&mut store, "A");
        let mut tracker = ProgressTracker::new(sequence(&["A", "B"]));
        tracker.initialize(&mut store);
        tracker.drain_events();

        tracker.reset(&mut store);
        assert_eq!(tracker.current_step(), Some(0));
        assert_eq!(store.get(STEP_HINT_KEY), None);
        assert!(store.get(&completion_key("A")).is_some());

        // The flags win again on the next recompute.
        tracker.recompute(&mut store);
        assert_eq!(tracker.current_step(), Some(1));
    }

    #[test]
    fn summary_counts_only_sequence_flags() {
        let mut store = MemoryStore::new();
        complete(&mut store, "A");
        complete(&mut store, "SomeOtherLevel");
        let tracker = ProgressTracker::new(sequence(&["A", "B", "C", "D"]));

        let summary = tracker.summary(&store);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.total, 4);
        assert!((summary.percent - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn state_lists_completed_in_sequence_order() {
        let mut store = MemoryStore::new();
        complete(&mut store, "C");
        complete(&mut store, "A");
        let mut tracker = ProgressTracker::new(sequence(&["A", "B", "C"]));
        tracker.initialize(&mut store);

        let state = tracker.state(&store);
        assert_eq!(state.completed, vec!["A".to_string(), "C".to_string()]);
        assert_eq!(state.current_step, Some(1));
        assert!(!state.is_terminal);
    }

    #[test]
    fn hint_ttl_uses_configured_value() {
        let mut store = MemoryStore::new();
        complete(&mut store, "A");
        let mut tracker =
            ProgressTracker::new(sequence(&["A", "B"])).with_ttl(Duration::from_secs(7));
        tracker.initialize(&mut store);
        assert_eq!(store.ttl_of(STEP_HINT_KEY), Some(Duration::from_secs(7)));
    }
}
