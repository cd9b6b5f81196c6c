//! End-to-end progression scenarios: flag store feeding the tracker,
//! tracker events driving the presenter, the way a game host wires them.

use std::time::Duration;

use glam::Vec2;
use guidepost::{
    completion_key, FlagStore, GuideConfig, MarkerPresenter, MemoryStore, ObjectiveSequence,
    ProgressEvent, ProgressTracker, SoundCue, COMPLETED_VALUE, DEFAULT_FLAG_TTL,
};

const VIEWPORT: Vec2 = Vec2::new(1200.0, 900.0);

fn airport_like_config() -> GuideConfig {
    GuideConfig::from_json(
        r#"{
            "objectives": [
                { "id": "Stock-NPC",  "anchor": [0.17, 0.8] },
                { "id": "Casino-NPC", "anchor": [0.15, 0.25] },
                { "id": "Bank-NPC",   "anchor": [0.7, 0.75] }
            ]
        }"#,
    )
    .unwrap()
}

fn grant(store: &mut MemoryStore, tracker: &mut ProgressTracker, id: &str) {
    store.set(&completion_key(id), COMPLETED_VALUE, DEFAULT_FLAG_TTL);
    tracker.on_objective_completed(id, store);
}

fn pump(
    tracker: &mut ProgressTracker,
    presenter: &mut MarkerPresenter,
) -> Vec<ProgressEvent> {
    let events = tracker.drain_events();
    for event in &events {
        presenter.apply(event, tracker.sequence());
    }
    events
}

fn settle(presenter: &mut MarkerPresenter, seconds: f32) {
    let steps = (seconds * 60.0).ceil() as usize;
    for _ in 0..steps {
        presenter.tick(1.0 / 60.0);
    }
}

#[test]
fn full_playthrough_in_order() {
    let config = airport_like_config();
    let sequence = ObjectiveSequence::from_config(&config).unwrap();
    let mut store = MemoryStore::new();
    let mut tracker = ProgressTracker::new(sequence);
    let mut presenter = MarkerPresenter::new(VIEWPORT);

    tracker.initialize(&mut store);
    presenter.sync(&tracker.state(&store), tracker.sequence());
    assert!(pump(&mut tracker, &mut presenter).is_empty());

    // First objective: Stock-NPC at anchor (0.17, 0.8).
    assert_eq!(tracker.current_step(), Some(0));
    let first_pos = presenter.marker().pos;
    assert!((first_pos - Vec2::new(204.0, 660.0)).length() < 0.01);

    grant(&mut store, &mut tracker, "Stock-NPC");
    assert_eq!(
        pump(&mut tracker, &mut presenter),
        vec![ProgressEvent::StepChanged { from: 0, to: 1 }]
    );
    assert_eq!(presenter.drain_sounds(), vec![SoundCue::ADVANCE]);
    settle(&mut presenter, 1.0);
    assert!((presenter.marker().pos - Vec2::new(180.0, 165.0)).length() < 0.5);

    grant(&mut store, &mut tracker, "Casino-NPC");
    pump(&mut tracker, &mut presenter);
    assert_eq!(tracker.current_step(), Some(2));

    grant(&mut store, &mut tracker, "Bank-NPC");
    let events = pump(&mut tracker, &mut presenter);
    assert_eq!(events, vec![ProgressEvent::TerminalReached]);
    assert!(tracker.is_terminal());
    assert_eq!(presenter.drain_sounds(), vec![SoundCue::FANFARE]);

    settle(&mut presenter, 2.0);
    assert!(!presenter.marker().visible);

    // Granting again must stay silent.
    grant(&mut store, &mut tracker, "Stock-NPC");
    assert!(pump(&mut tracker, &mut presenter).is_empty());
}

#[test]
fn out_of_order_then_catch_up() {
    let config = airport_like_config();
    let sequence = ObjectiveSequence::from_config(&config).unwrap();
    let mut store = MemoryStore::new();
    let mut tracker = ProgressTracker::new(sequence);
    let mut presenter = MarkerPresenter::new(VIEWPORT);

    tracker.initialize(&mut store);
    presenter.sync(&tracker.state(&store), tracker.sequence());

    // Player talks to the bank first. Step must not move.
    grant(&mut store, &mut tracker, "Bank-NPC");
    assert!(pump(&mut tracker, &mut presenter).is_empty());
    assert_eq!(tracker.current_step(), Some(0));

    // Completing the actual target skips over nothing: step 0 -> 1.
    grant(&mut store, &mut tracker, "Stock-NPC");
    assert_eq!(
        pump(&mut tracker, &mut presenter),
        vec![ProgressEvent::StepChanged { from: 0, to: 1 }]
    );

    // Casino is now the target and the bank flag already exists, so this
    // grant completes the set.
    grant(&mut store, &mut tracker, "Casino-NPC");
    assert_eq!(
        pump(&mut tracker, &mut presenter),
        vec![ProgressEvent::TerminalReached]
    );
}

#[test]
fn page_reload_resumes_from_flags() {
    let config = airport_like_config();
    let mut store = MemoryStore::new();

    // First session: complete the first objective.
    {
        let sequence = ObjectiveSequence::from_config(&config).unwrap();
        let mut tracker = ProgressTracker::new(sequence);
        tracker.initialize(&mut store);
        store.set(
            &completion_key("Stock-NPC"),
            COMPLETED_VALUE,
            DEFAULT_FLAG_TTL,
        );
        tracker.on_objective_completed("Stock-NPC", &mut store);
        assert_eq!(tracker.current_step(), Some(1));
    }

    // Second session: a fresh tracker over the same store lands on the
    // same step without any completion events re-firing.
    let sequence = ObjectiveSequence::from_config(&config).unwrap();
    let mut tracker = ProgressTracker::new(sequence);
    tracker.initialize(&mut store);
    assert_eq!(tracker.current_step(), Some(1));
    assert!(tracker.drain_events().is_empty());
}

#[test]
fn hint_drift_is_corrected_on_initialize() {
    let config = airport_like_config();
    let mut store = MemoryStore::new();
    store.set("progress_step_hint", "2", Duration::from_secs(60));

    let sequence = ObjectiveSequence::from_config(&config).unwrap();
    let mut tracker = ProgressTracker::new(sequence);
    tracker.initialize(&mut store);

    // Flags say nothing is complete; the stale hint loses.
    assert_eq!(tracker.current_step(), Some(0));
    assert_eq!(
        tracker.drain_events(),
        vec![ProgressEvent::StepChanged { from: 2, to: 0 }]
    );
}

#[test]
fn suppression_and_resize_never_touch_progress() {
    let config = airport_like_config();
    let sequence = ObjectiveSequence::from_config(&config).unwrap();
    let mut store = MemoryStore::new();
    let mut tracker = ProgressTracker::new(sequence);
    let mut presenter = MarkerPresenter::new(VIEWPORT);

    tracker.initialize(&mut store);
    presenter.sync(&tracker.state(&store), tracker.sequence());
    let before = tracker.state(&store);

    presenter.set_suppressed(true);
    settle(&mut presenter, 0.5);
    presenter.set_viewport(
        Vec2::new(640.0, 480.0),
        &tracker.state(&store),
        tracker.sequence(),
    );
    presenter.set_suppressed(false);
    settle(&mut presenter, 0.5);

    assert_eq!(tracker.state(&store), before);
    assert!((presenter.marker().pos - Vec2::new(108.8, 324.0)).length() < 0.01);
}
