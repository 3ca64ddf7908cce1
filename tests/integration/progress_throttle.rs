use crate::integration::test_utils::*;
use rendition::context::Context;
use rendition::engine::Engine;
use rendition::progress::ManualClock;
use std::sync::Arc;

const TABLE: &str = r#"
[speech.roles."progress bar"]
unfocused = "progressBarIndex + progressBarValue"
focused = "labelAndName + progressBarValue"
"#;

fn setup() -> (Engine<NodeId>, Arc<ManualClock>, Arc<Tree>) {
    let tree = Arc::new(
        Tree::new()
            .with(10, Node::new("progress bar").name("Download").percent(40))
            .with(11, Node::new("progress bar").name("Upload").percent(10)),
    );
    let (engine, clock) = engine(tree.clone(), table(TABLE), standard_registry());
    (engine, clock, tree)
}

fn update() -> Context {
    Context::new().progress_update()
}

#[test]
fn throttle_decision_rule() {
    let (engine, clock, _tree) = setup();
    engine.record_progress(&10, Some(40), Some(T0));

    assert!(!engine.should_present_progress(&10, 40));

    clock.advance(1);
    assert!(!engine.should_present_progress(&10, 41));
    assert!(engine.should_present_progress(&10, 100));

    clock.set(T0 + INTERVAL_MS);
    assert!(engine.should_present_progress(&10, 55));
}

#[test]
fn presented_updates_are_recorded_and_throttled() {
    let (engine, clock, tree) = setup();

    assert_eq!(texts(&engine.resolve(&10, update())), vec!["40 percent"]);
    let (_, entry) = engine.most_recent_progress().unwrap();
    assert_eq!(entry.updated_at_ms, Some(T0));
    assert_eq!(entry.value, Some(40));

    tree.set_percent(10, 45);
    clock.advance(1);
    assert!(engine.resolve(&10, update()).is_empty());

    clock.advance(INTERVAL_MS);
    assert_eq!(texts(&engine.resolve(&10, update())), vec!["45 percent"]);
}

#[test]
fn completion_always_presents() {
    let (engine, clock, tree) = setup();

    engine.resolve(&10, update());
    tree.set_percent(10, 100);
    clock.advance(1);

    assert_eq!(texts(&engine.resolve(&10, update())), vec!["100 percent"]);
}

#[test]
fn ordinary_presentations_are_not_throttled() {
    let (engine, _clock, _tree) = setup();

    let context = Context::new().focused(true);
    assert_eq!(
        texts(&engine.resolve(&10, context.clone())),
        vec!["Download", "40 percent"]
    );
    assert_eq!(
        texts(&engine.resolve(&10, context)),
        vec!["Download", "40 percent"]
    );
    assert!(engine.most_recent_progress().is_none());
}

#[test]
fn several_bars_are_numbered() {
    let (engine, clock, _tree) = setup();

    assert_eq!(texts(&engine.resolve(&10, update())), vec!["40 percent"]);
    clock.advance(5);
    assert_eq!(
        texts(&engine.resolve(&11, update())),
        vec!["progress bar 2 of 2", "10 percent"]
    );

    let (latest, entry) = engine.most_recent_progress().unwrap();
    assert_eq!(latest, 11);
    assert_eq!(entry.updated_at_ms, Some(T0 + 5));
}

#[test]
fn dead_bars_are_pruned_on_access() {
    let (engine, _clock, tree) = setup();
    engine.resolve(&10, update());
    engine.resolve(&11, update());
    assert_eq!(engine.progress_number_and_count(&11), (2, 2));

    tree.kill(10);

    assert_eq!(engine.progress_number_and_count(&11), (1, 1));
}
