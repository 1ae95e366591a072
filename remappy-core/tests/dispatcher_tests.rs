mod common;

use common::dispatcher_for;
use pretty_assertions::assert_eq;
use remappy_core::engine::{Outcome, RunStats};
use remappy_core::{
    Binding, Configuration, DispatchPolicy, KeyCode, KeyEvent, OutputEvent, OutputSink, Direction,
};

#[test]
fn test_remapped_press_and_unmapped_pass_through() {
    let config = Configuration::from_bindings(vec![Binding::short(30, 0, "b")]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::PassThrough);
    let mut sink: Vec<OutputEvent> = Vec::new();

    let outcome = dispatcher.process(&KeyEvent::pressed(KeyCode(30)), &mut sink).unwrap();
    assert_eq!(outcome, Outcome::Dispatched { layer: 0 });
    assert_eq!(
        sink,
        vec![OutputEvent::down(KeyCode::B), OutputEvent::up(KeyCode::B), OutputEvent::Sync]
    );

    sink.clear();
    let outcome = dispatcher.process(&KeyEvent::pressed(KeyCode(31)), &mut sink).unwrap();
    assert_eq!(outcome, Outcome::PassedThrough);
    assert_eq!(sink, vec![OutputEvent::down(KeyCode(31)), OutputEvent::Sync]);
}

#[test]
fn test_identity_remap_replays_key() {
    let config = Configuration::from_bindings(vec![Binding::short(30, 0, "a")]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::PassThrough);
    let mut sink: Vec<OutputEvent> = Vec::new();

    let outcome = dispatcher.process(&KeyEvent::pressed(KeyCode(30)), &mut sink).unwrap();
    assert_eq!(outcome, Outcome::Dispatched { layer: 0 });
    assert_eq!(
        sink,
        vec![OutputEvent::down(KeyCode::A), OutputEvent::up(KeyCode::A), OutputEvent::Sync]
    );

    sink.clear();
    let outcome = dispatcher.process(&KeyEvent::pressed(KeyCode(31)), &mut sink).unwrap();
    assert_eq!(outcome, Outcome::PassedThrough);
    assert_eq!(sink, vec![OutputEvent::down(KeyCode(31)), OutputEvent::Sync]);
}

#[test]
fn test_layer_switch_changes_table() {
    let config = Configuration::from_bindings(vec![
        Binding::set_layer(15, 0, "inc 1"),
        Binding::short(30, 0, "b"),
        Binding::short(30, 1, "c"),
        Binding::set_layer(15, 1, "dec 1"),
    ]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::PassThrough);
    let mut sink: Vec<OutputEvent> = Vec::new();

    dispatcher.process(&KeyEvent::pressed(KeyCode::TAB), &mut sink).unwrap();
    assert_eq!(dispatcher.layer().current(), 1);

    sink.clear();
    dispatcher.process(&KeyEvent::pressed(KeyCode(30)), &mut sink).unwrap();
    assert_eq!(
        sink,
        vec![OutputEvent::down(KeyCode::C), OutputEvent::up(KeyCode::C), OutputEvent::Sync]
    );

    dispatcher.process(&KeyEvent::pressed(KeyCode::TAB), &mut sink).unwrap();
    assert_eq!(dispatcher.layer().current(), 0);
}

#[test]
fn test_inc_clamps_at_highest_layer() {
    // layers 0..=2 exist because of the binding on layer 2
    let config = Configuration::from_bindings(vec![
        Binding::set_layer(15, 0, "inc 1"),
        Binding::set_layer(15, 1, "inc 1"),
        Binding::set_layer(15, 2, "inc 1"),
    ]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::PassThrough);
    let mut sink: Vec<OutputEvent> = Vec::new();

    let layers: Vec<i32> = (0..4)
        .map(|_| {
            dispatcher.process(&KeyEvent::pressed(KeyCode::TAB), &mut sink).unwrap();
            dispatcher.layer().current()
        })
        .collect();
    assert_eq!(layers, vec![1, 2, 2, 2]);
}

#[test]
fn test_layer_without_binding_passes_through() {
    let config = Configuration::from_bindings(vec![
        Binding::set_layer(15, 0, "set 1"),
        Binding::short(30, 0, "b"),
        Binding::short(31, 1, "c"),
    ]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::PassThrough);
    let mut sink: Vec<OutputEvent> = Vec::new();

    dispatcher.process(&KeyEvent::pressed(KeyCode::TAB), &mut sink).unwrap();
    sink.clear();

    let outcome = dispatcher.process(&KeyEvent::pressed(KeyCode(30)), &mut sink).unwrap();
    assert_eq!(outcome, Outcome::PassedThrough);
    assert_eq!(sink, vec![OutputEvent::down(KeyCode(30)), OutputEvent::Sync]);
}

#[test]
fn test_suppress_remapped_drops_release_and_repeat() {
    let config = Configuration::from_bindings(vec![Binding::short(30, 0, "b")]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::SuppressRemapped);
    let mut sink: Vec<OutputEvent> = Vec::new();

    let stats = dispatcher.run(
        vec![
            KeyEvent::pressed(KeyCode(30)),
            KeyEvent::repeated(KeyCode(30)),
            KeyEvent::released(KeyCode(30)),
            KeyEvent::released(KeyCode(31)),
        ],
        &mut sink,
    );

    assert_eq!(
        stats,
        RunStats {
            dispatched: 1,
            passed_through: 1,
            suppressed: 2,
            failed: 0,
        }
    );
    assert_eq!(
        sink,
        vec![
            OutputEvent::down(KeyCode::B),
            OutputEvent::up(KeyCode::B),
            OutputEvent::Sync,
            OutputEvent::up(KeyCode(31)),
            OutputEvent::Sync,
        ]
    );
}

#[test]
fn test_pass_through_policy_forwards_release() {
    let config = Configuration::from_bindings(vec![Binding::short(30, 0, "b")]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::PassThrough);
    let mut sink: Vec<OutputEvent> = Vec::new();

    let stats = dispatcher.run(vec![KeyEvent::pressed(KeyCode(30)), KeyEvent::released(KeyCode(30))], &mut sink);

    assert_eq!(stats.dispatched, 1);
    assert_eq!(stats.passed_through, 1);
    assert_eq!(&sink[3..], &[OutputEvent::up(KeyCode(30)), OutputEvent::Sync]);
}

/// Sink that fails every write
struct BrokenSink;

impl OutputSink for BrokenSink {
    fn emit_key(&mut self, _code: KeyCode, _direction: Direction) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
    }

    fn emit_raw(&mut self, _event: &KeyEvent) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
    }

    fn sync(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
    }
}

#[test]
fn test_run_continues_after_sink_failure() {
    let config = Configuration::from_bindings(vec![Binding::set_layer(15, 0, "inc 1"), Binding::short(30, 1, "b")]);
    let mut dispatcher = dispatcher_for(&config, DispatchPolicy::PassThrough);

    let stats = dispatcher.run(
        vec![KeyEvent::pressed(KeyCode::TAB), KeyEvent::pressed(KeyCode(30)), KeyEvent::pressed(KeyCode(31))],
        &mut BrokenSink,
    );

    assert_eq!(stats.failed, 3);
    // the layer op runs before the sync that failed
    assert_eq!(dispatcher.layer().current(), 1);
}
