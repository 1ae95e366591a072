use std::collections::HashSet;

use log::{debug, trace, warn};

use super::{KeyEvent, KeyState, LayerState, OutputSink};
use crate::error::{Error, Result};
use crate::types::{ActionTables, KeyCode, LayerControl, PrimitiveOp};

/// What happens to releases and autorepeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Only presses are dispatched; every release and repeat is forwarded raw
    #[default]
    PassThrough,
    /// Releases and repeats of a key whose press ran an action are dropped
    SuppressRemapped,
}

/// Result of processing one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A compiled action ran on the given layer
    Dispatched { layer: i32 },
    /// The raw event was forwarded unchanged
    PassedThrough,
    /// The event was swallowed
    Suppressed,
}

/// Counters from [`Dispatcher::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub dispatched: usize,
    pub passed_through: usize,
    pub suppressed: usize,
    pub failed: usize,
}

/// Selects and executes the compiled action for each key event
pub struct Dispatcher {
    tables: ActionTables,
    layer: LayerState,
    policy: DispatchPolicy,
    /// Keys whose last press was remapped (only tracked with `SuppressRemapped`)
    remapped_held: HashSet<KeyCode>,
}

impl Dispatcher {
    pub fn new(tables: ActionTables, layer: LayerState, policy: DispatchPolicy) -> Self {
        Self {
            tables,
            layer,
            policy,
            remapped_held: HashSet::new(),
        }
    }

    /// Dispatcher starting on layer 0 with one valid layer per table
    pub fn with_tables(tables: ActionTables) -> Self {
        let layer = LayerState::for_layer_count(tables.layer_count());
        Self::new(tables, layer, DispatchPolicy::default())
    }

    pub fn layer(&self) -> &LayerState {
        &self.layer
    }

    /// Process one input event against `sink`
    pub fn process<S>(&mut self, event: &KeyEvent, sink: &mut S) -> Result<Outcome>
    where
        S: OutputSink + ?Sized,
    {
        if event.state != KeyState::Pressed {
            if self.policy == DispatchPolicy::SuppressRemapped && self.remapped_held.contains(&event.code) {
                if event.state == KeyState::Released {
                    self.remapped_held.remove(&event.code);
                }
                return Ok(Outcome::Suppressed);
            }
            return pass_through(event, sink);
        }

        let current = self.layer.current();
        let action = usize::try_from(current)
            .ok()
            .and_then(|layer| self.tables.get(layer, event.code));

        let Some(action) = action else {
            self.remapped_held.remove(&event.code);
            return pass_through(event, sink);
        };

        trace!("Scancode {} on layer {} -> {:?}", event.code.0, current, action.source);
        if self.policy == DispatchPolicy::SuppressRemapped {
            self.remapped_held.insert(event.code);
        }

        for op in &action.ops {
            match op {
                PrimitiveOp::Key { code, direction } => {
                    sink.emit_key(*code, *direction).map_err(Error::Sink)?;
                }
                PrimitiveOp::Layer(control) => apply_layer_control(&mut self.layer, control),
                PrimitiveOp::Noop => {}
                PrimitiveOp::Sync => sink.sync().map_err(Error::Sink)?,
            }
        }

        Ok(Outcome::Dispatched { layer: current })
    }

    /// Process a stream of events. A failing event is logged and skipped;
    /// the loop only ends when the stream does.
    pub fn run<I, S>(&mut self, events: I, sink: &mut S) -> RunStats
    where
        I: IntoIterator<Item = KeyEvent>,
        S: OutputSink + ?Sized,
    {
        let mut stats = RunStats::default();
        for event in events {
            match self.process(&event, sink) {
                Ok(Outcome::Dispatched { .. }) => stats.dispatched += 1,
                Ok(Outcome::PassedThrough) => stats.passed_through += 1,
                Ok(Outcome::Suppressed) => stats.suppressed += 1,
                Err(e) => {
                    warn!("Failed to handle scancode {} ({:?}): {}", event.code.0, event.state, e);
                    stats.failed += 1;
                }
            }
        }
        stats
    }
}

fn pass_through<S>(event: &KeyEvent, sink: &mut S) -> Result<Outcome>
where
    S: OutputSink + ?Sized,
{
    sink.emit_raw(event).map_err(Error::Sink)?;
    sink.sync().map_err(Error::Sink)?;
    Ok(Outcome::PassedThrough)
}

fn apply_layer_control(layer: &mut LayerState, control: &LayerControl) {
    let before = layer.current();
    match control {
        LayerControl::IncBy(n) => layer.inc(*n),
        LayerControl::DecBy(n) => layer.dec(*n),
        LayerControl::SetTo(n) => layer.set(*n),
        LayerControl::RotateAmong(layers) => layer.rotate(layers),
    }
    if layer.current() != before {
        debug!("Layer {} -> {}", before, layer.current());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OutputEvent;
    use crate::types::{BindingKind, BindingSource, CompiledAction};

    fn layer_action(control: LayerControl) -> CompiledAction {
        CompiledAction::new(
            BindingSource {
                kind: BindingKind::SetLayer,
                payload: String::new(),
            },
            vec![PrimitiveOp::Layer(control), PrimitiveOp::Sync],
        )
    }

    #[test]
    fn test_layer_action_emits_only_sync() {
        let mut tables = ActionTables::with_layers(3);
        tables.insert(0, KeyCode::TAB, layer_action(LayerControl::IncBy(1)));
        let mut dispatcher = Dispatcher::with_tables(tables);
        let mut sink: Vec<OutputEvent> = Vec::new();

        let outcome = dispatcher.process(&KeyEvent::pressed(KeyCode::TAB), &mut sink).unwrap();
        assert_eq!(outcome, Outcome::Dispatched { layer: 0 });
        assert_eq!(dispatcher.layer().current(), 1);
        assert_eq!(sink, vec![OutputEvent::Sync]);
    }

    #[test]
    fn test_release_passes_through_by_default() {
        let mut tables = ActionTables::with_layers(1);
        tables.insert(0, KeyCode::TAB, layer_action(LayerControl::IncBy(1)));
        let mut dispatcher = Dispatcher::with_tables(tables);
        let mut sink: Vec<OutputEvent> = Vec::new();

        dispatcher.process(&KeyEvent::pressed(KeyCode::TAB), &mut sink).unwrap();
        let outcome = dispatcher.process(&KeyEvent::released(KeyCode::TAB), &mut sink).unwrap();
        assert_eq!(outcome, Outcome::PassedThrough);
        assert_eq!(sink, vec![OutputEvent::Sync, OutputEvent::up(KeyCode::TAB), OutputEvent::Sync]);
    }
}
