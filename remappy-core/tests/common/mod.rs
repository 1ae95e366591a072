use std::collections::VecDeque;
use std::io;

use remappy_compiler::compile_config;
use remappy_core::config::CapturePrompt;
use remappy_core::{BindingKind, Configuration, DispatchPolicy, Dispatcher, LayerState};

/// Dispatcher over the compiled form of `config`, starting on layer 0
#[allow(dead_code)]
pub fn dispatcher_for(config: &Configuration, policy: DispatchPolicy) -> Dispatcher {
    let report = compile_config(config);
    assert!(report.is_clean(), "unexpected diagnostics: {:?}", report.diagnostics);
    let layer = LayerState::for_layer_count(report.tables.layer_count());
    Dispatcher::new(report.tables, layer, policy)
}

/// Prompt that replays canned answers in order
#[allow(dead_code)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, question: String) -> io::Result<String> {
        self.asked.push(question);
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

impl CapturePrompt for ScriptedPrompt {
    fn layer(&mut self, input: u16) -> io::Result<String> {
        self.next(format!("layer {}", input))
    }

    fn kind(&mut self, input: u16) -> io::Result<String> {
        self.next(format!("kind {}", input))
    }

    fn payload(&mut self, kind: BindingKind) -> io::Result<String> {
        self.next(format!("payload {}", kind))
    }
}
