use std::io;

use log::{info, warn};

use super::{Binding, Configuration};
use crate::error::Result;
use crate::types::BindingKind;

/// Source of operator answers during configuration capture.
///
/// Each method returns the raw answer line; interpretation happens in
/// [`capture`] so every front end behaves the same.
pub trait CapturePrompt {
    /// Layer to map `input` in. A blank answer means layer 0.
    fn layer(&mut self, input: u16) -> io::Result<String>;

    /// Binding kind for `input`: `s`, `m` or `l`
    fn kind(&mut self, input: u16) -> io::Result<String>;

    /// Payload text for the chosen kind
    fn payload(&mut self, kind: BindingKind) -> io::Result<String>;
}

/// Ask the operator how to map `input` and upsert the answer.
///
/// Returns the stored binding, or `None` when the operator cancelled by
/// giving an invalid layer or kind; the configuration is then untouched.
pub fn capture<P>(config: &mut Configuration, input: u16, prompt: &mut P) -> Result<Option<Binding>>
where
    P: CapturePrompt + ?Sized,
{
    let answer = prompt.layer(input)?;
    let answer = answer.trim();
    let layer = if answer.is_empty() {
        0
    } else {
        match answer.parse::<i32>() {
            Ok(layer) if layer >= 0 => layer,
            _ => {
                warn!("Invalid layer {:?} for scancode {}, skipping", answer, input);
                return Ok(None);
            }
        }
    };

    let Some(kind) = BindingKind::from_letter(&prompt.kind(input)?) else {
        // no choice made, leave any existing binding alone
        return Ok(None);
    };

    let payload = prompt.payload(kind)?;
    let payload = payload.trim_end_matches(&['\r', '\n'][..]);

    let binding = Binding::new(input, layer, kind, payload);
    if config.upsert(binding.clone()).is_some() {
        info!("Replaced binding for scancode {} on layer {}", input, layer);
    } else {
        info!("Added binding for scancode {} on layer {}", input, layer);
    }
    Ok(Some(binding))
}
