use log::warn;
use remappy_core::{CompileError, LayerControl, PrimitiveOp};

use crate::lexer::LayerToken;

/// Turns layer-command tokens into a single layer operation.
///
/// | verb          | effect                              |
/// |---------------|-------------------------------------|
/// | `inc N`       | raise the layer by N, clamped       |
/// | `dec N`       | lower the layer by N, clamped       |
/// | `set N`       | jump to N if it is a valid layer    |
/// | `alt`/`rot L` | step through the listed layers      |
///
/// Arguments past the ones a verb needs are ignored.
pub struct LayerBuilder;

impl LayerBuilder {
    pub fn try_build(tokens: &[LayerToken]) -> Result<LayerControl, CompileError> {
        let (verb, args) = match tokens.split_first() {
            Some((LayerToken::Word(verb), args)) => (verb.as_str(), args),
            Some((LayerToken::Number(n), _)) => return Err(CompileError::UnknownVerb(n.to_string())),
            Some((LayerToken::Whitespace, _)) | None => return Err(CompileError::UnknownVerb(String::new())),
        };

        match verb {
            "inc" => Ok(LayerControl::IncBy(single_argument(verb, args)?)),
            "dec" => Ok(LayerControl::DecBy(single_argument(verb, args)?)),
            "set" => Ok(LayerControl::SetTo(single_argument(verb, args)?)),
            "alt" | "rot" => {
                let layers = args
                    .iter()
                    .map(|token| number(verb, token))
                    .collect::<Result<Vec<_>, _>>()?;
                if layers.is_empty() {
                    return Err(CompileError::MissingArgument(verb.to_string()));
                }
                Ok(LayerControl::RotateAmong(layers))
            }
            other => Err(CompileError::UnknownVerb(other.to_string())),
        }
    }

    /// Build the operation, falling back to `Noop` for anything invalid
    pub fn build(tokens: &[LayerToken]) -> PrimitiveOp {
        match Self::try_build(tokens) {
            Ok(control) => PrimitiveOp::Layer(control),
            Err(e) => {
                warn!("{}; treating as no-op", e);
                PrimitiveOp::Noop
            }
        }
    }
}

fn single_argument(verb: &str, args: &[LayerToken]) -> Result<i32, CompileError> {
    match args.first() {
        Some(token) => number(verb, token),
        None => Err(CompileError::MissingArgument(verb.to_string())),
    }
}

fn number(verb: &str, token: &LayerToken) -> Result<i32, CompileError> {
    match token {
        LayerToken::Number(n) => Ok(*n),
        LayerToken::Word(word) => Err(CompileError::InvalidArgument {
            verb: verb.to_string(),
            argument: word.clone(),
        }),
        LayerToken::Whitespace => Err(CompileError::MissingArgument(verb.to_string())),
    }
}
