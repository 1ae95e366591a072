use remappy_core::{CompileError, Direction, KeyCode, ModifierSet, PrimitiveOp};

/// A key press or release still in symbolic (unresolved) form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    pub symbol: String,
    pub direction: Direction,
}

impl Stroke {
    pub fn down(symbol: &str) -> Self {
        Self { symbol: symbol.to_string(), direction: Direction::Down }
    }

    pub fn up(symbol: &str) -> Self {
        Self { symbol: symbol.to_string(), direction: Direction::Up }
    }
}

/// Expands combo and macro tokens into press/hold/release strokes.
///
/// Modifiers are pressed when seen and held until the next literal key has
/// been tapped, then released last-pressed first.
pub struct MapBuilder<'m> {
    modifiers: &'m ModifierSet,
}

impl<'m> MapBuilder<'m> {
    pub fn new(modifiers: &'m ModifierSet) -> Self {
        Self { modifiers }
    }

    pub fn build<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<Stroke> {
        let mut strokes = Vec::with_capacity(tokens.len() * 2);
        let mut held: Vec<Stroke> = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            if self.modifiers.contains(token) {
                strokes.push(Stroke::down(token));
                held.push(Stroke::up(token));
            } else {
                strokes.push(Stroke::down(token));
                strokes.push(Stroke::up(token));
                while let Some(release) = held.pop() {
                    strokes.push(release);
                }
            }
        }

        // trailing modifiers with no key after them
        while let Some(release) = held.pop() {
            strokes.push(release);
        }

        strokes
    }

    /// Resolve symbolic strokes into key operations
    pub fn resolve(strokes: &[Stroke]) -> Result<Vec<PrimitiveOp>, CompileError> {
        strokes
            .iter()
            .map(|stroke| {
                let code = KeyCode::from_name(&stroke.symbol)
                    .ok_or_else(|| CompileError::UnknownKey(stroke.symbol.clone()))?;
                Ok(PrimitiveOp::Key { code, direction: stroke.direction })
            })
            .collect()
    }
}
