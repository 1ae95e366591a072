use logos::{Lexer as LogosLexer, Logos};
use remappy_core::CompileError;

use super::{ComboToken, LayerToken, MacroToken};

/// Lexer for the short (combo) dialect.
///
/// Splits on `+`. An empty payload yields no tokens; an empty segment in a
/// non-empty payload (`a++b`, `ctrl+`) is an error.
pub struct ShortLexer<'a> {
    inner: LogosLexer<'a, ComboToken>,
    pub input: &'a str,
}

impl<'a> ShortLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: ComboToken::lexer(input),
            input,
        }
    }

    /// Collect key and modifier names in order
    pub fn collect_all(mut self) -> Result<Vec<String>, CompileError> {
        if self.input.is_empty() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut segment: Option<String> = None;
        while let Some(token) = self.inner.next() {
            match token {
                Ok(ComboToken::Name(name)) => segment = Some(name),
                Ok(ComboToken::Plus) => names.push(self.finish_segment(segment.take(), names.len())?),
                Err(()) => {
                    return Err(self.error(format!("Unexpected token: '{}'", self.inner.slice())));
                }
            }
        }
        names.push(self.finish_segment(segment, names.len())?);
        Ok(names)
    }

    fn finish_segment(&self, segment: Option<String>, index: usize) -> Result<String, CompileError> {
        match segment {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(self.error(format!("Empty key name in segment {}", index + 1))),
        }
    }

    fn error(&self, message: String) -> CompileError {
        CompileError::Parse {
            dialect: "short",
            payload: self.input.to_string(),
            message,
        }
    }
}

/// Lexer for the macro dialect.
///
/// Every character is its own token except the modifier escapes `\C`, `\S`,
/// `\A` and `\M`, which become `ctrl`, `shift`, `alt` and `meta`.
pub struct MacroLexer<'a> {
    inner: LogosLexer<'a, MacroToken>,
}

impl<'a> MacroLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: MacroToken::lexer(input),
        }
    }

    pub fn collect_tokens(self) -> Vec<MacroToken> {
        self.inner.filter_map(|token| token.ok()).collect()
    }

    /// Collect symbol names in order
    pub fn collect_all(self) -> Vec<String> {
        self.collect_tokens().iter().map(MacroToken::symbol).collect()
    }
}

/// Lexer for the layer-command dialect: a verb followed by integer arguments
pub struct LayerLexer<'a> {
    inner: LogosLexer<'a, LayerToken>,
    pub input: &'a str,
}

impl<'a> LayerLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LayerToken::lexer(input),
            input,
        }
    }

    pub fn next_token(&mut self) -> Result<Option<LayerToken>, CompileError> {
        match self.inner.next() {
            Some(Ok(token)) => Ok(Some(token)),
            Some(Err(())) => Err(CompileError::Parse {
                dialect: "set_layer",
                payload: self.input.to_string(),
                message: format!("Unexpected token: '{}'", self.inner.slice()),
            }),
            None => Ok(None),
        }
    }

    pub fn collect_all(mut self) -> Result<Vec<LayerToken>, CompileError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}
