use log::{debug, warn};
use remappy_core::{
    ActionTables, Binding, BindingKind, CompileError, CompiledAction, Configuration, KeyCode, ModifierSet,
    PrimitiveOp,
};

use crate::builder::{LayerBuilder, MapBuilder};
use crate::lexer::{LayerLexer, MacroLexer, ShortLexer};

/// Highest layer count a configuration may ask for
pub const MAX_LAYERS: usize = 256;

/// A compile error attached to the binding that raised it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub input: u16,
    pub layer: i32,
    pub error: CompileError,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scancode {} layer {}: {}", self.input, self.layer, self.error)
    }
}

/// Output of a table compile: the tables, plus every error that was absorbed
#[derive(Debug, Clone, Default)]
pub struct CompileReport {
    pub tables: ActionTables,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct Compiler {
    modifiers: ModifierSet,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            modifiers: ModifierSet::canonical(),
        }
    }

    /// Compile every binding of `config` into per-layer action tables.
    ///
    /// Never fails. Bindings with an unusable layer are skipped, bindings that
    /// do not compile become `[Noop, Sync]`; both are listed in the report.
    pub fn compile(&self, config: &Configuration) -> CompileReport {
        let mut diagnostics = Vec::new();

        let mut accepted = Vec::with_capacity(config.len());
        for binding in config.bindings() {
            match layer_index(binding.layer) {
                Some(index) => accepted.push((index, binding)),
                None => {
                    warn!("Skipping scancode {}: layer {} is out of range", binding.input, binding.layer);
                    diagnostics.push(Diagnostic {
                        input: binding.input,
                        layer: binding.layer,
                        error: CompileError::LayerOutOfRange(binding.layer),
                    });
                }
            }
        }

        let layer_count = accepted.iter().map(|(index, _)| index + 1).max().unwrap_or(1);
        let mut tables = ActionTables::with_layers(layer_count);

        for (index, binding) in accepted {
            let action = match self.compile_binding(binding) {
                Ok(action) => action,
                Err(error) => {
                    warn!(
                        "Scancode {} layer {} ({} {:?}): {}",
                        binding.input, binding.layer, binding.kind, binding.payload, error
                    );
                    diagnostics.push(Diagnostic {
                        input: binding.input,
                        layer: binding.layer,
                        error,
                    });
                    CompiledAction::noop(binding.source())
                }
            };

            if tables.insert(index, KeyCode(binding.input), action).is_some() {
                debug!("Scancode {} layer {} bound twice, keeping the later one", binding.input, binding.layer);
            }
        }

        CompileReport { tables, diagnostics }
    }

    /// Compile one binding into its operation list, `Sync` included
    pub fn compile_binding(&self, binding: &Binding) -> Result<CompiledAction, CompileError> {
        let mut ops = match binding.kind {
            BindingKind::Short => {
                let tokens = ShortLexer::new(&binding.payload).collect_all()?;
                MapBuilder::resolve(&MapBuilder::new(&self.modifiers).build(&tokens))?
            }
            BindingKind::Macro => {
                let tokens = MacroLexer::new(&binding.payload).collect_all();
                MapBuilder::resolve(&MapBuilder::new(&self.modifiers).build(&tokens))?
            }
            BindingKind::SetLayer => {
                let tokens = LayerLexer::new(&binding.payload).collect_all()?;
                vec![PrimitiveOp::Layer(LayerBuilder::try_build(&tokens)?)]
            }
        };
        ops.push(PrimitiveOp::Sync);

        Ok(CompiledAction::new(binding.source(), ops))
    }
}

fn layer_index(layer: i32) -> Option<usize> {
    usize::try_from(layer).ok().filter(|&index| index < MAX_LAYERS)
}
