pub mod lexer;
pub mod builder;
pub mod compiler;
pub mod describe;

pub use compiler::{CompileReport, Compiler, Diagnostic, MAX_LAYERS};
pub use describe::describe;

use std::path::Path;

use remappy_core::{Binding, CompileError, CompiledAction, ConfigStore, Configuration};

/// Compile a configuration with the default modifier set
pub fn compile_config(config: &Configuration) -> CompileReport {
    Compiler::new().compile(config)
}

pub fn compile_binding(binding: &Binding) -> Result<CompiledAction, CompileError> {
    Compiler::new().compile_binding(binding)
}

pub fn compile_file(path: &Path) -> remappy_core::Result<CompileReport> {
    // Load the configuration strictly, a parse error is not an empty config here
    let config = ConfigStore::new(path).load()?;

    Ok(compile_config(&config))
}
