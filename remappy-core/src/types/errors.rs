use thiserror::Error;

/// Problems found while compiling a single binding.
///
/// None of these abort a compile: the table compiler turns the offending
/// binding into a no-op and reports the error alongside the tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Parse error in {dialect} payload {payload:?}: {message}")]
    Parse {
        dialect: &'static str,
        payload: String,
        message: String,
    },

    #[error("Unknown key name: {0:?}")]
    UnknownKey(String),

    #[error("Layer {0} is out of range")]
    LayerOutOfRange(i32),

    #[error("Unknown layer command: {0:?}")]
    UnknownVerb(String),

    #[error("Layer command '{0}' is missing its argument")]
    MissingArgument(String),

    #[error("Invalid argument {argument:?} for layer command '{verb}'")]
    InvalidArgument { verb: String, argument: String },
}
