mod lexer;
mod token;

pub use lexer::{LayerLexer, MacroLexer, ShortLexer};
pub use token::{ComboToken, LayerToken, MacroToken};
