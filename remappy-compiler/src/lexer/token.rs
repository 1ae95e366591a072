use logos::Logos;

/// Tokens of the short (combo) dialect: `ctrl+shift+c`
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum ComboToken {
    #[token("+")]
    Plus,

    // Key or modifier name, surrounding whitespace trimmed
    #[regex(r"[^+]+", |lex| lex.slice().trim().to_string())]
    Name(String),
}

/// Tokens of the macro dialect: literal characters and modifier escapes
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum MacroToken {
    #[token("\\C")]
    Ctrl,

    #[token("\\S")]
    Shift,

    #[token("\\A")]
    Alt,

    #[token("\\M")]
    Meta,

    // A backslash that does not start a known escape is a literal backslash
    #[token("\\")]
    Backslash,

    #[regex(r"[^\\]", |lex| lex.slice().chars().next())]
    Char(char),
}

impl MacroToken {
    /// Symbol name handed to the action builder
    pub fn symbol(&self) -> String {
        match self {
            MacroToken::Ctrl => "ctrl".to_string(),
            MacroToken::Shift => "shift".to_string(),
            MacroToken::Alt => "alt".to_string(),
            MacroToken::Meta => "meta".to_string(),
            MacroToken::Backslash => "\\".to_string(),
            MacroToken::Char(ch) => ch.to_string(),
        }
    }
}

/// Tokens of the layer-command dialect: `inc 1`, `rot 0 2 3`
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum LayerToken {
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Number(i32),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_ascii_lowercase())]
    Word(String),
}
