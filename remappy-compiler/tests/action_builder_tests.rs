mod common;

use common::{down, key_ops, up};
use pretty_assertions::assert_eq;
use remappy_core::Binding;

#[test]
fn test_short_literals_tap_in_order() {
    assert_eq!(
        key_ops(Binding::short(30, 0, "a+b+c")),
        vec![down("a"), up("a"), down("b"), up("b"), down("c"), up("c")]
    );
}

#[test]
fn test_short_modifiers_wrap_the_key() {
    assert_eq!(
        key_ops(Binding::short(30, 0, "ctrl+shift+c")),
        vec![down("ctrl"), down("shift"), down("c"), up("c"), up("shift"), up("ctrl")]
    );
}

#[test]
fn test_short_names_are_case_insensitive_and_trimmed() {
    assert_eq!(
        key_ops(Binding::short(30, 0, " CTRL + Key_C ")),
        key_ops(Binding::short(30, 0, "ctrl+c"))
    );
}

#[test]
fn test_macro_escape_matches_short_combo() {
    assert_eq!(key_ops(Binding::macro_(30, 0, "\\Cc")), key_ops(Binding::short(30, 0, "ctrl+c")));
}

#[test]
fn test_macro_types_text() {
    assert_eq!(
        key_ops(Binding::macro_(30, 0, "hi there")),
        vec![
            down("h"),
            up("h"),
            down("i"),
            up("i"),
            down("space"),
            up("space"),
            down("t"),
            up("t"),
            down("h"),
            up("h"),
            down("e"),
            up("e"),
            down("r"),
            up("r"),
            down("e"),
            up("e"),
        ]
    );
}

#[test]
fn test_macro_modifier_only_covers_next_character() {
    assert_eq!(
        key_ops(Binding::macro_(30, 0, "\\Sab")),
        vec![down("shift"), down("a"), up("a"), up("shift"), down("b"), up("b")]
    );
}

#[test]
fn test_macro_unknown_escape_types_backslash() {
    assert_eq!(
        key_ops(Binding::macro_(30, 0, "\\q")),
        vec![down("\\"), up("\\"), down("q"), up("q")]
    );
}

#[test]
fn test_trailing_modifier_released() {
    assert_eq!(key_ops(Binding::short(30, 0, "alt")), vec![down("alt"), up("alt")]);
}

#[test]
fn test_linux_modifier_names_are_held() {
    assert_eq!(
        key_ops(Binding::short(30, 0, "leftshift+a")),
        vec![down("shift"), down("a"), up("a"), up("shift")]
    );
    assert_eq!(
        key_ops(Binding::short(30, 0, "KEY_LEFTCTRL+rightalt+x")),
        vec![down("ctrl"), down("ralt"), down("x"), up("x"), up("ralt"), up("ctrl")]
    );
}
