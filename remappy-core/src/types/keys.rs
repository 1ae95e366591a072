use std::fmt;

/// A Linux input event code (`KEY_*` numbering).
///
/// Scancodes coming off a device are arbitrary `u16` values, so this is a
/// newtype rather than a closed enum; the constants below cover the keys the
/// binding language can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const ESC: Self = Self(1);
    pub const KEY_1: Self = Self(2);
    pub const KEY_2: Self = Self(3);
    pub const KEY_3: Self = Self(4);
    pub const KEY_4: Self = Self(5);
    pub const KEY_5: Self = Self(6);
    pub const KEY_6: Self = Self(7);
    pub const KEY_7: Self = Self(8);
    pub const KEY_8: Self = Self(9);
    pub const KEY_9: Self = Self(10);
    pub const KEY_0: Self = Self(11);
    pub const MINUS: Self = Self(12);
    pub const EQUAL: Self = Self(13);
    pub const BACKSPACE: Self = Self(14);
    pub const TAB: Self = Self(15);
    pub const Q: Self = Self(16);
    pub const W: Self = Self(17);
    pub const E: Self = Self(18);
    pub const R: Self = Self(19);
    pub const T: Self = Self(20);
    pub const Y: Self = Self(21);
    pub const U: Self = Self(22);
    pub const I: Self = Self(23);
    pub const O: Self = Self(24);
    pub const P: Self = Self(25);
    pub const LEFTBRACE: Self = Self(26);
    pub const RIGHTBRACE: Self = Self(27);
    pub const ENTER: Self = Self(28);
    pub const LEFTCTRL: Self = Self(29);
    pub const A: Self = Self(30);
    pub const S: Self = Self(31);
    pub const D: Self = Self(32);
    pub const F: Self = Self(33);
    pub const G: Self = Self(34);
    pub const H: Self = Self(35);
    pub const J: Self = Self(36);
    pub const K: Self = Self(37);
    pub const L: Self = Self(38);
    pub const SEMICOLON: Self = Self(39);
    pub const APOSTROPHE: Self = Self(40);
    pub const GRAVE: Self = Self(41);
    pub const LEFTSHIFT: Self = Self(42);
    pub const BACKSLASH: Self = Self(43);
    pub const Z: Self = Self(44);
    pub const X: Self = Self(45);
    pub const C: Self = Self(46);
    pub const V: Self = Self(47);
    pub const B: Self = Self(48);
    pub const N: Self = Self(49);
    pub const M: Self = Self(50);
    pub const COMMA: Self = Self(51);
    pub const DOT: Self = Self(52);
    pub const SLASH: Self = Self(53);
    pub const RIGHTSHIFT: Self = Self(54);
    pub const KPASTERISK: Self = Self(55);
    pub const LEFTALT: Self = Self(56);
    pub const SPACE: Self = Self(57);
    pub const CAPSLOCK: Self = Self(58);
    pub const F1: Self = Self(59);
    pub const F2: Self = Self(60);
    pub const F3: Self = Self(61);
    pub const F4: Self = Self(62);
    pub const F5: Self = Self(63);
    pub const F6: Self = Self(64);
    pub const F7: Self = Self(65);
    pub const F8: Self = Self(66);
    pub const F9: Self = Self(67);
    pub const F10: Self = Self(68);
    pub const NUMLOCK: Self = Self(69);
    pub const SCROLLLOCK: Self = Self(70);
    pub const KP7: Self = Self(71);
    pub const KP8: Self = Self(72);
    pub const KP9: Self = Self(73);
    pub const KPMINUS: Self = Self(74);
    pub const KP4: Self = Self(75);
    pub const KP5: Self = Self(76);
    pub const KP6: Self = Self(77);
    pub const KPPLUS: Self = Self(78);
    pub const KP1: Self = Self(79);
    pub const KP2: Self = Self(80);
    pub const KP3: Self = Self(81);
    pub const KP0: Self = Self(82);
    pub const KPDOT: Self = Self(83);
    pub const F11: Self = Self(87);
    pub const F12: Self = Self(88);
    pub const KPENTER: Self = Self(96);
    pub const RIGHTCTRL: Self = Self(97);
    pub const KPSLASH: Self = Self(98);
    pub const SYSRQ: Self = Self(99);
    pub const RIGHTALT: Self = Self(100);
    pub const HOME: Self = Self(102);
    pub const UP: Self = Self(103);
    pub const PAGEUP: Self = Self(104);
    pub const LEFT: Self = Self(105);
    pub const RIGHT: Self = Self(106);
    pub const END: Self = Self(107);
    pub const DOWN: Self = Self(108);
    pub const PAGEDOWN: Self = Self(109);
    pub const INSERT: Self = Self(110);
    pub const DELETE: Self = Self(111);
    pub const MUTE: Self = Self(113);
    pub const VOLUMEDOWN: Self = Self(114);
    pub const VOLUMEUP: Self = Self(115);
    pub const PAUSE: Self = Self(119);
    pub const LEFTMETA: Self = Self(125);
    pub const RIGHTMETA: Self = Self(126);
    pub const COMPOSE: Self = Self(127);

    /// Raw event code
    pub fn code(self) -> u16 {
        self.0
    }

    /// Resolve a key name used in a binding payload.
    ///
    /// Lookup is case-insensitive. Modifier names (`ctrl`, `rshift`, ...),
    /// special names (`enter`, `up`, ...), Linux key names without the
    /// `KEY_` prefix (`leftbrace`, `kp5`, ...) and single characters typed on
    /// an unshifted US layout are all accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Self::from_char(ch);
        }

        let lower = name.to_ascii_lowercase();
        let lower = lower.strip_prefix("key_").unwrap_or(&lower);
        MODIFIER_NAMES
            .iter()
            .chain(KEY_NAMES.iter())
            .find(|(n, _)| *n == lower)
            .map(|(_, code)| *code)
    }

    /// Resolve a single character as it appears in a macro payload
    pub fn from_char(ch: char) -> Option<Self> {
        let code = match ch.to_ascii_lowercase() {
            'a' => Self::A,
            'b' => Self::B,
            'c' => Self::C,
            'd' => Self::D,
            'e' => Self::E,
            'f' => Self::F,
            'g' => Self::G,
            'h' => Self::H,
            'i' => Self::I,
            'j' => Self::J,
            'k' => Self::K,
            'l' => Self::L,
            'm' => Self::M,
            'n' => Self::N,
            'o' => Self::O,
            'p' => Self::P,
            'q' => Self::Q,
            'r' => Self::R,
            's' => Self::S,
            't' => Self::T,
            'u' => Self::U,
            'v' => Self::V,
            'w' => Self::W,
            'x' => Self::X,
            'y' => Self::Y,
            'z' => Self::Z,
            '1' => Self::KEY_1,
            '2' => Self::KEY_2,
            '3' => Self::KEY_3,
            '4' => Self::KEY_4,
            '5' => Self::KEY_5,
            '6' => Self::KEY_6,
            '7' => Self::KEY_7,
            '8' => Self::KEY_8,
            '9' => Self::KEY_9,
            '0' => Self::KEY_0,
            '-' => Self::MINUS,
            '=' => Self::EQUAL,
            '[' => Self::LEFTBRACE,
            ']' => Self::RIGHTBRACE,
            ';' => Self::SEMICOLON,
            '\'' => Self::APOSTROPHE,
            '`' => Self::GRAVE,
            '\\' => Self::BACKSLASH,
            ',' => Self::COMMA,
            '.' => Self::DOT,
            '/' => Self::SLASH,
            ' ' => Self::SPACE,
            '\n' => Self::ENTER,
            '\t' => Self::TAB,
            _ => return None,
        };
        Some(code)
    }

    /// Canonical name of this code, if it is one the binding language knows
    pub fn name(self) -> Option<&'static str> {
        KEY_NAMES
            .iter()
            .find(|(_, code)| *code == self)
            .map(|(n, _)| *n)
    }

    pub fn is_modifier(self) -> bool {
        MODIFIER_NAMES.iter().any(|(_, code)| *code == self)
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "KEY_{}", name.to_ascii_uppercase()),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Modifier names and the key each one holds down
pub const MODIFIER_NAMES: &[(&str, KeyCode)] = &[
    ("ctrl", KeyCode::LEFTCTRL),
    ("lctrl", KeyCode::LEFTCTRL),
    ("rctrl", KeyCode::RIGHTCTRL),
    ("alt", KeyCode::LEFTALT),
    ("lalt", KeyCode::LEFTALT),
    ("ralt", KeyCode::RIGHTALT),
    ("meta", KeyCode::LEFTMETA),
    ("lmeta", KeyCode::LEFTMETA),
    ("rmeta", KeyCode::RIGHTMETA),
    ("super", KeyCode::LEFTMETA),
    ("shift", KeyCode::LEFTSHIFT),
    ("lshift", KeyCode::LEFTSHIFT),
    ("rshift", KeyCode::RIGHTSHIFT),
];

// First entry for a code is its canonical name.
const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("esc", KeyCode::ESC),
    ("escape", KeyCode::ESC),
    ("minus", KeyCode::MINUS),
    ("equal", KeyCode::EQUAL),
    ("backspace", KeyCode::BACKSPACE),
    ("tab", KeyCode::TAB),
    ("leftbrace", KeyCode::LEFTBRACE),
    ("rightbrace", KeyCode::RIGHTBRACE),
    ("enter", KeyCode::ENTER),
    ("return", KeyCode::ENTER),
    ("leftctrl", KeyCode::LEFTCTRL),
    ("semicolon", KeyCode::SEMICOLON),
    ("apostrophe", KeyCode::APOSTROPHE),
    ("grave", KeyCode::GRAVE),
    ("leftshift", KeyCode::LEFTSHIFT),
    ("backslash", KeyCode::BACKSLASH),
    ("comma", KeyCode::COMMA),
    ("dot", KeyCode::DOT),
    ("period", KeyCode::DOT),
    ("slash", KeyCode::SLASH),
    ("rightshift", KeyCode::RIGHTSHIFT),
    ("kpasterisk", KeyCode::KPASTERISK),
    ("leftalt", KeyCode::LEFTALT),
    ("space", KeyCode::SPACE),
    ("capslock", KeyCode::CAPSLOCK),
    ("f1", KeyCode::F1),
    ("f2", KeyCode::F2),
    ("f3", KeyCode::F3),
    ("f4", KeyCode::F4),
    ("f5", KeyCode::F5),
    ("f6", KeyCode::F6),
    ("f7", KeyCode::F7),
    ("f8", KeyCode::F8),
    ("f9", KeyCode::F9),
    ("f10", KeyCode::F10),
    ("f11", KeyCode::F11),
    ("f12", KeyCode::F12),
    ("numlock", KeyCode::NUMLOCK),
    ("scrolllock", KeyCode::SCROLLLOCK),
    ("kp0", KeyCode::KP0),
    ("kp1", KeyCode::KP1),
    ("kp2", KeyCode::KP2),
    ("kp3", KeyCode::KP3),
    ("kp4", KeyCode::KP4),
    ("kp5", KeyCode::KP5),
    ("kp6", KeyCode::KP6),
    ("kp7", KeyCode::KP7),
    ("kp8", KeyCode::KP8),
    ("kp9", KeyCode::KP9),
    ("kpminus", KeyCode::KPMINUS),
    ("kpplus", KeyCode::KPPLUS),
    ("kpdot", KeyCode::KPDOT),
    ("kpenter", KeyCode::KPENTER),
    ("kpslash", KeyCode::KPSLASH),
    ("rightctrl", KeyCode::RIGHTCTRL),
    ("sysrq", KeyCode::SYSRQ),
    ("rightalt", KeyCode::RIGHTALT),
    ("home", KeyCode::HOME),
    ("up", KeyCode::UP),
    ("pageup", KeyCode::PAGEUP),
    ("left", KeyCode::LEFT),
    ("right", KeyCode::RIGHT),
    ("end", KeyCode::END),
    ("down", KeyCode::DOWN),
    ("pagedown", KeyCode::PAGEDOWN),
    ("insert", KeyCode::INSERT),
    ("delete", KeyCode::DELETE),
    ("mute", KeyCode::MUTE),
    ("volumedown", KeyCode::VOLUMEDOWN),
    ("volumeup", KeyCode::VOLUMEUP),
    ("pause", KeyCode::PAUSE),
    ("leftmeta", KeyCode::LEFTMETA),
    ("rightmeta", KeyCode::RIGHTMETA),
    ("compose", KeyCode::COMPOSE),
    ("a", KeyCode::A),
    ("b", KeyCode::B),
    ("c", KeyCode::C),
    ("d", KeyCode::D),
    ("e", KeyCode::E),
    ("f", KeyCode::F),
    ("g", KeyCode::G),
    ("h", KeyCode::H),
    ("i", KeyCode::I),
    ("j", KeyCode::J),
    ("k", KeyCode::K),
    ("l", KeyCode::L),
    ("m", KeyCode::M),
    ("n", KeyCode::N),
    ("o", KeyCode::O),
    ("p", KeyCode::P),
    ("q", KeyCode::Q),
    ("r", KeyCode::R),
    ("s", KeyCode::S),
    ("t", KeyCode::T),
    ("u", KeyCode::U),
    ("v", KeyCode::V),
    ("w", KeyCode::W),
    ("x", KeyCode::X),
    ("y", KeyCode::Y),
    ("z", KeyCode::Z),
    ("0", KeyCode::KEY_0),
    ("1", KeyCode::KEY_1),
    ("2", KeyCode::KEY_2),
    ("3", KeyCode::KEY_3),
    ("4", KeyCode::KEY_4),
    ("5", KeyCode::KEY_5),
    ("6", KeyCode::KEY_6),
    ("7", KeyCode::KEY_7),
    ("8", KeyCode::KEY_8),
    ("9", KeyCode::KEY_9),
];

/// Every key code the binding language can name
pub fn known_key_codes() -> impl Iterator<Item = KeyCode> {
    KEY_NAMES.iter().map(|(_, code)| *code)
}

/// Keys the action builder holds down until the next literal key.
///
/// Membership is by key code, so every spelling of a modifier counts:
/// `shift`, `lshift`, `leftshift` and `KEY_LEFTSHIFT` are the same modifier.
#[derive(Debug, Clone)]
pub struct ModifierSet {
    codes: Vec<KeyCode>,
}

impl Default for ModifierSet {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ModifierSet {
    pub fn canonical() -> Self {
        let mut codes: Vec<KeyCode> = MODIFIER_NAMES.iter().map(|(_, code)| *code).collect();
        codes.sort();
        codes.dedup();
        Self { codes }
    }

    pub fn contains(&self, token: &str) -> bool {
        KeyCode::from_name(token).map_or(false, |code| self.codes.contains(&code))
    }
}
