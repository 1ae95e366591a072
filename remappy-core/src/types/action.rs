use std::collections::HashMap;
use std::fmt;

use super::keys::KeyCode;

/// Which DSL dialect a binding payload is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `+`-delimited combo, e.g. `ctrl+shift+c`
    Short,
    /// Escape-coded macro, e.g. `\Cc`
    Macro,
    /// Layer command, e.g. `inc 1`
    SetLayer,
}

impl BindingKind {
    /// Key used for this kind in the persisted configuration
    pub fn key(self) -> &'static str {
        match self {
            BindingKind::Short => "short",
            BindingKind::Macro => "macro",
            BindingKind::SetLayer => "set_layer",
        }
    }

    /// Parse the one-letter answer of the capture prompt (`s`, `m`, `l`)
    pub fn from_letter(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "s" => Some(BindingKind::Short),
            "m" => Some(BindingKind::Macro),
            "l" => Some(BindingKind::SetLayer),
            _ => None,
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    /// Key-state value written to the output device
    pub fn value(self) -> i32 {
        match self {
            Direction::Down => 1,
            Direction::Up => 0,
        }
    }
}

/// Mutation of the active layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerControl {
    IncBy(i32),
    DecBy(i32),
    SetTo(i32),
    RotateAmong(Vec<i32>),
}

/// Unit of compiled output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveOp {
    Key { code: KeyCode, direction: Direction },
    Layer(LayerControl),
    Noop,
    /// Synchronization marker, flushes everything emitted so far
    Sync,
}

impl PrimitiveOp {
    pub fn down(code: KeyCode) -> Self {
        PrimitiveOp::Key { code, direction: Direction::Down }
    }

    pub fn up(code: KeyCode) -> Self {
        PrimitiveOp::Key { code, direction: Direction::Up }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, PrimitiveOp::Key { .. })
    }
}

impl fmt::Display for PrimitiveOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveOp::Key { code, direction: Direction::Down } => write!(f, "Down({})", code),
            PrimitiveOp::Key { code, direction: Direction::Up } => write!(f, "Up({})", code),
            PrimitiveOp::Layer(LayerControl::IncBy(n)) => write!(f, "IncBy({})", n),
            PrimitiveOp::Layer(LayerControl::DecBy(n)) => write!(f, "DecBy({})", n),
            PrimitiveOp::Layer(LayerControl::SetTo(n)) => write!(f, "SetTo({})", n),
            PrimitiveOp::Layer(LayerControl::RotateAmong(layers)) => write!(f, "RotateAmong({:?})", layers),
            PrimitiveOp::Noop => f.write_str("Noop"),
            PrimitiveOp::Sync => f.write_str("Sync"),
        }
    }
}

/// The binding text a compiled action came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSource {
    pub kind: BindingKind,
    pub payload: String,
}

/// Ordered primitive operations for one (scancode, layer) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledAction {
    pub source: BindingSource,
    pub ops: Vec<PrimitiveOp>,
}

impl CompiledAction {
    pub fn new(source: BindingSource, ops: Vec<PrimitiveOp>) -> Self {
        Self { source, ops }
    }

    /// Action that swallows the key and does nothing else
    pub fn noop(source: BindingSource) -> Self {
        Self {
            source,
            ops: vec![PrimitiveOp::Noop, PrimitiveOp::Sync],
        }
    }

    /// Key operations only, in replay order
    pub fn key_ops(&self) -> impl Iterator<Item = &PrimitiveOp> {
        self.ops.iter().filter(|op| op.is_key())
    }
}

/// Scancode to action mapping for a single layer
pub type ActionTable = HashMap<KeyCode, CompiledAction>;

/// One action table per layer, indexed by layer number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTables {
    layers: Vec<ActionTable>,
}

impl ActionTables {
    /// Create `count` empty (pass-through) layers
    pub fn with_layers(count: usize) -> Self {
        Self {
            layers: (0..count).map(|_| ActionTable::new()).collect(),
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, layer: usize) -> Option<&ActionTable> {
        self.layers.get(layer)
    }

    /// Look up the action for `code` on `layer`; `None` means pass-through
    pub fn get(&self, layer: usize, code: KeyCode) -> Option<&CompiledAction> {
        self.layers.get(layer).and_then(|table| table.get(&code))
    }

    /// Insert an action, growing the layer list if needed.
    /// Returns the action it replaced, if any.
    pub fn insert(&mut self, layer: usize, code: KeyCode, action: CompiledAction) -> Option<CompiledAction> {
        if layer >= self.layers.len() {
            self.layers.resize_with(layer + 1, ActionTable::new);
        }
        self.layers[layer].insert(code, action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ActionTable)> {
        self.layers.iter().enumerate()
    }

    /// Every key code any layer can emit
    pub fn output_codes(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.layers
            .iter()
            .flat_map(|table| table.values())
            .flat_map(|action| action.ops.iter())
            .filter_map(|op| match op {
                PrimitiveOp::Key { code, .. } => Some(*code),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(payload: &str) -> BindingSource {
        BindingSource {
            kind: BindingKind::Short,
            payload: payload.to_string(),
        }
    }

    #[test]
    fn test_tables_lookup_miss_is_none() {
        let tables = ActionTables::with_layers(2);
        assert_eq!(tables.layer_count(), 2);
        assert!(tables.get(0, KeyCode::A).is_none());
        assert!(tables.get(5, KeyCode::A).is_none());
    }

    #[test]
    fn test_insert_replaces_and_grows() {
        let mut tables = ActionTables::with_layers(1);
        let first = CompiledAction::new(source("a"), vec![PrimitiveOp::down(KeyCode::A)]);
        let second = CompiledAction::new(source("b"), vec![PrimitiveOp::down(KeyCode::B)]);

        assert!(tables.insert(0, KeyCode::Q, first.clone()).is_none());
        assert_eq!(tables.insert(0, KeyCode::Q, second.clone()), Some(first));
        assert_eq!(tables.get(0, KeyCode::Q), Some(&second));

        tables.insert(3, KeyCode::Q, second);
        assert_eq!(tables.layer_count(), 4);
        assert!(tables.layer(2).map(|t| t.is_empty()).unwrap_or(false));
    }

    #[test]
    fn test_op_display() {
        assert_eq!(PrimitiveOp::down(KeyCode::LEFTCTRL).to_string(), "Down(KEY_LEFTCTRL)");
        assert_eq!(PrimitiveOp::Layer(LayerControl::RotateAmong(vec![0, 2])).to_string(), "RotateAmong([0, 2])");
    }

    #[test]
    fn test_kind_letters() {
        assert_eq!(BindingKind::from_letter("S"), Some(BindingKind::Short));
        assert_eq!(BindingKind::from_letter(" m\n"), Some(BindingKind::Macro));
        assert_eq!(BindingKind::from_letter("l"), Some(BindingKind::SetLayer));
        assert_eq!(BindingKind::from_letter(""), None);
        assert_eq!(BindingKind::from_letter("x"), None);
    }
}
