use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::types::{BindingKind, BindingSource};

/// A single input binding: what pressing `input` does while `layer` is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBinding", into = "RawBinding")]
pub struct Binding {
    pub input: u16,
    pub layer: i32,
    pub kind: BindingKind,
    pub payload: String,
}

impl Binding {
    pub fn new(input: u16, layer: i32, kind: BindingKind, payload: impl Into<String>) -> Self {
        Self {
            input,
            layer,
            kind,
            payload: payload.into(),
        }
    }

    pub fn short(input: u16, layer: i32, payload: impl Into<String>) -> Self {
        Self::new(input, layer, BindingKind::Short, payload)
    }

    pub fn macro_(input: u16, layer: i32, payload: impl Into<String>) -> Self {
        Self::new(input, layer, BindingKind::Macro, payload)
    }

    pub fn set_layer(input: u16, layer: i32, payload: impl Into<String>) -> Self {
        Self::new(input, layer, BindingKind::SetLayer, payload)
    }

    /// Whether this binding occupies the same (input, layer) slot as `other`
    pub fn same_slot(&self, other: &Binding) -> bool {
        self.input == other.input && self.layer == other.layer
    }

    pub fn source(&self) -> BindingSource {
        BindingSource {
            kind: self.kind,
            payload: self.payload.clone(),
        }
    }
}

// On-disk shape: the kind is whichever of the three payload keys is present.
// Field order matters, it keeps the written keys sorted.
#[derive(Serialize, Deserialize)]
struct RawBinding {
    input: u16,
    #[serde(default)]
    layer: i32,
    #[serde(rename = "macro", default, skip_serializing_if = "Option::is_none")]
    macro_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    set_layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    short: Option<String>,
}

impl TryFrom<RawBinding> for Binding {
    type Error = Error;

    fn try_from(raw: RawBinding) -> Result<Self> {
        let payloads = [
            (BindingKind::Short, raw.short),
            (BindingKind::Macro, raw.macro_),
            (BindingKind::SetLayer, raw.set_layer),
        ];
        let mut present = payloads
            .into_iter()
            .filter_map(|(kind, payload)| payload.map(|p| (kind, p)));

        match (present.next(), present.next()) {
            (Some((kind, payload)), None) => Ok(Binding {
                input: raw.input,
                layer: raw.layer,
                kind,
                payload,
            }),
            (None, _) => Err(Error::InvalidBinding {
                input: raw.input,
                message: "expected one of \"short\", \"macro\" or \"set_layer\"".to_string(),
            }),
            (Some(_), Some(_)) => Err(Error::InvalidBinding {
                input: raw.input,
                message: "only one of \"short\", \"macro\" or \"set_layer\" may be given".to_string(),
            }),
        }
    }
}

impl From<Binding> for RawBinding {
    fn from(binding: Binding) -> Self {
        let mut raw = RawBinding {
            input: binding.input,
            layer: binding.layer,
            macro_: None,
            set_layer: None,
            short: None,
        };
        match binding.kind {
            BindingKind::Short => raw.short = Some(binding.payload),
            BindingKind::Macro => raw.macro_ = Some(binding.payload),
            BindingKind::SetLayer => raw.set_layer = Some(binding.payload),
        }
        raw
    }
}

/// Ordered set of bindings plus an optional device-name hint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    maps: Vec<Binding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from bindings, applying upsert semantics in order
    pub fn from_bindings(bindings: impl IntoIterator<Item = Binding>) -> Self {
        let mut config = Self::new();
        for binding in bindings {
            config.upsert(binding);
        }
        config
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: Configuration = serde_json::from_str(json)?;
        // A hand-edited file may repeat a slot; keep the last one.
        let mut config = Self::from_bindings(parsed.maps);
        config.name = parsed.name;
        Ok(config)
    }

    /// Serialize with sorted keys and four-space indentation
    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(buffer)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let bytes = self.to_json_vec()?;
        String::from_utf8(bytes)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.maps
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn get(&self, input: u16, layer: i32) -> Option<&Binding> {
        self.maps.iter().find(|b| b.input == input && b.layer == layer)
    }

    /// Insert a binding, replacing the one in the same (input, layer) slot.
    /// A replacement keeps its position; a new binding is appended.
    pub fn upsert(&mut self, binding: Binding) -> Option<Binding> {
        match self.maps.iter_mut().find(|b| b.same_slot(&binding)) {
            Some(existing) => Some(std::mem::replace(existing, binding)),
            None => {
                self.maps.push(binding);
                None
            }
        }
    }

    pub fn remove(&mut self, input: u16, layer: i32) -> Option<Binding> {
        let index = self.maps.iter().position(|b| b.input == input && b.layer == layer)?;
        Some(self.maps.remove(index))
    }

    /// Upsert every binding of `other`; its device name wins when set
    pub fn merge(&mut self, other: Configuration) {
        for binding in other.maps {
            self.upsert(binding);
        }
        if other.name.is_some() {
            self.name = other.name;
        }
    }
}
