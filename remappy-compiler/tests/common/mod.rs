use remappy_compiler::compile_binding;
use remappy_core::{Binding, KeyCode, PrimitiveOp};

/// Resolve a key name that the tests know to exist
pub fn key(name: &str) -> KeyCode {
    KeyCode::from_name(name).unwrap_or_else(|| panic!("no such key: {}", name))
}

pub fn down(name: &str) -> PrimitiveOp {
    PrimitiveOp::down(key(name))
}

pub fn up(name: &str) -> PrimitiveOp {
    PrimitiveOp::up(key(name))
}

/// Key operations of a binding, without the trailing sync
pub fn key_ops(binding: Binding) -> Vec<PrimitiveOp> {
    let action = compile_binding(&binding).expect("binding should compile");
    assert_eq!(action.ops.last(), Some(&PrimitiveOp::Sync), "compiled action must end with Sync");
    action.key_ops().cloned().collect()
}

/// Write `json` to a fresh temporary file
#[allow(dead_code)]
pub fn config_file(json: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(json.as_bytes()).expect("write temp file");
    file
}
