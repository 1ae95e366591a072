use remappy_core::{ActionTables, Binding, Configuration};

/// Rebuild the configuration a set of tables was compiled from.
///
/// Every compiled action keeps its source binding text, so this is exact for
/// anything the compiler accepted, no-op fallbacks included. Bindings come out
/// ordered by layer, then scancode.
pub fn describe(tables: &ActionTables) -> Configuration {
    let mut bindings: Vec<Binding> = tables
        .iter()
        .flat_map(|(layer, table)| {
            table.iter().map(move |(code, action)| {
                Binding::new(code.0, layer as i32, action.source.kind, action.source.payload.clone())
            })
        })
        .collect();
    bindings.sort_by_key(|binding| (binding.layer, binding.input));

    Configuration::from_bindings(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Compiler;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_sorts_by_layer_then_input() {
        let config = Configuration::from_bindings(vec![
            Binding::short(31, 1, "b"),
            Binding::macro_(30, 1, "\\Cc"),
            Binding::set_layer(15, 0, "rot 0 1"),
        ]);
        let tables = Compiler::new().compile(&config).tables;

        assert_eq!(
            describe(&tables).bindings(),
            &[
                Binding::set_layer(15, 0, "rot 0 1"),
                Binding::macro_(30, 1, "\\Cc"),
                Binding::short(31, 1, "b"),
            ]
        );
    }
}
