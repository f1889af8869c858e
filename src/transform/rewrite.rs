use crate::syntax::emit;
use crate::syntax::{Module, ProxyDecl};
use crate::transform::validate::RewriteEntry;

/// Apply validated rewrites to a module in one batch.
///
/// Inserts the runtime import once, at the first rewritten position, then
/// replaces each import with its proxy declaration. Type-only names of a
/// replaced import move to an `import type` placed right before its proxy.
/// `entries` must be ordered by position. Returns the number of replaced
/// statements.
pub fn apply(module: &mut Module, entries: &[RewriteEntry]) -> usize {
    let Some(first) = entries.first() else {
        return 0;
    };
    debug_assert!(entries
        .windows(2)
        .all(|w| w[0].record.position < w[1].record.position));

    module.insert_statement(first.record.position, emit::runtime_import());
    // Statements inserted so far, all of them before the next entry.
    let mut shift = 1;

    for entry in entries {
        let index = entry.record.position + shift;
        let proxy = emit::proxy_declaration(ProxyDecl {
            bindings: entry.record.bindings.clone(),
            methods: entry.methods.clone(),
            filename: entry.relative_path.clone(),
        });
        module.replace_statement(index, proxy);

        if !entry.record.type_bindings.is_empty() {
            let types = emit::type_import(&entry.record.specifier, &entry.record.type_bindings);
            module.insert_statement(index, types);
            shift += 1;
        }
    }
    entries.len()
}
