//! Code generation for the statements the transform synthesizes.
//!
//! The shape `createRuntime(methodNames, { filename })` is consumed by the
//! fetch runtime and must stay in sync with it.

use crate::syntax::{Binding, ImportDecl, ImportSpecifier, ProxyDecl, Statement, StatementKind};

/// Module that provides the proxy factory at run time.
pub const RUNTIME_MODULE: &str = "@reshuffle/fetch-runtime";

/// Name of the proxy factory imported from [`RUNTIME_MODULE`].
pub const RUNTIME_FACTORY: &str = "createRuntime";

/// `import { createRuntime } from "@reshuffle/fetch-runtime";`
pub fn runtime_import() -> Statement {
    let text = format!(
        "import {{ {RUNTIME_FACTORY} }} from {};",
        js_string(RUNTIME_MODULE)
    );
    Statement::synthesized(
        text,
        StatementKind::Import(ImportDecl {
            source: RUNTIME_MODULE.to_string(),
            type_only: false,
            specifiers: vec![ImportSpecifier::Named {
                imported: RUNTIME_FACTORY.to_string(),
                local: RUNTIME_FACTORY.to_string(),
                type_only: false,
            }],
        }),
    )
}

/// `const { foo, bar: baz } = createRuntime(["foo", "bar"], { filename: "lib/backend" });`
pub fn proxy_declaration(decl: ProxyDecl) -> Statement {
    let pattern = decl
        .bindings
        .iter()
        .map(render_binding)
        .collect::<Vec<_>>()
        .join(", ");
    let methods = decl
        .methods
        .iter()
        .map(|m| js_string(m))
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!(
        "const {{ {pattern} }} = {RUNTIME_FACTORY}([{methods}], {{ filename: {} }});",
        js_string(&decl.filename)
    );
    Statement::synthesized(text, StatementKind::Proxy(decl))
}

fn render_binding(binding: &Binding) -> String {
    let key = if is_identifier(&binding.imported) {
        binding.imported.clone()
    } else {
        js_string(&binding.imported)
    };
    if key == binding.local {
        key
    } else {
        format!("{key}: {}", binding.local)
    }
}

/// `import type { Id, User as U } from "../backend/users";`
///
/// Keeps the type-only names of a rewritten import bound after the value
/// import is replaced by a proxy.
pub fn type_import(specifier: &str, bindings: &[Binding]) -> Statement {
    let names = bindings
        .iter()
        .map(|b| {
            let imported = if is_identifier(&b.imported) {
                b.imported.clone()
            } else {
                js_string(&b.imported)
            };
            if imported == b.local {
                imported
            } else {
                format!("{imported} as {}", b.local)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!("import type {{ {names} }} from {};", js_string(specifier));
    Statement::synthesized(
        text,
        StatementKind::Import(ImportDecl {
            source: specifier.to_string(),
            type_only: true,
            specifiers: bindings
                .iter()
                .map(|b| ImportSpecifier::Named {
                    imported: b.imported.clone(),
                    local: b.local.clone(),
                    type_only: false,
                })
                .collect(),
        }),
    )
}

/// Double-quoted, escaped string literal.
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
