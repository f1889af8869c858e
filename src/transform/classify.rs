use crate::syntax::{Binding, ImportSpecifier, Statement, StatementKind};
use crate::transform::paths;
use std::path::{Path, PathBuf};

/// A local import eligible for rewriting into a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// Index of the import in the module's statement list.
    pub position: usize,
    /// 1-indexed source line, for diagnostics.
    pub line: usize,
    /// Specifier as written, e.g. `./lib/backend`.
    pub specifier: String,
    pub bindings: Vec<Binding>,
    /// Type-only names imported alongside (`import { type Id, load }`). They
    /// have no run-time value and stay in a residual `import type`.
    pub type_bindings: Vec<Binding>,
    /// Absolute, normalized path the specifier points at.
    pub target: PathBuf,
    /// `target` relative to the backend root, `/`-separated.
    pub relative_path: String,
}

impl ImportRecord {
    /// Names requested from the target module, in import order, without repeats.
    ///
    /// These are the exported names (`foo` in `import { foo as bar }`), not
    /// the local bindings.
    pub fn imported_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            if !names.contains(&binding.imported) {
                names.push(binding.imported.clone());
            }
        }
        names
    }
}

/// Classify one top-level statement.
///
/// Returns `None` for anything that is not a named, value-level import of a
/// relative specifier resolving inside `backend_root`.
pub fn classify(
    statement: &Statement,
    position: usize,
    importer: &Path,
    backend_root: &Path,
) -> Option<ImportRecord> {
    let StatementKind::Import(decl) = &statement.kind else {
        return None;
    };

    // Package imports
    if !decl.source.starts_with('.') {
        return None;
    }
    if decl.specifiers.is_empty() || decl.type_only {
        return None;
    }

    let mut bindings = Vec::with_capacity(decl.specifiers.len());
    let mut type_bindings = Vec::new();
    for specifier in &decl.specifiers {
        match specifier {
            ImportSpecifier::Named {
                imported,
                local,
                type_only: false,
            } => bindings.push(Binding {
                imported: imported.clone(),
                local: local.clone(),
            }),
            // Type-only names are erased at compile time; they need no proxy
            ImportSpecifier::Named {
                imported,
                local,
                type_only: true,
            } => type_bindings.push(Binding {
                imported: imported.clone(),
                local: local.clone(),
            }),
            // Default and namespace bindings are not supported
            ImportSpecifier::Default { .. } | ImportSpecifier::Namespace { .. } => return None,
        }
    }
    if bindings.is_empty() {
        return None;
    }

    let target = paths::join_specifier(importer, &decl.source);
    let Some(relative_path) = paths::relative_to(backend_root, &target) else {
        tracing::debug!(
            "{}: {} resolves outside {}, leaving it untouched",
            importer.display(),
            decl.source,
            backend_root.display()
        );
        return None;
    };

    Some(ImportRecord {
        position,
        line: statement.line,
        specifier: decl.source.clone(),
        bindings,
        type_bindings,
        target,
        relative_path,
    })
}
