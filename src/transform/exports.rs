use crate::errors::{ExposerError, Result};
use crate::syntax::{parse_module, Module, StatementKind};
use crate::transform::paths;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Functions a module both exposes and exports, in statement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExposedExportSet {
    names: Vec<String>,
}

impl ExposedExportSet {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Read and parse the module `target` points at and collect its exposed exports.
///
/// `requested` restricts the export check on bare exposed declarations to the
/// names an importer asks for; `None` checks every exposed function.
/// Nothing is cached: every call reads the file again.
pub fn resolve_exposed_exports(
    target: &Path,
    specifier: &str,
    requested: Option<&[String]>,
    extensions: &[String],
) -> Result<ExposedExportSet> {
    let unreadable = |reason: String| ExposerError::UnreadableImport {
        specifier: specifier.to_string(),
        path: target.to_path_buf(),
        reason,
    };

    let file = paths::resolve_module_file(target, extensions).ok_or_else(|| {
        unreadable(format!(
            "no module found at {} (tried extensions: {})",
            target.display(),
            extensions.join(", ")
        ))
    })?;
    let content = std::fs::read_to_string(&file).map_err(|e| unreadable(e.to_string()))?;
    let module = parse_module(&file, &content)?;

    exposed_exports(&module, requested)
}

/// Collect the exposed exports of an already parsed module.
pub fn exposed_exports(module: &Module, requested: Option<&[String]>) -> Result<ExposedExportSet> {
    let surface: HashSet<&str> = module
        .statements()
        .iter()
        .filter_map(|s| match &s.kind {
            StatementKind::SurfaceExport(bindings) => Some(bindings),
            _ => None,
        })
        .flatten()
        .filter(|b| b.is_self_binding())
        .map(|b| b.local.as_str())
        .collect();

    let mut set = ExposedExportSet::default();
    for statement in module.statements() {
        match &statement.kind {
            StatementKind::Function(func) if func.exposed => {
                let wanted = requested.map_or(true, |names| names.contains(&func.name));
                if !wanted {
                    continue;
                }
                if !surface.contains(func.name.as_str()) {
                    return Err(ExposerError::ExposedNotExported {
                        function: func.name.clone(),
                        file: module.path().to_path_buf(),
                    });
                }
                set.names.push(func.name.clone());
            }
            StatementKind::ExportFunction(func) if func.exposed => {
                set.names.push(func.name.clone());
            }
            _ => {}
        }
    }
    Ok(set)
}
