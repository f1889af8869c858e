//! The expose transform.
//!
//! For every top-level `import { ... } from './...'` that resolves inside the
//! backend root, the imported module is parsed on its own, each requested name
//! is checked to be an exposed and exported function, and the import is
//! replaced with a `createRuntime(...)` proxy declaration. All imports of a
//! file are validated before any statement is touched, so a failing file is
//! never left half rewritten.

pub mod classify;
pub mod exports;
pub mod paths;
pub mod rewrite;
pub mod validate;

pub use classify::ImportRecord;
pub use exports::ExposedExportSet;
pub use validate::RewriteEntry;

use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::syntax::dialect::DEFAULT_EXTENSIONS;
use crate::syntax::{parse_module, Module};
use std::path::{Path, PathBuf};

/// Default backend directory, relative to the project root.
pub const DEFAULT_BACKEND_DIR: &str = "backend";

#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Backend directory, relative to the project root (or absolute).
    pub backend_dir: PathBuf,
    /// Extensions probed when resolving an import specifier to a file.
    pub extensions: Vec<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            backend_dir: PathBuf::from(DEFAULT_BACKEND_DIR),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Result of transforming one source file.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub code: String,
    pub entries: Vec<RewriteEntry>,
}

/// One configured transform. Holds no state between files.
#[derive(Debug, Clone)]
pub struct Transform {
    project_root: PathBuf,
    backend_root: PathBuf,
    extensions: Vec<String>,
}

impl Transform {
    pub fn new(project_root: &Path, options: &TransformOptions) -> Self {
        let project_root = paths::normalize(project_root);
        let backend_root = paths::normalize(&project_root.join(&options.backend_dir));
        Self {
            project_root,
            backend_root,
            extensions: options.extensions.clone(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            &config.root,
            &TransformOptions {
                backend_dir: config.backend_dir.clone(),
                extensions: config.extensions.clone(),
            },
        )
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn backend_root(&self) -> &Path {
        &self.backend_root
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// True if `path` lies inside the backend root.
    pub fn is_backend_file(&self, path: &Path) -> bool {
        paths::relative_to(&self.backend_root, &self.absolute(path)).is_some()
    }

    /// Classify, resolve and validate every top-level import without touching
    /// the module. Entries come back in statement order.
    pub fn plan(&self, module: &Module) -> Result<Vec<RewriteEntry>> {
        let importer = self.absolute(module.path());
        let mut entries = Vec::new();

        for (position, statement) in module.statements().iter().enumerate() {
            let Some(record) =
                classify::classify(statement, position, &importer, &self.backend_root)
            else {
                continue;
            };

            let requested = record.imported_names();
            let exposed = exports::resolve_exposed_exports(
                &record.target,
                &record.specifier,
                Some(&requested),
                &self.extensions,
            )?;
            let entry = validate::validate(record, &exposed)?;

            tracing::debug!(
                "{}:{}: {} -> createRuntime([{}], {})",
                importer.display(),
                entry.record.line,
                entry.record.specifier,
                entry.methods.join(", "),
                entry.relative_path
            );
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Plan, then rewrite the module in place. On error the module is untouched.
    pub fn apply(&self, module: &mut Module) -> Result<Vec<RewriteEntry>> {
        let entries = self.plan(module)?;
        rewrite::apply(module, &entries);
        Ok(entries)
    }

    /// Parse, transform and re-emit one source file.
    pub fn transform_source(&self, path: &Path, source: &str) -> Result<Transformed> {
        let mut module = parse_module(path, source)?;
        let entries = self.apply(&mut module)?;
        let code = if entries.is_empty() {
            source.to_string()
        } else {
            module.to_source()
        };
        Ok(Transformed { code, entries })
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            paths::normalize(path)
        } else {
            paths::normalize(&self.project_root.join(path))
        }
    }
}
