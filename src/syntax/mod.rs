pub mod dialect;
pub mod emit;
pub mod parse;

pub use dialect::Dialect;
pub use parse::{parse_module, parse_module_as};

use std::path::{Path, PathBuf};

/// A parsed source file: its top-level statements in order.
///
/// Every statement keeps the trivia (whitespace and comments) that precedes
/// it, so statements that are never replaced re-emit byte-identically.
#[derive(Debug, Clone)]
pub struct Module {
    path: PathBuf,
    dialect: Dialect,
    statements: Vec<Statement>,
    trailing: String,
}

impl Module {
    pub(crate) fn new(
        path: PathBuf,
        dialect: Dialect,
        statements: Vec<Statement>,
        trailing: String,
    ) -> Self {
        Self {
            path,
            dialect,
            statements,
            trailing,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Insert a statement before `index`. The new statement takes over the
    /// leading trivia of the statement it displaces, which is left on a fresh line.
    pub fn insert_statement(&mut self, index: usize, mut statement: Statement) {
        if let Some(displaced) = self.statements.get_mut(index) {
            statement.leading = std::mem::replace(&mut displaced.leading, "\n".to_string());
            statement.line = displaced.line;
        }
        self.statements.insert(index, statement);
    }

    /// Replace the statement at `index`, keeping its leading trivia and line.
    /// Returns the replaced statement.
    pub fn replace_statement(&mut self, index: usize, mut statement: Statement) -> Statement {
        let old = &mut self.statements[index];
        statement.leading = std::mem::take(&mut old.leading);
        statement.line = old.line;
        std::mem::replace(old, statement)
    }

    /// Re-emit the module as source text.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            out.push_str(&statement.leading);
            out.push_str(&statement.text);
        }
        out.push_str(&self.trailing);
        out
    }
}

/// One top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Whitespace and comments between the previous statement and this one.
    pub leading: String,
    pub text: String,
    /// 1-indexed line of the statement's first token.
    pub line: usize,
    pub kind: StatementKind,
}

impl Statement {
    /// A synthesized statement; leading trivia and line are filled in on insertion.
    pub fn synthesized(text: String, kind: StatementKind) -> Self {
        Self {
            leading: String::new(),
            text,
            line: 0,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    Import(ImportDecl),
    /// `function f() {}` at the top level.
    Function(FunctionDecl),
    /// `export function f() {}`.
    ExportFunction(FunctionDecl),
    /// Explicit bindings onto the module surface: `exports.f = f`, `export { f }`.
    SurfaceExport(Vec<ExportBinding>),
    /// A generated remote-invocation proxy declaration.
    Proxy(ProxyDecl),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// The specifier as written, without quotes.
    pub source: String,
    /// `import type { ... }`
    pub type_only: bool,
    pub specifiers: Vec<ImportSpecifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSpecifier {
    /// `import foo from ...`
    Default { local: String },
    /// `import * as foo from ...`
    Namespace { local: String },
    /// `import { foo }`, `import { foo as bar }`
    Named {
        imported: String,
        local: String,
        type_only: bool,
    },
}

impl ImportSpecifier {
    pub fn local(&self) -> &str {
        match self {
            ImportSpecifier::Default { local }
            | ImportSpecifier::Namespace { local }
            | ImportSpecifier::Named { local, .. } => local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    /// Carries an `@expose` annotation comment.
    pub exposed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBinding {
    /// Name on the module surface.
    pub exported: String,
    /// Local binding it refers to.
    pub local: String,
}

impl ExportBinding {
    /// True for `exports.f = f` / `export { f }`: the name is exported as itself.
    pub fn is_self_binding(&self) -> bool {
        self.exported == self.local
    }
}

/// A name requested from a module and the local name it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub imported: String,
    pub local: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDecl {
    pub bindings: Vec<Binding>,
    pub methods: Vec<String>,
    pub filename: String,
}
