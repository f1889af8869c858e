use serde::Serialize;
use std::path::Path;

/// Extensions probed when an import specifier omits one, in priority order.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"];

/// Source dialect of a module; picks the tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Dialect {
    /// File extensions for this dialect.
    pub fn extensions(&self) -> &[&str] {
        match self {
            Dialect::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Dialect::TypeScript => &["ts", "mts", "cts"],
            Dialect::Tsx => &["tsx"],
        }
    }

    /// Dialect implied by a file's extension, if it is a known source file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [Dialect::JavaScript, Dialect::TypeScript, Dialect::Tsx]
            .into_iter()
            .find(|d| d.extensions().contains(&ext.as_str()))
    }

    /// The tree-sitter grammar for this dialect.
    pub fn language(&self) -> tree_sitter::Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Dialect::JavaScript),
            "typescript" | "ts" => Ok(Dialect::TypeScript),
            "tsx" => Ok(Dialect::Tsx),
            _ => Err(format!("unsupported dialect: {s}")),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::JavaScript => write!(f, "javascript"),
            Dialect::TypeScript => write!(f, "typescript"),
            Dialect::Tsx => write!(f, "tsx"),
        }
    }
}
