use crate::errors::{ExposerError, Result};
use crate::syntax::{
    Dialect, ExportBinding, FunctionDecl, ImportDecl, ImportSpecifier, Module, Statement,
    StatementKind,
};
use std::path::Path;

/// Annotation tag that marks a function as remotely invocable.
pub const EXPOSE_TAG: &str = "@expose";

/// Parse a source file, choosing the grammar from its extension
/// (JavaScript when the extension is unknown).
pub fn parse_module(path: &Path, source: &str) -> Result<Module> {
    let dialect = Dialect::from_path(path).unwrap_or(Dialect::JavaScript);
    parse_module_as(path, source, dialect)
}

/// Parse a source file with an explicit dialect.
pub fn parse_module_as(path: &Path, source: &str, dialect: Dialect) -> Result<Module> {
    let parse_failure = |message: String| ExposerError::ParseFailure {
        file: path.to_path_buf(),
        message,
    };

    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|e| parse_failure(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| parse_failure("parser produced no syntax tree".to_string()))?;

    let root = tree.root_node();
    let bytes = source.as_bytes();
    if root.has_error() {
        return Err(parse_failure(describe_syntax_error(root, bytes)));
    }

    let mut statements = Vec::new();
    let mut consumed = 0usize;
    let mut pending_comments: Vec<&str> = Vec::new();
    let mut prev_end_row: Option<usize> = None;

    let mut cursor = root.walk();
    for node in root.children(&mut cursor) {
        if node.kind() == "comment" {
            // A comment on the same line as the previous statement belongs to it.
            if prev_end_row != Some(node.start_position().row) {
                pending_comments.push(node_text(node, bytes));
            }
            continue;
        }

        let kind = lower_statement(node, bytes, &pending_comments);
        statements.push(Statement {
            leading: source[consumed..node.start_byte()].to_string(),
            text: source[node.start_byte()..node.end_byte()].to_string(),
            line: node.start_position().row + 1,
            kind,
        });
        consumed = node.end_byte();
        prev_end_row = Some(node.end_position().row);
        pending_comments.clear();
    }

    Ok(Module::new(
        path.to_path_buf(),
        dialect,
        statements,
        source[consumed..].to_string(),
    ))
}

fn lower_statement(node: tree_sitter::Node, source: &[u8], comments: &[&str]) -> StatementKind {
    match node.kind() {
        "import_statement" => lower_import(node, source)
            .map(StatementKind::Import)
            .unwrap_or(StatementKind::Other),
        "function_declaration" | "generator_function_declaration" => {
            match function_name(node, source) {
                Some(name) => StatementKind::Function(FunctionDecl {
                    name,
                    exposed: comments.iter().any(|c| has_expose_tag(c)),
                }),
                None => StatementKind::Other,
            }
        }
        "export_statement" => lower_export(node, source, comments),
        "expression_statement" => lower_surface_assignment(node, source)
            .map(StatementKind::SurfaceExport)
            .unwrap_or(StatementKind::Other),
        _ => StatementKind::Other,
    }
}

fn lower_import(node: tree_sitter::Node, source: &[u8]) -> Option<ImportDecl> {
    let source_node = node.child_by_field_name("source").or_else(|| {
        let mut cursor = node.walk();
        let found = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "string");
        found
    })?;

    let mut decl = ImportDecl {
        source: string_value(source_node, source),
        type_only: has_type_modifier(node),
        specifiers: Vec::new(),
    };

    let mut cursor = node.walk();
    for clause in node.named_children(&mut cursor) {
        if clause.kind() != "import_clause" {
            continue;
        }
        let mut clause_cursor = clause.walk();
        for part in clause.named_children(&mut clause_cursor) {
            match part.kind() {
                "identifier" => decl.specifiers.push(ImportSpecifier::Default {
                    local: node_text(part, source).to_string(),
                }),
                "namespace_import" => {
                    let mut ns_cursor = part.walk();
                    let local = part
                        .named_children(&mut ns_cursor)
                        .find(|c| c.kind() == "identifier")
                        .map(|c| node_text(c, source).to_string());
                    if let Some(local) = local {
                        decl.specifiers.push(ImportSpecifier::Namespace { local });
                    }
                }
                "named_imports" => {
                    let mut named_cursor = part.walk();
                    for spec in part.named_children(&mut named_cursor) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        if let Some(specifier) = lower_import_specifier(spec, source) {
                            decl.specifiers.push(specifier);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Some(decl)
}

fn lower_import_specifier(spec: tree_sitter::Node, source: &[u8]) -> Option<ImportSpecifier> {
    let name = spec.child_by_field_name("name")?;
    let imported = if name.kind() == "string" {
        string_value(name, source)
    } else {
        node_text(name, source).to_string()
    };
    let local = spec
        .child_by_field_name("alias")
        .map(|a| node_text(a, source).to_string())
        .unwrap_or_else(|| imported.clone());

    // `import { default as x }` is a default binding in disguise
    if imported == "default" {
        return Some(ImportSpecifier::Default { local });
    }

    Some(ImportSpecifier::Named {
        imported,
        local,
        type_only: has_type_modifier(spec),
    })
}

fn lower_export(node: tree_sitter::Node, source: &[u8], comments: &[&str]) -> StatementKind {
    let mut is_default = false;
    let mut is_type = false;
    let mut exposed = comments.iter().any(|c| has_expose_tag(c));
    let mut clause = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "default" => is_default = true,
            "type" => is_type = true,
            // `export /** @expose */ function f() {}`
            "comment" => exposed |= has_expose_tag(node_text(child, source)),
            "export_clause" => clause = Some(child),
            _ => {}
        }
    }

    if is_default {
        return StatementKind::Other;
    }

    if let Some(decl) = node.child_by_field_name("declaration") {
        if matches!(
            decl.kind(),
            "function_declaration" | "generator_function_declaration"
        ) {
            if let Some(name) = function_name(decl, source) {
                return StatementKind::ExportFunction(FunctionDecl { name, exposed });
            }
        }
        return StatementKind::Other;
    }

    // `export { f } from './other'` re-exports a foreign binding, not a local one
    if is_type || node.child_by_field_name("source").is_some() {
        return StatementKind::Other;
    }

    let Some(clause) = clause else {
        return StatementKind::Other;
    };
    let mut bindings = Vec::new();
    let mut clause_cursor = clause.walk();
    for spec in clause.named_children(&mut clause_cursor) {
        if spec.kind() != "export_specifier" || has_type_modifier(spec) {
            continue;
        }
        let Some(name) = spec.child_by_field_name("name") else {
            continue;
        };
        let local = node_text(name, source).to_string();
        let exported = spec
            .child_by_field_name("alias")
            .map(|a| match a.kind() {
                "string" => string_value(a, source),
                _ => node_text(a, source).to_string(),
            })
            .unwrap_or_else(|| local.clone());
        bindings.push(ExportBinding { exported, local });
    }
    StatementKind::SurfaceExport(bindings)
}

/// `exports.f = f;`, `module.exports.f = f;` or `module.exports = { f, g: h };`
fn lower_surface_assignment(node: tree_sitter::Node, source: &[u8]) -> Option<Vec<ExportBinding>> {
    let assignment = node.named_child(0)?;
    if assignment.kind() != "assignment_expression" {
        return None;
    }
    let left = assignment.child_by_field_name("left")?;
    let right = assignment.child_by_field_name("right")?;

    if left.kind() == "member_expression" {
        let object = left.child_by_field_name("object")?;
        let property = left.child_by_field_name("property")?;
        let object_text = compact(node_text(object, source));

        if object_text == "exports" || object_text == "module.exports" {
            if right.kind() != "identifier" {
                return None;
            }
            return Some(vec![ExportBinding {
                exported: node_text(property, source).to_string(),
                local: node_text(right, source).to_string(),
            }]);
        }

        if compact(node_text(left, source)) == "module.exports" && right.kind() == "object" {
            return Some(object_bindings(right, source));
        }
    }
    None
}

fn object_bindings(object: tree_sitter::Node, source: &[u8]) -> Vec<ExportBinding> {
    let mut bindings = Vec::new();
    let mut cursor = object.walk();
    for entry in object.named_children(&mut cursor) {
        match entry.kind() {
            "shorthand_property_identifier" => {
                let name = node_text(entry, source).to_string();
                bindings.push(ExportBinding {
                    exported: name.clone(),
                    local: name,
                });
            }
            "pair" => {
                let (Some(key), Some(value)) = (
                    entry.child_by_field_name("key"),
                    entry.child_by_field_name("value"),
                ) else {
                    continue;
                };
                if value.kind() != "identifier" {
                    continue;
                }
                let exported = match key.kind() {
                    "property_identifier" => node_text(key, source).to_string(),
                    "string" => string_value(key, source),
                    _ => continue,
                };
                bindings.push(ExportBinding {
                    exported,
                    local: node_text(value, source).to_string(),
                });
            }
            _ => {}
        }
    }
    bindings
}

fn function_name(node: tree_sitter::Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
}

/// `import type`, `import typeof`, `{ type Foo }`
fn has_type_modifier(node: tree_sitter::Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| !c.is_named() && matches!(c.kind(), "type" | "typeof"));
    found
}

/// True if a comment carries the `@expose` tag as a whole word.
pub fn has_expose_tag(comment: &str) -> bool {
    comment.match_indices(EXPOSE_TAG).any(|(i, _)| {
        comment[i + EXPOSE_TAG.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '$'))
    })
}

fn node_text<'a>(node: tree_sitter::Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

fn string_value(node: tree_sitter::Node, source: &[u8]) -> String {
    let text = node_text(node, source);
    let unquoted = text
        .strip_prefix(['\'', '"'])
        .and_then(|t| t.strip_suffix(['\'', '"']))
        .unwrap_or(text);
    unquoted.to_string()
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn describe_syntax_error(root: tree_sitter::Node, source: &[u8]) -> String {
    let Some(bad) = find_error_node(root) else {
        return "syntax error".to_string();
    };
    let pos = bad.start_position();
    if bad.is_missing() {
        format!(
            "missing `{}` at line {}, column {}",
            bad.kind(),
            pos.row + 1,
            pos.column + 1
        )
    } else {
        let snippet: String = node_text(bad, source)
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(24)
            .collect();
        format!(
            "unexpected `{}` at line {}, column {}",
            snippet,
            pos.row + 1,
            pos.column + 1
        )
    }
}

fn find_error_node(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(find_error_node)
}
