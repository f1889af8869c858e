use crate::errors::{ExposerError, Result};
use crate::transform::classify::ImportRecord;
use crate::transform::exports::ExposedExportSet;

/// A validated import, ready to be replaced by a proxy declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteEntry {
    pub record: ImportRecord,
    /// Remote method names, in import order.
    pub methods: Vec<String>,
    /// Target path relative to the backend root.
    pub relative_path: String,
}

/// Check that every name the import requests is exposed and exported.
///
/// A single missing name rejects the whole import; the error lists exactly
/// the missing names in import order.
pub fn validate(record: ImportRecord, exposed: &ExposedExportSet) -> Result<RewriteEntry> {
    let requested = record.imported_names();
    let missing: Vec<String> = requested
        .iter()
        .filter(|name| !exposed.contains(name))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(ExposerError::MissingExposure {
            specifier: record.specifier,
            names: missing,
        });
    }

    let relative_path = record.relative_path.clone();
    Ok(RewriteEntry {
        record,
        methods: requested,
        relative_path,
    })
}
