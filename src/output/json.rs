use crate::errors::Result;
use crate::transform::RewriteEntry;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub metadata: Metadata,
    pub files: Vec<FileResult>,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub root: PathBuf,
    pub backend_root: PathBuf,
    pub files_checked: usize,
    pub files_rewritten: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
    pub imports_rewritten: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Unchanged,
    Rewritten,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct FileResult {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rewrites: Vec<RewriteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteSummary {
    pub line: usize,
    pub specifier: String,
    pub filename: String,
    pub methods: Vec<String>,
}

impl From<&RewriteEntry> for RewriteSummary {
    fn from(entry: &RewriteEntry) -> Self {
        Self {
            line: entry.record.line,
            specifier: entry.record.specifier.clone(),
            filename: entry.relative_path.clone(),
            methods: entry.methods.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExposedOutput {
    pub file: PathBuf,
    pub functions: Vec<String>,
}

/// Write check output as JSON.
pub fn write_check_json<W: Write>(writer: &mut W, output: &CheckOutput) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, output)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the exposed functions of one backend file as JSON.
pub fn write_exposed_json<W: Write>(writer: &mut W, output: &ExposedOutput) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, output)?;
    writeln!(writer)?;
    Ok(())
}
