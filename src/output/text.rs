use crate::errors::Result;
use crate::output::json::{CheckOutput, ExposedOutput, FileStatus};
use std::io::Write;

/// Write check output as human-readable text.
pub fn write_check_text<W: Write>(writer: &mut W, output: &CheckOutput) -> Result<()> {
    let metadata = &output.metadata;
    writeln!(writer, "Expose Check Report")?;
    writeln!(writer, "===================")?;
    writeln!(writer)?;
    writeln!(writer, "Root:       {}", metadata.root.display())?;
    writeln!(writer, "Backend:    {}", metadata.backend_root.display())?;
    writeln!(writer, "Checked:    {} files", metadata.files_checked)?;
    writeln!(
        writer,
        "Rewritten:  {} files ({} imports)",
        metadata.files_rewritten, metadata.imports_rewritten
    )?;
    writeln!(writer, "Failed:     {} files", metadata.files_failed)?;
    writeln!(writer, "Skipped:    {} files", metadata.files_skipped)?;

    let rewritten: Vec<_> = output
        .files
        .iter()
        .filter(|f| f.status == FileStatus::Rewritten)
        .collect();
    if !rewritten.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Rewrites")?;
        writeln!(writer, "--------")?;
        for file in rewritten {
            for rewrite in &file.rewrites {
                writeln!(
                    writer,
                    "  {}:{}  {} -> {} [{}]",
                    file.path.display(),
                    rewrite.line,
                    rewrite.specifier,
                    rewrite.filename,
                    rewrite.methods.join(", ")
                )?;
            }
        }
    }

    let failed: Vec<_> = output
        .files
        .iter()
        .filter(|f| f.status == FileStatus::Failed)
        .collect();
    if !failed.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Errors")?;
        writeln!(writer, "------")?;
        for file in failed {
            writeln!(
                writer,
                "  {}: {}",
                file.path.display(),
                file.error.as_deref().unwrap_or("unknown error")
            )?;
        }
    }

    Ok(())
}

/// Write the exposed functions of one backend file, one per line.
pub fn write_exposed_text<W: Write>(writer: &mut W, output: &ExposedOutput) -> Result<()> {
    if output.functions.is_empty() {
        writeln!(writer, "{}: no exposed functions", output.file.display())?;
        return Ok(());
    }
    for name in &output.functions {
        writeln!(writer, "{name}")?;
    }
    Ok(())
}
