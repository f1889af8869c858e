use crate::cli::{canonical, working_dir_for};
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::{ExposerError, Result};
use crate::output::json::{
    write_check_json, CheckOutput, FileResult, FileStatus, Metadata, RewriteSummary,
};
use crate::output::text::write_check_text;
use crate::output::OutputFormat;
use crate::syntax::parse_module;
use crate::transform::Transform;
use crate::walk;
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Directory or single file to check (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Project root (defaults to the project config directory, else PATH's
    /// directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Backend directory, relative to the project root
    #[arg(long)]
    pub backend_dir: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let start = Instant::now();

    let requested = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = requested
        .canonicalize()
        .map_err(|_| ExposerError::NoFiles {
            path: requested.clone(),
        })?;

    let cli = CliOverrides {
        format: args.format,
        quiet: args.quiet,
        root: args.root.as_deref().map(canonical).transpose()?,
        backend_dir: args.backend_dir.clone(),
        include: args.include.clone(),
        exclude: args.exclude.clone(),
    };
    let config = resolve_config(&working_dir_for(&path), &cli)?;
    let root = canonical(&config.root)?;
    let transform = Transform::from_config(&config);

    let files: Vec<PathBuf> =
        walk::discover_files(&path, &config.extensions, &config.include, &config.exclude)?
            .into_iter()
            .filter(|f| !transform.is_backend_file(f))
            .collect();

    if files.is_empty() {
        return Err(ExposerError::NoFiles { path });
    }

    let files_skipped = AtomicUsize::new(0);

    let progress = if !config.quiet {
        let pb = indicatif::ProgressBar::new(files.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    // Each worker parses with its own tree-sitter parser and re-reads every
    // imported backend file.
    let results: Vec<FileResult> = files
        .par_iter()
        .filter_map(|file_path| {
            let result = match std::fs::read_to_string(file_path) {
                Ok(source) => Some(check_file(&transform, &root, file_path, &source)),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", file_path.display(), e);
                    files_skipped.fetch_add(1, Ordering::Relaxed);
                    None
                }
            };
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            result
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let files_rewritten = count(&results, FileStatus::Rewritten);
    let files_failed = count(&results, FileStatus::Failed);
    let imports_rewritten = results.iter().map(|r| r.rewrites.len()).sum();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let output = CheckOutput {
        metadata: Metadata {
            root: transform.project_root().to_path_buf(),
            backend_root: transform.backend_root().to_path_buf(),
            files_checked: results.len(),
            files_rewritten,
            files_failed,
            files_skipped: files_skipped.load(Ordering::Relaxed),
            imports_rewritten,
            elapsed_ms,
        },
        files: results,
    };

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Json => write_check_json(&mut stdout, &output)?,
        OutputFormat::Text => write_check_text(&mut stdout, &output)?,
    }

    if !config.quiet {
        eprintln!(
            "Checked {} files ({} imports rewritten) in {:.2}s",
            output.metadata.files_checked,
            imports_rewritten,
            elapsed_ms as f64 / 1000.0
        );
    }

    if files_failed > 0 {
        return Err(ExposerError::CheckFailed {
            failed: files_failed,
            total: output.metadata.files_checked,
        });
    }

    Ok(())
}

/// Plan the transform for one file without writing anything.
fn check_file(transform: &Transform, root: &Path, file_path: &Path, source: &str) -> FileResult {
    let path = file_path
        .strip_prefix(root)
        .unwrap_or(file_path)
        .to_path_buf();

    let planned = parse_module(file_path, source).and_then(|module| transform.plan(&module));
    match planned {
        Ok(entries) if entries.is_empty() => FileResult {
            path,
            status: FileStatus::Unchanged,
            rewrites: Vec::new(),
            error: None,
        },
        Ok(entries) => FileResult {
            path,
            status: FileStatus::Rewritten,
            rewrites: entries.iter().map(RewriteSummary::from).collect(),
            error: None,
        },
        Err(e) => {
            tracing::debug!("{}: {}", file_path.display(), e);
            FileResult {
                path,
                status: FileStatus::Failed,
                rewrites: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

fn count(results: &[FileResult], status: FileStatus) -> usize {
    results.iter().filter(|r| r.status == status).count()
}
