use crate::cli::canonical;
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::Result;
use crate::transform::Transform;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct TransformArgs {
    /// Source file to transform
    pub file: PathBuf,

    /// Project root (defaults to the project config directory, else the
    /// current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Backend directory, relative to the project root
    #[arg(long)]
    pub backend_dir: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &TransformArgs) -> Result<()> {
    let file = canonical(&args.file)?;
    let working_dir = canonical(Path::new("."))?;

    let cli = CliOverrides {
        root: args.root.as_deref().map(canonical).transpose()?,
        backend_dir: args.backend_dir.clone(),
        ..Default::default()
    };
    let config = resolve_config(&working_dir, &cli)?;
    let transform = Transform::from_config(&config);

    let source = std::fs::read_to_string(&file)?;
    let transformed = transform.transform_source(&file, &source)?;

    tracing::debug!(
        "{}: {} import(s) rewritten",
        file.display(),
        transformed.entries.len()
    );

    match &args.output {
        Some(out) => std::fs::write(out, &transformed.code)?,
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout();
            stdout.write_all(transformed.code.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
