use crate::cli::canonical;
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::Result;
use crate::output::json::{write_exposed_json, ExposedOutput};
use crate::output::text::write_exposed_text;
use crate::output::OutputFormat;
use crate::transform::exports::resolve_exposed_exports;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExposedArgs {
    /// Backend file (or module path without extension)
    pub file: PathBuf,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: &ExposedArgs) -> Result<()> {
    let working_dir = canonical(Path::new("."))?;
    let cli = CliOverrides {
        format: args.format,
        ..Default::default()
    };
    let config = resolve_config(&working_dir, &cli)?;

    let target = if args.file.is_absolute() {
        args.file.clone()
    } else {
        working_dir.join(&args.file)
    };
    let specifier = args.file.display().to_string();
    let exposed = resolve_exposed_exports(&target, &specifier, None, &config.extensions)?;

    let output = ExposedOutput {
        file: args.file.clone(),
        functions: exposed.names().to_vec(),
    };

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Json => write_exposed_json(&mut stdout, &output)?,
        OutputFormat::Text => write_exposed_text(&mut stdout, &output)?,
    }

    Ok(())
}
