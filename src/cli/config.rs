use crate::cli::canonical;
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::show::render_show;
use crate::errors::Result;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance
    Show {
        /// Working directory (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Only list settings that differ from the built-in defaults
        #[arg(long)]
        changed: bool,
    },
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show { path, changed } => {
            let working_dir = canonical(path.as_deref().unwrap_or(Path::new(".")))?;
            let config = resolve_config(&working_dir, &CliOverrides::default())?;
            let mut stdout = std::io::stdout();
            render_show(&mut stdout, &config, *changed)?;
        }
    }
    Ok(())
}
