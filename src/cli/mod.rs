pub mod check;
pub mod config;
pub mod exposed;
pub mod transform;

use crate::errors::{ExposerError, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "exposer",
    version,
    about = "Rewrite imports of exposed backend functions into runtime proxies"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Transform one source file and print (or write) the result
    Transform(transform::TransformArgs),
    /// Validate every frontend file under a project without writing anything
    Check(check::CheckArgs),
    /// List the exposed, exported functions of a backend file
    Exposed(exposed::ExposedArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Transform(args) => transform::run(&args),
        Commands::Check(args) => check::run(&args),
        Commands::Exposed(args) => exposed::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

/// Canonicalize a user-supplied path, mapping failure to a config error.
pub(crate) fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .map_err(|_| ExposerError::Config(format!("Invalid path: {}", path.display())))
}

/// Directory used to look up the project config for `path`: the path itself
/// when it is a directory, else its parent.
pub(crate) fn working_dir_for(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
